use crate::cli::{Commands, PlCommand, WorkbookCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Inventory { json, .. } => *json,
        Commands::Pl { command } => match command {
            PlCommand::Report { args } | PlCommand::Analytics { args, .. } => args.json,
        },
        Commands::Workbook { command } => match command {
            WorkbookCommand::Inspect { json, .. } => *json,
        },
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
