use skyledger_client::commands;
use skyledger_client::commands::profit_loss::{ProfitLossRunOptions, ProfitLossView};
use skyledger_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, PlCommand, ProfitLossArgs, WorkbookCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Inventory { path, .. } => commands::inventory::run(path.as_deref()),
        Commands::Pl { command } => match command {
            PlCommand::Report { args } => {
                commands::profit_loss::run_with_options(profit_loss_options(
                    ProfitLossView::Report,
                    args,
                    None,
                ))
            }
            PlCommand::Analytics { args, top } => {
                commands::profit_loss::run_with_options(profit_loss_options(
                    ProfitLossView::Analytics,
                    args,
                    *top,
                ))
            }
        },
        Commands::Workbook { command } => match command {
            WorkbookCommand::Inspect { path, .. } => commands::workbook::inspect(path),
        },
    }
}

fn profit_loss_options(
    view: ProfitLossView,
    args: &ProfitLossArgs,
    top_n: Option<usize>,
) -> ProfitLossRunOptions {
    ProfitLossRunOptions {
        sales: args.sales.clone(),
        base_price: args.base_price.clone(),
        from: args.from.as_ref().map(|value| value.as_str().to_string()),
        to: args.to.as_ref().map(|value| value.as_str().to_string()),
        top_n,
        ..ProfitLossRunOptions::new(view)
    }
}
