mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::io;
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use skyledger_client::ClientError;
use stdout_io::write_stdout_text;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SKYLEDGER_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

const TOP_LEVEL_HELP: &str = "SkyLedger - airline sales, seat inventory and profit/loss reports

USAGE: skyledger <command>

Seat inventory:
  skyledger inventory <path>                               Sold/unsold seats and MAT/Release ratios

Profit and loss (sales priced against base prices):
  skyledger pl report --sales <path> --base-price <path> --from <date> --to <date>
                                                           Every priced row plus sector totals
  skyledger pl analytics --sales <path> --base-price <path> --from <date> --to <date> [--top N]
                                                           KPIs, best/worst sectors, trends

Check a workbook first:
  skyledger workbook inspect <path>                        Sheets, headers and base price periods

Add --json to any report for machine-readable output.
Run `skyledger <command> --help` for command usage.
";

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 || is_top_level_help_request(&raw_args) {
        if write_stdout_text(TOP_LEVEL_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return handle_parse_error(&err, &raw_args),
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            debug!(command = %success.command, "command succeeded");
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> Result<ExitCode, ExitCode> {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        if write_stdout_text(&err.to_string()).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::UnknownArgument
            | ErrorKind::InvalidSubcommand
    ) {
        command_path_from_args(raw_args)
    } else {
        None
    };
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error = ClientError::invalid_argument_for_command(&clean_message, command_hint);
    let mode = infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return Err(ExitCode::from(2));
    }
    Err(ExitCode::from(1))
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage and "For more information" lines; the
/// recovery steps carry that guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    let non_flags = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect::<Vec<&str>>();

    match non_flags.as_slice() {
        ["pl", "report", ..] => Some("pl report"),
        ["pl", "analytics", ..] => Some("pl analytics"),
        ["pl", ..] => Some("pl"),
        ["workbook", "inspect", ..] => Some("workbook inspect"),
        ["workbook", ..] => Some("workbook"),
        ["inventory", ..] => Some("inventory"),
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}
