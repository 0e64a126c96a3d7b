mod error_text;
mod format;
mod inventory_text;
mod json;
mod mode;
mod profit_loss_text;
mod values;
mod workbook_text;

use std::io;

use skyledger_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "inventory" => inventory_text::render_inventory(&success.data),
        "pl report" => profit_loss_text::render_report(&success.data),
        "pl analytics" => profit_loss_text::render_analytics(&success.data),
        "workbook inspect" => workbook_text::render_inspect(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
