use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `skyledger {cmd} --help` for usage."),
            None => "Run `skyledger --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    /// A report was requested before every workbook it reads was supplied.
    pub fn missing_input(missing: &[&str], command: &str) -> Self {
        let listed = missing.join(", ");
        Self::new(
            "missing_input",
            &format!("Please provide all required files before running `{command}`: missing {listed}."),
            missing
                .iter()
                .map(|input| match flag_for(input) {
                    Some(flag) => format!("Pass the {input} workbook with `--{flag}`."),
                    None => format!("Pass the {input} workbook path as an argument."),
                })
                .chain(std::iter::once(format!(
                    "Run `skyledger {command} --help` for usage."
                )))
                .collect(),
        )
        .with_data(json!({
            "missing": missing,
            "command_hint": command,
        }))
    }

    pub fn workbook_load_failed(role: &str, path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "workbook_load_failed",
            &format!("Error loading {role} workbook `{location}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Use an .xlsx, .xls, .xlsb, .ods or .csv file, or a directory of .csv files."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "role": role,
            "path": location,
        }))
    }

    pub fn invalid_date_range(start: &str, end: &str, command: &str) -> Self {
        Self::new(
            "invalid_date_range",
            "Start date must be before or equal to end date.",
            vec![
                format!("Swap the dates or pick a later end date than {start}."),
                format!("Run `skyledger {command} --help` for usage."),
            ],
        )
        .with_data(json!({
            "from": start,
            "to": end,
        }))
    }

    pub fn sheet_schema_mismatch(
        role: &str,
        sheet: &str,
        required_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        let missing = required_headers
            .iter()
            .filter(|header| !actual_headers.contains(header))
            .cloned()
            .collect::<Vec<String>>();
        Self::new(
            "sheet_schema_mismatch",
            &format!(
                "Sheet `{sheet}` in the {role} workbook is missing required columns: {}.",
                missing.join(", ")
            ),
            vec![
                "Add the missing header cells to the first row of the sheet.".to_string(),
                format!("Run `skyledger workbook inspect <path>` to review the {role} headers."),
            ],
        )
        .with_data(json!({
            "role": role,
            "sheet": sheet,
            "required_headers": required_headers,
            "actual_headers": actual_headers,
            "missing_headers": missing,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

fn flag_for(input: &str) -> Option<&'static str> {
    match input {
        "sales" => Some("sales"),
        "base price" => Some("base-price"),
        _ => None,
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
