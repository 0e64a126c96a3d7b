use serde_json::Value;
use skyledger_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let headline = if error.code.starts_with("internal_") {
        "Something went wrong while preparing the report."
    } else {
        "The report could not be produced."
    };

    let mut lines = vec![
        headline.to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];
    lines.extend(detail_lines(error));
    lines.push(String::new());
    lines.push("What to do next:".to_string());

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn detail_lines(error: &ClientError) -> Vec<String> {
    let Some(data) = error.data.as_ref() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    if let Some(path) = data.get("path").and_then(Value::as_str) {
        lines.push(format!("  Path:     {path}"));
    }
    if let Some(sheet) = data.get("sheet").and_then(Value::as_str) {
        lines.push(format!("  Sheet:    {sheet}"));
    }
    if let Some(headers) = joined(data.get("actual_headers")) {
        lines.push(format!("  Found:    {headers}"));
    }
    lines
}

fn joined(value: Option<&Value>) -> Option<String> {
    let items = value?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<&str>>();
    if items.is_empty() {
        return None;
    }
    Some(items.join(", "))
}
