use std::io;

use serde_json::Value;

use super::format::{self, Column};
use super::values::{count, text};

pub fn render_inspect(data: &Value) -> io::Result<String> {
    let sheets = data
        .get("sheets")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("workbook inspect output requires sheets"))?;

    let mut lines = vec![
        format!("Workbook `{}` has {} sheet(s).", text(data, "path"), sheets.len()),
        String::new(),
    ];

    let rows = sheets
        .iter()
        .map(|sheet| {
            let headers = sheet
                .get("headers")
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<&str>>()
                        .join(", ")
                })
                .unwrap_or_default();
            let period = sheet
                .get("price_period")
                .map(|period| format!("{} to {}", text(period, "start"), text(period, "end")))
                .unwrap_or_else(|| "-".to_string());
            vec![text(sheet, "name"), count(sheet, "row_count"), period, headers]
        })
        .collect::<Vec<Vec<String>>>();

    lines.extend(format::render_table_or_blocks(
        &[
            Column::left("Sheet"),
            Column::right("Rows"),
            Column::left("Price period"),
            Column::left("Headers"),
        ],
        &rows,
        format::terminal_width(),
        "Sheet",
    ));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_inspect;

    #[test]
    fn shows_price_periods_only_for_labelled_sheets() {
        let data = json!({
            "path": "base.xlsx",
            "sheets": [
                {"name": "2024-03-01_2024-03-31", "headers": ["Sector", "Base"], "row_count": 2,
                 "price_period": {"start": "2024-03-01", "end": "2024-03-31"}},
                {"name": "Notes", "headers": [], "row_count": 0}
            ]
        });

        let rendered = render_inspect(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Workbook `base.xlsx` has 2 sheet(s)."));
            assert!(text.contains("2024-03-01 to 2024-03-31"));
            assert!(text.contains("Sector, Base"));
            assert!(text.contains("Notes"));
        }
    }
}
