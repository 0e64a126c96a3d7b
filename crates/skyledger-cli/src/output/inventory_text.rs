use std::io;

use serde_json::Value;

use super::format::{self, Column};
use super::values::{count, number, text};

pub fn render_inventory(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("inventory output requires rows"))?;
    let sectors = data
        .get("sectors")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("inventory output requires sectors"))?;
    let summary = data.get("summary").cloned().unwrap_or(Value::Null);

    let mut lines = vec![
        format!(
            "Seat inventory from `{}` (sheet {})",
            text(data, "path"),
            text(data, "sheet")
        ),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Rows read:", count(&summary, "rows_read")),
            ("Rows skipped:", count(&summary, "rows_skipped")),
            ("Flights:", count(&summary, "flights")),
            ("Sectors:", count(&summary, "sectors")),
        ],
        2,
    ));

    if rows.is_empty() {
        lines.push(String::new());
        lines.push("No flights with readable seat counts were found.".to_string());
        return Ok(lines.join("\n"));
    }

    lines.push(String::new());
    lines.push("Sectors:".to_string());
    let sector_rows = sectors
        .iter()
        .map(|row| {
            vec![
                text(row, "sector"),
                count(row, "total_seats"),
                count(row, "sold_seats"),
                count(row, "unsold_seats"),
                gauge(row, "mat_ratio", "mat_band"),
                gauge(row, "release_ratio", "release_band"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &[
            Column::left("Sector"),
            Column::right("Total"),
            Column::right("Sold"),
            Column::right("Unsold"),
            Column::right("MAT Ratio"),
            Column::right("Release Ratio"),
        ],
        &sector_rows,
        format::terminal_width(),
        "Sector",
    ));

    lines.push(String::new());
    lines.push("Flights:".to_string());
    let flight_rows = rows
        .iter()
        .map(|row| {
            vec![
                text(row, "flight_number"),
                text(row, "sector"),
                row.get("departure_date")
                    .and_then(Value::as_str)
                    .unwrap_or("-")
                    .to_string(),
                count(row, "total_seats"),
                count(row, "sold_seats"),
                count(row, "unsold_seats"),
                format::percent(number(row, "mat_ratio")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &[
            Column::left("Flight"),
            Column::left("Sector"),
            Column::left("Departs"),
            Column::right("Total"),
            Column::right("Sold"),
            Column::right("Unsold"),
            Column::right("MAT Ratio"),
        ],
        &flight_rows,
        format::terminal_width(),
        "Flight",
    ));

    Ok(lines.join("\n"))
}

fn gauge(row: &Value, ratio_key: &str, band_key: &str) -> String {
    let ratio = format::percent(number(row, ratio_key));
    match row.get(band_key).and_then(Value::as_str) {
        Some(band) => format!("{ratio} ({band})"),
        None => ratio,
    }
}
