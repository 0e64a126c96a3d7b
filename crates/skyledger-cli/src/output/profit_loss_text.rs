use std::io;

use serde_json::Value;

use super::format::{self, Column};
use super::values::{count, number, text};

pub fn render_report(data: &Value) -> io::Result<String> {
    let rows = array(data, "rows")?;
    let sectors = array(data, "sectors")?;

    let mut lines = header_lines("Profit/loss report", data);
    if rows.is_empty() {
        lines.push(String::new());
        lines.extend(empty_explanation(data));
        return Ok(lines.join("\n"));
    }

    lines.push(String::new());
    lines.push("Rows:".to_string());
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text(row, "date"),
                text(row, "sector"),
                text(row, "flight_number"),
                format::amount(number(row, "amount").unwrap_or_default()),
                format::amount(number(row, "base").unwrap_or_default()),
                format::amount(number(row, "profit_loss").unwrap_or_default()),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &[
            Column::left("Date"),
            Column::left("Sector"),
            Column::left("Flight"),
            Column::right("Amount"),
            Column::right("Base"),
            Column::right("Profit/Loss"),
        ],
        &table_rows,
        format::terminal_width(),
        "Row",
    ));

    lines.push(String::new());
    lines.push("By sector:".to_string());
    lines.extend(sector_table(sectors));

    Ok(lines.join("\n"))
}

pub fn render_analytics(data: &Value) -> io::Result<String> {
    let sectors = array(data, "sectors")?;
    let kpis = data
        .get("kpis")
        .ok_or_else(|| io::Error::other("analytics output requires kpis"))?;
    let symbol = text(kpis, "currency_symbol");

    let mut lines = header_lines("Profit/loss analytics", data);
    if sectors.is_empty() {
        lines.push(String::new());
        lines.extend(empty_explanation(data));
        return Ok(lines.join("\n"));
    }

    lines.push(String::new());
    lines.push("Key figures:".to_string());
    lines.extend(format::key_value_rows(
        &[
            (
                "Total sales:",
                format::money(&symbol, number(kpis, "total_sales").unwrap_or_default()),
            ),
            (
                "Total profit:",
                format::money(&symbol, number(kpis, "total_profit").unwrap_or_default()),
            ),
            (
                "Average profit per sector:",
                number(kpis, "average_profit")
                    .map(|value| format::money(&symbol, value))
                    .unwrap_or_else(|| "n/a".to_string()),
            ),
            ("Flights:", count(kpis, "flight_count")),
            ("Sectors:", count(kpis, "sector_count")),
        ],
        2,
    ));

    let top_n = count(data, "top_n");
    lines.push(String::new());
    lines.push(format!("Top {top_n} sectors by profit/loss:"));
    lines.extend(sector_table(array(data, "top_sectors")?));
    lines.push(String::new());
    lines.push(format!("Bottom {top_n} sectors by profit/loss:"));
    lines.extend(sector_table(array(data, "bottom_sectors")?));

    lines.push(String::new());
    lines.push("Trend by sector:".to_string());
    for series in array(data, "trends")? {
        let points = series
            .get("points")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
            .iter()
            .map(|point| {
                format!(
                    "{} {}",
                    text(point, "date"),
                    format::amount(number(point, "profit_loss").unwrap_or_default())
                )
            })
            .collect::<Vec<String>>();
        lines.push(format!("  {}: {}", text(series, "sector"), points.join(", ")));
    }

    Ok(lines.join("\n"))
}

fn array<'a>(data: &'a Value, key: &str) -> io::Result<&'a Vec<Value>> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("profit/loss output requires {key}")))
}

fn header_lines(title: &str, data: &Value) -> Vec<String> {
    let summary = data.get("summary").cloned().unwrap_or(Value::Null);
    let base_table = summary
        .get("base_table")
        .and_then(Value::as_str)
        .unwrap_or("none overlapping")
        .to_string();

    let mut lines = vec![
        format!("{title} for {} to {}", text(data, "from"), text(data, "to")),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Sales workbook:", text(data, "sales_path")),
            ("Base price workbook:", text(data, "base_price_path")),
            ("Base price sheet:", base_table),
            ("Rows read:", count(&summary, "rows_read")),
            ("Rows skipped:", count(&summary, "rows_skipped")),
            ("Rows in window:", count(&summary, "rows_in_window")),
            ("Rows reconciled:", count(&summary, "rows_reconciled")),
            ("Rows unresolved:", count(&summary, "rows_unresolved")),
        ],
        2,
    ));
    lines
}

fn empty_explanation(data: &Value) -> Vec<String> {
    let has_table = data
        .get("summary")
        .and_then(|summary| summary.get("base_table"))
        .is_some_and(Value::is_string);
    let mut lines = vec!["No sales rows could be priced for this window.".to_string()];
    if has_table {
        lines.push(
            "  None of the in-window sectors appear on the base price sheet.".to_string(),
        );
    } else {
        lines.push(
            "  No base price sheet covers these dates. Run `skyledger workbook inspect <path>`"
                .to_string(),
        );
        lines.push("  to check the `<start>_<end>` sheet names.".to_string());
    }
    lines
}

fn sector_table(sectors: &[Value]) -> Vec<String> {
    let rows = sectors
        .iter()
        .map(|row| {
            vec![
                text(row, "sector"),
                format::amount(number(row, "total_amount").unwrap_or_default()),
                format::amount(number(row, "total_base").unwrap_or_default()),
                format::amount(number(row, "total_profit_loss").unwrap_or_default()),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    format::render_table_or_blocks(
        &[
            Column::left("Sector"),
            Column::right("Amount"),
            Column::right("Base"),
            Column::right("Profit/Loss"),
        ],
        &rows,
        format::terminal_width(),
        "Sector",
    )
}
