use std::cmp::Ordering;

use crate::sales::{SECTOR_COLUMN, TRAVEL_DATE_COLUMN, TYPE_COLUMN};
use crate::workbook::{Cell, Sheet};

/// Identity and administrative columns that never take part in a report.
pub const IRRELEVANT_SALES_COLUMNS: [&str; 14] = [
    "SL NO",
    "Title",
    "First Name",
    "Last Name",
    "Booking Status",
    "Carrier",
    "Type",
    "DepTime",
    "PNR",
    "DOB",
    "DMinusDays",
    "Name Updated",
    "Name Updated By",
    "Name Updated On",
];

pub const DEFAULT_EXCLUDED_PASSENGER_TYPES: [&str; 2] = ["infant", "child"];

/// Cleans every sales sheet and drops the ones left without rows.
pub fn normalize_sales_sheets(sheets: &[Sheet], excluded_types: &[String]) -> Vec<Sheet> {
    sheets
        .iter()
        .map(|sheet| normalize_sales_sheet(sheet, excluded_types))
        .filter(|sheet| !sheet.is_empty())
        .collect()
}

pub fn normalize_sales_sheet(sheet: &Sheet, excluded_types: &[String]) -> Sheet {
    let mut cleaned = sheet.clone();
    remove_excluded_passengers(&mut cleaned, excluded_types);
    cleaned.drop_columns(&IRRELEVANT_SALES_COLUMNS);
    sort_by_travel_date(&mut cleaned);
    normalize_sector_column(&mut cleaned);
    cleaned
}

/// `Type` must equal an excluded value exactly; `"Infant"` is kept.
pub fn remove_excluded_passengers(sheet: &mut Sheet, excluded_types: &[String]) {
    let Some(index) = sheet.column_index(TYPE_COLUMN) else {
        return;
    };

    sheet.rows.retain(|row| {
        let passenger_type = row.get(index).and_then(Cell::as_text);
        !passenger_type.is_some_and(|value| {
            excluded_types
                .iter()
                .any(|excluded| excluded.as_str() == value)
        })
    });
}

/// Stable ascending sort; rows whose travel date cannot be read go last.
pub fn sort_by_travel_date(sheet: &mut Sheet) {
    let Some(index) = sheet.column_index(TRAVEL_DATE_COLUMN) else {
        return;
    };

    sheet.rows.sort_by(|left, right| {
        let left_date = left.get(index).and_then(Cell::as_date);
        let right_date = right.get(index).and_then(Cell::as_date);
        match (left_date, right_date) {
            (Some(left_value), Some(right_value)) => left_value.cmp(&right_value),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

pub fn normalize_sector_column(sheet: &mut Sheet) {
    let Some(index) = sheet.column_index(SECTOR_COLUMN) else {
        return;
    };

    for row in &mut sheet.rows {
        if let Some(Cell::Text(value)) = row.get_mut(index) {
            *value = normalize_sector(value);
        }
    }
}

/// `"DEL - BOM"` becomes `"DELBOM"`.
pub fn normalize_sector(value: &str) -> String {
    value.chars().filter(|ch| *ch != '-' && *ch != ' ').collect()
}
