use tracing::warn;

use crate::sales::{
    AMOUNT_COLUMN, FLIGHT_NUMBER_COLUMN, SECTOR_COLUMN, SalesRecord, SalesSheet,
    TRAVEL_DATE_COLUMN,
};
use crate::workbook::{Cell, Sheet, WorkbookRole};
use crate::{ClientError, ClientResult};

const REQUIRED_SALES_COLUMNS: [&str; 4] = [
    SECTOR_COLUMN,
    FLIGHT_NUMBER_COLUMN,
    AMOUNT_COLUMN,
    TRAVEL_DATE_COLUMN,
];

#[derive(Debug, Clone, PartialEq)]
pub struct SalesExtraction {
    pub sheets: Vec<SalesSheet>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Turns normalized sheets into typed records.
///
/// Sheets without a travel-date column are not sales sheets and are passed
/// over. A travel-date sheet missing any other required column is a format
/// error for the whole workbook.
pub fn extract_sales_sheets(sheets: &[Sheet]) -> ClientResult<SalesExtraction> {
    let mut extraction = SalesExtraction {
        sheets: Vec::new(),
        rows_read: 0,
        rows_skipped: 0,
    };

    for sheet in sheets {
        if !sheet.has_column(TRAVEL_DATE_COLUMN) {
            continue;
        }
        if !sheet.missing_columns(&REQUIRED_SALES_COLUMNS).is_empty() {
            return Err(ClientError::sheet_schema_mismatch(
                WorkbookRole::Sales.as_str(),
                &sheet.name,
                REQUIRED_SALES_COLUMNS
                    .iter()
                    .map(|header| header.to_string())
                    .collect(),
                sheet.headers.clone(),
            ));
        }

        let (records, skipped) = extract_records(sheet);
        if skipped > 0 {
            warn!(
                sheet = %sheet.name,
                skipped,
                "skipped sales rows with unreadable sector, amount or travel date"
            );
        }
        extraction.rows_read += sheet.rows.len();
        extraction.rows_skipped += skipped;
        extraction.sheets.push(SalesSheet {
            name: sheet.name.clone(),
            records,
        });
    }

    Ok(extraction)
}

fn extract_records(sheet: &Sheet) -> (Vec<SalesRecord>, usize) {
    let column = |header: &str| sheet.column_index(header).unwrap_or(usize::MAX);
    let sector_index = column(SECTOR_COLUMN);
    let flight_index = column(FLIGHT_NUMBER_COLUMN);
    let amount_index = column(AMOUNT_COLUMN);
    let date_index = column(TRAVEL_DATE_COLUMN);

    let mut records = Vec::with_capacity(sheet.rows.len());
    let mut skipped = 0usize;
    for row in &sheet.rows {
        let sector = row.get(sector_index).and_then(Cell::as_text);
        let amount = row.get(amount_index).and_then(Cell::as_number);
        let travel_date = row.get(date_index).and_then(Cell::as_date);

        let (Some(sector), Some(amount), Some(travel_date)) = (sector, amount, travel_date) else {
            skipped += 1;
            continue;
        };

        records.push(SalesRecord {
            sector,
            flight_number: row
                .get(flight_index)
                .and_then(Cell::as_text)
                .unwrap_or_default(),
            amount,
            travel_date,
        });
    }

    (records, skipped)
}
