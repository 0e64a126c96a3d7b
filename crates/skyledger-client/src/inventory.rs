use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::sales::normalize::normalize_sector;
use crate::workbook::{Cell, Sheet, WorkbookRole};
use crate::{ClientError, ClientResult};

const FLIGHT_NUMBER_COLUMN: &str = "Flight Number";
const SECTOR_COLUMN: &str = "Sector";
const DEPARTURE_DATE_COLUMN: &str = "Dep Date";
const UNSOLD_SEATS_COLUMN: &str = "Current Seat";
const TOTAL_SEATS_COLUMN: &str = "Total Seat";
const CARRIER_PREFIX: &str = "QP-";

const REQUIRED_INVENTORY_COLUMNS: [&str; 4] = [
    FLIGHT_NUMBER_COLUMN,
    SECTOR_COLUMN,
    UNSOLD_SEATS_COLUMN,
    TOTAL_SEATS_COLUMN,
];

pub const IRRELEVANT_INVENTORY_COLUMNS: [&str; 9] = [
    "DayWise Id",
    "Coupon Id",
    "Dep Time",
    "Arr Date",
    "Arr Time",
    "Starting Price",
    "Total Fare",
    "PNR",
    "Series Owner",
];

/// Gauge colouring: below half full is `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeBand {
    Low,
    High,
}

impl GaugeBand {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio < 50.0 { Self::Low } else { Self::High }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub flight_number: String,
    pub sector: String,
    pub departure_date: Option<NaiveDate>,
    pub total_seats: i64,
    pub unsold_seats: i64,
    pub sold_seats: i64,
    /// Sold share of total seats in percent; `None` for zero-seat flights.
    pub mat_ratio: Option<f64>,
    pub release_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorInventory {
    pub sector: String,
    pub total_seats: i64,
    pub sold_seats: i64,
    pub unsold_seats: i64,
    pub mat_ratio: Option<f64>,
    pub release_ratio: Option<f64>,
}

impl SectorInventory {
    pub fn mat_band(&self) -> Option<GaugeBand> {
        self.mat_ratio.map(GaugeBand::for_ratio)
    }

    pub fn release_band(&self) -> Option<GaugeBand> {
        self.release_ratio.map(GaugeBand::for_ratio)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryExtraction {
    pub sheet: String,
    pub rows: Vec<InventoryRow>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

pub fn build_inventory_rows(sheet: &Sheet) -> ClientResult<InventoryExtraction> {
    let mut working = sheet.clone();
    working.drop_columns(&IRRELEVANT_INVENTORY_COLUMNS);

    if !working.missing_columns(&REQUIRED_INVENTORY_COLUMNS).is_empty() {
        return Err(ClientError::sheet_schema_mismatch(
            WorkbookRole::Inventory.as_str(),
            &sheet.name,
            REQUIRED_INVENTORY_COLUMNS
                .iter()
                .map(|header| header.to_string())
                .collect(),
            sheet.headers.clone(),
        ));
    }

    let column = |header: &str| working.column_index(header).unwrap_or(usize::MAX);
    let flight_index = column(FLIGHT_NUMBER_COLUMN);
    let sector_index = column(SECTOR_COLUMN);
    let departure_index = column(DEPARTURE_DATE_COLUMN);
    let unsold_index = column(UNSOLD_SEATS_COLUMN);
    let total_index = column(TOTAL_SEATS_COLUMN);

    let mut rows = Vec::with_capacity(working.rows.len());
    let mut skipped = 0usize;
    for row in &working.rows {
        let sector = row.get(sector_index).and_then(Cell::as_text);
        let unsold = row.get(unsold_index).and_then(Cell::as_count);
        let total = row.get(total_index).and_then(Cell::as_count);

        let (Some(sector), Some(unsold_seats), Some(total_seats)) = (sector, unsold, total) else {
            skipped += 1;
            continue;
        };

        let sold_seats = total_seats - unsold_seats;
        rows.push(InventoryRow {
            flight_number: row
                .get(flight_index)
                .and_then(Cell::as_text)
                .map(|value| value.replace(CARRIER_PREFIX, ""))
                .unwrap_or_default(),
            sector: normalize_sector(&sector),
            departure_date: row.get(departure_index).and_then(Cell::as_date),
            total_seats,
            unsold_seats,
            sold_seats,
            mat_ratio: percent_of(sold_seats, total_seats),
            release_ratio: percent_of(unsold_seats, total_seats),
        });
    }

    if skipped > 0 {
        warn!(
            sheet = %sheet.name,
            skipped,
            "skipped inventory rows with unreadable sector or seat counts"
        );
    }

    Ok(InventoryExtraction {
        sheet: sheet.name.clone(),
        rows_read: working.rows.len(),
        rows_skipped: skipped,
        rows,
    })
}

/// Seat counts are summed; ratios are the mean of the per-flight ratios.
pub fn summarize_by_sector(rows: &[InventoryRow]) -> Vec<SectorInventory> {
    let mut grouped: BTreeMap<&str, Vec<&InventoryRow>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.sector.as_str()).or_default().push(row);
    }

    grouped
        .into_iter()
        .map(|(sector, members)| SectorInventory {
            sector: sector.to_string(),
            total_seats: seat_sum(members.iter().map(|row| row.total_seats)),
            sold_seats: seat_sum(members.iter().map(|row| row.sold_seats)),
            unsold_seats: seat_sum(members.iter().map(|row| row.unsold_seats)),
            mat_ratio: mean(members.iter().filter_map(|row| row.mat_ratio)),
            release_ratio: mean(members.iter().filter_map(|row| row.release_ratio)),
        })
        .collect()
}

fn seat_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0i64, i64::saturating_add)
}

fn percent_of(part: i64, total: i64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(part as f64 / total as f64 * 100.0)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}
