use std::path::PathBuf;

use crate::ClientResult;
use crate::commands::common::display_path;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    InventoryReportData, InventoryRowData, InventorySummary, SectorInventoryData,
};
use crate::config::ReportSettings;
use crate::dates::format_iso_date;
use crate::inventory::summarize_by_sector;
use crate::session::{ReportInputs, ReportSession};
use crate::workbook::WorkbookRole;

pub const COMMAND: &str = "inventory";

#[derive(Debug, Default)]
pub struct InventoryRunOptions {
    pub path: Option<String>,
}

pub fn run(path: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(InventoryRunOptions {
        path: path.map(std::string::ToString::to_string),
    })
}

#[doc(hidden)]
pub fn run_with_options(options: InventoryRunOptions) -> ClientResult<SuccessEnvelope> {
    let mut session = ReportSession::new(
        ReportInputs {
            inventory: options.path.map(PathBuf::from),
            ..ReportInputs::default()
        },
        ReportSettings::default(),
    );
    run_in_session(&mut session)
}

pub fn run_in_session(session: &mut ReportSession) -> ClientResult<SuccessEnvelope> {
    session.inputs().require(&[WorkbookRole::Inventory], COMMAND)?;
    let extraction = session.inventory(COMMAND)?;
    let sectors = summarize_by_sector(&extraction.rows);

    let mut flights = extraction
        .rows
        .iter()
        .map(|row| row.flight_number.as_str())
        .collect::<Vec<&str>>();
    flights.sort_unstable();
    flights.dedup();

    let data = InventoryReportData {
        path: display_path(session.inputs().inventory.as_deref()),
        sheet: extraction.sheet.clone(),
        summary: InventorySummary {
            rows_read: extraction.rows_read,
            rows_skipped: extraction.rows_skipped,
            flights: flights.len(),
            sectors: sectors.len(),
        },
        rows: extraction
            .rows
            .iter()
            .map(|row| InventoryRowData {
                flight_number: row.flight_number.clone(),
                sector: row.sector.clone(),
                departure_date: row.departure_date.as_ref().map(format_iso_date),
                total_seats: row.total_seats,
                sold_seats: row.sold_seats,
                unsold_seats: row.unsold_seats,
                mat_ratio: row.mat_ratio,
                release_ratio: row.release_ratio,
            })
            .collect(),
        sectors: sectors
            .iter()
            .map(|sector| SectorInventoryData {
                sector: sector.sector.clone(),
                total_seats: sector.total_seats,
                sold_seats: sector.sold_seats,
                unsold_seats: sector.unsold_seats,
                mat_ratio: sector.mat_ratio,
                release_ratio: sector.release_ratio,
                mat_band: sector.mat_band().map(|band| band.as_str().to_string()),
                release_band: sector.release_band().map(|band| band.as_str().to_string()),
            })
            .collect(),
    };

    success(COMMAND, data)
}
