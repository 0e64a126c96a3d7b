use std::path::Path;

use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{PeriodData, SheetOverview, WorkbookInspectData};
use crate::dates::format_iso_date;
use crate::pricing::parse_period_label;
use crate::workbook::load_workbook;

pub const INSPECT_COMMAND: &str = "workbook inspect";

/// Lists the sheets of any workbook with their headers, row counts and,
/// where the sheet name is a `<start>_<end>` label, the price period.
pub fn inspect(path: &str) -> ClientResult<SuccessEnvelope> {
    let workbook = load_workbook(Path::new(path), "input")?;

    let sheets = workbook
        .sheets
        .iter()
        .map(|sheet| SheetOverview {
            name: sheet.name.clone(),
            headers: sheet.headers.clone(),
            row_count: sheet.rows.len(),
            price_period: parse_period_label(&sheet.name).map(|period| PeriodData {
                start: format_iso_date(&period.start),
                end: format_iso_date(&period.end),
            }),
        })
        .collect::<Vec<SheetOverview>>();

    success(
        INSPECT_COMMAND,
        WorkbookInspectData {
            path: workbook.source.display().to_string(),
            sheets,
        },
    )
}
