use tracing::debug;

use crate::dates::DateWindow;
use crate::pricing::BasePriceTable;
use crate::reconcile::ReconciledRecord;
use crate::sales::{SalesRecord, SalesSheet};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconcileOutcome {
    pub records: Vec<ReconciledRecord>,
    /// Sales records read across all sales sheets.
    pub rows_considered: usize,
    pub rows_in_window: usize,
    /// In-window rows with no overlapping table or no sector match there.
    pub rows_unresolved: usize,
}

pub fn reconcile(
    sales_sheets: &[SalesSheet],
    base_tables: &[BasePriceTable],
    window: DateWindow,
) -> Vec<ReconciledRecord> {
    reconcile_with_stats(sales_sheets, base_tables, window).records
}

/// Matches every in-window sales row against the base price tables.
///
/// Tables are scanned in the order given. The first one whose labelled
/// period overlaps the window is the only table consulted for a row, even
/// when it lacks the row's sector and a later table has it.
pub fn reconcile_with_stats(
    sales_sheets: &[SalesSheet],
    base_tables: &[BasePriceTable],
    window: DateWindow,
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();
    let eligible = first_eligible_table(base_tables, window);

    for sheet in sales_sheets {
        outcome.rows_considered += sheet.records.len();
        for record in sheet
            .records
            .iter()
            .filter(|record| window.contains(record.travel_date))
        {
            outcome.rows_in_window += 1;
            match eligible.and_then(|table| reconcile_row(record, table)) {
                Some(reconciled) => outcome.records.push(reconciled),
                None => outcome.rows_unresolved += 1,
            }
        }
    }

    debug!(
        considered = outcome.rows_considered,
        in_window = outcome.rows_in_window,
        reconciled = outcome.records.len(),
        unresolved = outcome.rows_unresolved,
        table = eligible.map(|table| table.label.as_str()).unwrap_or("none"),
        "reconciled sales against base prices"
    );
    outcome
}

/// Eligibility depends only on the window, so every row resolves to the
/// same table.
pub fn first_eligible_table(
    base_tables: &[BasePriceTable],
    window: DateWindow,
) -> Option<&BasePriceTable> {
    base_tables.iter().find(|table| {
        table
            .period
            .is_some_and(|period| window.overlaps(period.start, period.end))
    })
}

fn reconcile_row(record: &SalesRecord, table: &BasePriceTable) -> Option<ReconciledRecord> {
    let base = table.base_for(&record.sector)?;
    Some(ReconciledRecord {
        sector: record.sector.clone(),
        date: record.travel_date,
        flight_number: record.flight_number.clone(),
        amount: record.amount,
        base,
        profit_loss: record.amount - base,
    })
}
