use std::path::Path;

use crate::contracts::types::{ProfitLossSummary, SectorProfitLossData};
use crate::reconcile::{ReconcileOutcome, SectorAggregate};
use crate::sales::SalesExtraction;

pub(crate) fn display_path(path: Option<&Path>) -> String {
    path.map(|value| value.display().to_string())
        .unwrap_or_default()
}

pub(crate) fn sector_rows(aggregates: &[SectorAggregate]) -> Vec<SectorProfitLossData> {
    aggregates
        .iter()
        .map(|row| SectorProfitLossData {
            sector: row.sector.clone(),
            total_profit_loss: row.total_profit_loss,
            total_base: row.total_base,
            total_amount: row.total_amount,
        })
        .collect()
}

pub(crate) fn profit_loss_summary(
    sales: &SalesExtraction,
    outcome: &ReconcileOutcome,
    base_table: Option<&str>,
) -> ProfitLossSummary {
    ProfitLossSummary {
        rows_read: sales.rows_read,
        rows_skipped: sales.rows_skipped,
        rows_in_window: outcome.rows_in_window,
        rows_reconciled: outcome.records.len(),
        rows_unresolved: outcome.rows_unresolved,
        base_table: base_table.map(std::string::ToString::to_string),
    }
}
