pub mod aggregate;
pub mod engine;

use chrono::NaiveDate;

pub use aggregate::{
    ProfitLossKpis, SectorTrend, TrendPoint, aggregate, bottom_sectors, derive_kpis,
    sector_trends, top_sectors,
};
pub use engine::{ReconcileOutcome, reconcile, reconcile_with_stats};

/// A sales row priced against its base. Only rows with a resolved base exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledRecord {
    pub sector: String,
    pub date: NaiveDate,
    pub flight_number: String,
    pub amount: f64,
    pub base: f64,
    pub profit_loss: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorAggregate {
    pub sector: String,
    pub total_profit_loss: f64,
    pub total_base: f64,
    pub total_amount: f64,
}
