use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::reconcile::{ReconciledRecord, SectorAggregate};

#[derive(Debug, Clone, PartialEq)]
pub struct ProfitLossKpis {
    pub total_sales: f64,
    pub total_profit: f64,
    /// `None` when there are no sectors to average over.
    pub average_profit: Option<f64>,
    pub flight_count: usize,
    pub sector_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub profit_loss: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorTrend {
    pub sector: String,
    pub points: Vec<TrendPoint>,
}

/// Groups by sector in ascending sector order.
pub fn aggregate(records: &[ReconciledRecord]) -> Vec<SectorAggregate> {
    let mut by_sector: BTreeMap<&str, SectorAggregate> = BTreeMap::new();
    for record in records {
        let entry = by_sector
            .entry(record.sector.as_str())
            .or_insert_with(|| SectorAggregate {
                sector: record.sector.clone(),
                total_profit_loss: 0.0,
                total_base: 0.0,
                total_amount: 0.0,
            });
        entry.total_profit_loss += record.profit_loss;
        entry.total_base += record.base;
        entry.total_amount += record.amount;
    }
    by_sector.into_values().collect()
}

/// Totals come from the aggregates; distinct counts from the records.
pub fn derive_kpis(aggregates: &[SectorAggregate], records: &[ReconciledRecord]) -> ProfitLossKpis {
    let total_sales = aggregates.iter().map(|row| row.total_amount).sum::<f64>();
    let total_profit = aggregates
        .iter()
        .map(|row| row.total_profit_loss)
        .sum::<f64>();
    let average_profit = if aggregates.is_empty() {
        None
    } else {
        Some(total_profit / aggregates.len() as f64)
    };

    ProfitLossKpis {
        total_sales,
        total_profit,
        average_profit,
        flight_count: records
            .iter()
            .map(|record| record.flight_number.as_str())
            .collect::<HashSet<&str>>()
            .len(),
        sector_count: records
            .iter()
            .map(|record| record.sector.as_str())
            .collect::<HashSet<&str>>()
            .len(),
    }
}

pub fn top_sectors(aggregates: &[SectorAggregate], limit: usize) -> Vec<SectorAggregate> {
    let mut ranked = aggregates.to_vec();
    ranked.sort_by(|left, right| right.total_profit_loss.total_cmp(&left.total_profit_loss));
    ranked.truncate(limit);
    ranked
}

pub fn bottom_sectors(aggregates: &[SectorAggregate], limit: usize) -> Vec<SectorAggregate> {
    let mut ranked = aggregates.to_vec();
    ranked.sort_by(|left, right| left.total_profit_loss.total_cmp(&right.total_profit_loss));
    ranked.truncate(limit);
    ranked
}

/// One series per sector, points in record order.
pub fn sector_trends(records: &[ReconciledRecord]) -> Vec<SectorTrend> {
    let mut by_sector: BTreeMap<&str, Vec<TrendPoint>> = BTreeMap::new();
    for record in records {
        by_sector
            .entry(record.sector.as_str())
            .or_default()
            .push(TrendPoint {
                date: record.date,
                profit_loss: record.profit_loss,
            });
    }
    by_sector
        .into_iter()
        .map(|(sector, points)| SectorTrend {
            sector: sector.to_string(),
            points,
        })
        .collect()
}
