use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct InventoryReportData {
    pub path: String,
    pub sheet: String,
    pub summary: InventorySummary,
    pub rows: Vec<InventoryRowData>,
    pub sectors: Vec<SectorInventoryData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventorySummary {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub flights: usize,
    pub sectors: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryRowData {
    pub flight_number: String,
    pub sector: String,
    pub departure_date: Option<String>,
    pub total_seats: i64,
    pub sold_seats: i64,
    pub unsold_seats: i64,
    pub mat_ratio: Option<f64>,
    pub release_ratio: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectorInventoryData {
    pub sector: String,
    pub total_seats: i64,
    pub sold_seats: i64,
    pub unsold_seats: i64,
    pub mat_ratio: Option<f64>,
    pub release_ratio: Option<f64>,
    pub mat_band: Option<String>,
    pub release_band: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfitLossSummary {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_in_window: usize,
    pub rows_reconciled: usize,
    pub rows_unresolved: usize,
    /// Label of the base price sheet every row was priced against.
    pub base_table: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconciledRowData {
    pub sector: String,
    pub date: String,
    pub flight_number: String,
    pub amount: f64,
    pub base: f64,
    pub profit_loss: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectorProfitLossData {
    pub sector: String,
    pub total_profit_loss: f64,
    pub total_base: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfitLossReportData {
    pub from: String,
    pub to: String,
    pub sales_path: String,
    pub base_price_path: String,
    pub summary: ProfitLossSummary,
    pub rows: Vec<ReconciledRowData>,
    pub sectors: Vec<SectorProfitLossData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiData {
    pub currency_symbol: String,
    pub total_sales: f64,
    pub total_profit: f64,
    pub average_profit: Option<f64>,
    pub flight_count: usize,
    pub sector_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPointData {
    pub date: String,
    pub profit_loss: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSeriesData {
    pub sector: String,
    pub points: Vec<TrendPointData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfitLossAnalyticsData {
    pub from: String,
    pub to: String,
    pub sales_path: String,
    pub base_price_path: String,
    pub summary: ProfitLossSummary,
    pub kpis: KpiData,
    pub top_n: usize,
    pub top_sectors: Vec<SectorProfitLossData>,
    pub bottom_sectors: Vec<SectorProfitLossData>,
    pub sectors: Vec<SectorProfitLossData>,
    pub trends: Vec<TrendSeriesData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodData {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetOverview {
    pub name: String,
    pub headers: Vec<String>,
    pub row_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_period: Option<PeriodData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkbookInspectData {
    pub path: String,
    pub sheets: Vec<SheetOverview>,
}
