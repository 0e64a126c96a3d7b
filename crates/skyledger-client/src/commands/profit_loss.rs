use std::path::PathBuf;

use crate::ClientResult;
use crate::commands::common::{display_path, profit_loss_summary, sector_rows};
use crate::config::ReportSettings;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    KpiData, ProfitLossAnalyticsData, ProfitLossReportData, ReconciledRowData, TrendPointData,
    TrendSeriesData,
};
use crate::dates::{build_window, format_iso_date};
use crate::reconcile::engine::first_eligible_table;
use crate::reconcile::{aggregate, bottom_sectors, derive_kpis, sector_trends, top_sectors};
use crate::session::{ReportInputs, ReportSession};
use crate::workbook::WorkbookRole;

/// Which rendering of the shared reconciliation to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitLossView {
    Report,
    Analytics,
}

impl ProfitLossView {
    pub const fn command(self) -> &'static str {
        match self {
            Self::Report => "pl report",
            Self::Analytics => "pl analytics",
        }
    }
}

#[derive(Debug)]
pub struct ProfitLossRunOptions {
    pub view: ProfitLossView,
    pub sales: Option<String>,
    pub base_price: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub top_n: Option<usize>,
    /// Settings to use instead of reading the environment.
    pub settings: Option<ReportSettings>,
}

impl ProfitLossRunOptions {
    pub fn new(view: ProfitLossView) -> Self {
        Self {
            view,
            sales: None,
            base_price: None,
            from: None,
            to: None,
            top_n: None,
            settings: None,
        }
    }
}

pub fn report(
    sales: Option<&str>,
    base_price: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ProfitLossRunOptions {
        sales: sales.map(std::string::ToString::to_string),
        base_price: base_price.map(std::string::ToString::to_string),
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        ..ProfitLossRunOptions::new(ProfitLossView::Report)
    })
}

pub fn analytics(
    sales: Option<&str>,
    base_price: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    top_n: Option<usize>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ProfitLossRunOptions {
        sales: sales.map(std::string::ToString::to_string),
        base_price: base_price.map(std::string::ToString::to_string),
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        top_n,
        ..ProfitLossRunOptions::new(ProfitLossView::Analytics)
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ProfitLossRunOptions) -> ClientResult<SuccessEnvelope> {
    let settings = match options.settings {
        Some(settings) => settings,
        None => ReportSettings::from_env()?,
    }
    .with_top_n(options.top_n);

    let mut session = ReportSession::new(
        ReportInputs {
            inventory: None,
            sales: options.sales.map(PathBuf::from),
            base_price: options.base_price.map(PathBuf::from),
        },
        settings,
    );
    run_in_session(
        &mut session,
        options.view,
        options.from.as_deref(),
        options.to.as_deref(),
    )
}

/// Both views reconcile through the session, so asking for the report and
/// then the analytics over the same inputs reads each workbook once.
pub fn run_in_session(
    session: &mut ReportSession,
    view: ProfitLossView,
    from: Option<&str>,
    to: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    let command = view.command();
    session
        .inputs()
        .require(&[WorkbookRole::Sales, WorkbookRole::BasePrice], command)?;
    let window = build_window(from, to, command)?;

    let outcome = session.reconcile(window, command)?;
    let sales = session.sales_extraction(command)?;
    let tables = session.base_price_tables(command)?;
    let base_table = first_eligible_table(&tables, window).map(|table| table.label.as_str());

    let aggregates = aggregate(&outcome.records);
    let summary = profit_loss_summary(&sales, &outcome, base_table);
    let from = format_iso_date(&window.start);
    let to = format_iso_date(&window.end);
    let sales_path = display_path(session.inputs().sales.as_deref());
    let base_price_path = display_path(session.inputs().base_price.as_deref());

    match view {
        ProfitLossView::Report => {
            let data = ProfitLossReportData {
                from,
                to,
                sales_path,
                base_price_path,
                summary,
                rows: outcome
                    .records
                    .iter()
                    .map(|record| ReconciledRowData {
                        sector: record.sector.clone(),
                        date: format_iso_date(&record.date),
                        flight_number: record.flight_number.clone(),
                        amount: record.amount,
                        base: record.base,
                        profit_loss: record.profit_loss,
                    })
                    .collect(),
                sectors: sector_rows(&aggregates),
            };
            success(command, data)
        }
        ProfitLossView::Analytics => {
            let settings = session.settings();
            let kpis = derive_kpis(&aggregates, &outcome.records);
            let data = ProfitLossAnalyticsData {
                from,
                to,
                sales_path,
                base_price_path,
                summary,
                kpis: KpiData {
                    currency_symbol: settings.currency_symbol.clone(),
                    total_sales: kpis.total_sales,
                    total_profit: kpis.total_profit,
                    average_profit: kpis.average_profit,
                    flight_count: kpis.flight_count,
                    sector_count: kpis.sector_count,
                },
                top_n: settings.top_n,
                top_sectors: sector_rows(&top_sectors(&aggregates, settings.top_n)),
                bottom_sectors: sector_rows(&bottom_sectors(&aggregates, settings.top_n)),
                sectors: sector_rows(&aggregates),
                trends: sector_trends(&outcome.records)
                    .into_iter()
                    .map(|trend| TrendSeriesData {
                        sector: trend.sector,
                        points: trend
                            .points
                            .iter()
                            .map(|point| TrendPointData {
                                date: format_iso_date(&point.date),
                                profit_loss: point.profit_loss,
                            })
                            .collect(),
                    })
                    .collect(),
            };
            success(command, data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfitLossRunOptions, ProfitLossView, run_with_options};
    use crate::config::ReportSettings;

    #[test]
    fn view_names_the_command() {
        assert_eq!(ProfitLossView::Report.command(), "pl report");
        assert_eq!(ProfitLossView::Analytics.command(), "pl analytics");
    }

    #[test]
    fn missing_workbooks_are_reported_before_dates_are_checked() {
        let result = run_with_options(ProfitLossRunOptions {
            from: Some("not-a-date".to_string()),
            settings: Some(ReportSettings::default()),
            ..ProfitLossRunOptions::new(ProfitLossView::Analytics)
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "missing_input");
            assert!(error.message.contains("sales"));
            assert!(error.message.contains("base price"));
        }
    }
}
