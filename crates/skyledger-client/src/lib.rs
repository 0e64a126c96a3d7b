pub mod commands;
pub mod config;
pub mod contracts;
pub mod dates;
pub mod error;
pub mod inventory;
pub mod pricing;
pub mod reconcile;
pub mod sales;
pub mod session;
pub mod workbook;

pub use config::ReportSettings;
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use dates::DateWindow;
pub use error::{ClientError, ClientResult};
pub use reconcile::{aggregate, bottom_sectors, derive_kpis, reconcile, top_sectors};
pub use sales::normalize_sales_sheets;
pub use session::{ReportInputs, ReportSession};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
