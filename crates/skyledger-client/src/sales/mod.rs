pub mod normalize;
pub mod records;

use chrono::NaiveDate;

pub use normalize::normalize_sales_sheets;
pub use records::{SalesExtraction, extract_sales_sheets};

pub(crate) const TYPE_COLUMN: &str = "Type";
pub(crate) const SECTOR_COLUMN: &str = "Sector";
pub(crate) const TRAVEL_DATE_COLUMN: &str = "TravelDate";
pub(crate) const FLIGHT_NUMBER_COLUMN: &str = "FlightNumber";
pub(crate) const AMOUNT_COLUMN: &str = "Amount";

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub sector: String,
    pub flight_number: String,
    pub amount: f64,
    pub travel_date: NaiveDate,
}

/// Records of one sales sheet that carries a travel-date column.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSheet {
    pub name: String,
    pub records: Vec<SalesRecord>,
}
