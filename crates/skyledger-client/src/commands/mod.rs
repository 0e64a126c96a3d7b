mod common;
pub mod inventory;
pub mod profit_loss;
pub mod workbook;
