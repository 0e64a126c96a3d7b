#![allow(dead_code)]

pub mod workbook_fixtures;
pub mod xlsx_fixtures;
