use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

/// One spreadsheet sales row. Flight number and amount are numeric cells and
/// the travel date is a formatted Excel date cell, as in a real export.
pub struct XlsxSale<'a> {
    pub passenger_type: &'a str,
    pub sector: &'a str,
    pub flight_number: f64,
    pub amount: f64,
    pub travel_date: (u16, u8, u8),
}

pub fn xlsx_sale<'a>(
    sector: &'a str,
    flight_number: f64,
    amount: f64,
    travel_date: (u16, u8, u8),
) -> XlsxSale<'a> {
    XlsxSale {
        passenger_type: "adult",
        sector,
        flight_number,
        amount,
        travel_date,
    }
}

/// Writes a sales `.xlsx` with one worksheet per `(name, rows)` entry, plus a
/// trailing `Notes` sheet that has no travel-date column.
pub fn write_sales_xlsx(
    dir: &Path,
    name: &str,
    sheets: &[(&str, &[XlsxSale<'_>])],
) -> Result<PathBuf, XlsxError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (sheet_name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*sheet_name)?;
        for (col, header) in ["SL NO", "Type", "Sector", "FlightNumber", "Amount", "TravelDate"]
            .iter()
            .enumerate()
        {
            worksheet.write_string(0, col as u16, *header)?;
        }
        for (index, row) in rows.iter().enumerate() {
            let line = index as u32 + 1;
            let (year, month, day) = row.travel_date;
            let date = ExcelDateTime::from_ymd(year, month, day)?;
            worksheet.write_number(line, 0, f64::from(line))?;
            worksheet.write_string(line, 1, row.passenger_type)?;
            worksheet.write_string(line, 2, row.sector)?;
            worksheet.write_number(line, 3, row.flight_number)?;
            worksheet.write_number(line, 4, row.amount)?;
            worksheet.write_datetime_with_format(line, 5, &date, &date_format)?;
        }
    }

    let notes = workbook.add_worksheet();
    notes.set_name("Notes")?;
    notes.write_string(0, 0, "Remark")?;
    notes.write_string(1, 0, "exported from the booking system")?;

    let path = dir.join(name);
    workbook.save(&path)?;
    Ok(path)
}

/// Writes a base price `.xlsx` whose worksheets are named by price period and
/// kept in the given order.
pub fn write_base_prices_xlsx(
    dir: &Path,
    name: &str,
    tables: &[(&str, &[(&str, f64)])],
) -> Result<PathBuf, XlsxError> {
    let mut workbook = Workbook::new();
    for (label, rows) in tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*label)?;
        worksheet.write_string(0, 0, "Sector")?;
        worksheet.write_string(0, 1, "Base")?;
        for (index, (sector, base)) in rows.iter().enumerate() {
            let line = index as u32 + 1;
            worksheet.write_string(line, 0, *sector)?;
            worksheet.write_number(line, 1, *base)?;
        }
    }

    let path = dir.join(name);
    workbook.save(&path)?;
    Ok(path)
}
