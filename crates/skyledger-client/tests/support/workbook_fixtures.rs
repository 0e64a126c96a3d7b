use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use skyledger_client::{ClientResult, SuccessEnvelope};
use tempfile::{Builder, TempDir};

pub struct SalesRow<'a> {
    pub passenger_type: &'a str,
    pub sector: &'a str,
    pub flight_number: &'a str,
    pub amount: &'a str,
    pub travel_date: &'a str,
}

pub fn sale<'a>(
    sector: &'a str,
    flight_number: &'a str,
    amount: &'a str,
    travel_date: &'a str,
) -> SalesRow<'a> {
    SalesRow {
        passenger_type: "Adult",
        sector,
        flight_number,
        amount,
        travel_date,
    }
}

pub fn temp_dir(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir()
}

/// Writes a one-sheet sales workbook carrying a few of the export's
/// irrelevant columns alongside the ones reports read.
pub fn write_sales(dir: &Path, name: &str, rows: &[SalesRow<'_>]) -> std::io::Result<PathBuf> {
    let mut body = String::from("SL NO,Type,Sector,FlightNumber,Amount,TravelDate,PNR\n");
    for (index, row) in rows.iter().enumerate() {
        body.push_str(&format!(
            "{},{},{},{},{},{},PNR{}\n",
            index + 1,
            row.passenger_type,
            row.sector,
            row.flight_number,
            row.amount,
            row.travel_date,
            index + 1
        ));
    }
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

/// Writes a base price workbook as a directory with one `.csv` sheet per
/// label. Sheet order follows the labels' file-name order.
pub fn write_base_prices(
    dir: &Path,
    name: &str,
    tables: &[(&str, &[(&str, &str)])],
) -> std::io::Result<PathBuf> {
    let workbook = dir.join(name);
    fs::create_dir_all(&workbook)?;
    for (label, rows) in tables {
        let mut body = String::from("Sector,Base\n");
        for (sector, base) in rows.iter() {
            body.push_str(&format!("{sector},{base}\n"));
        }
        fs::write(workbook.join(format!("{label}.csv")), body)?;
    }
    Ok(workbook)
}

/// Rows are `(flight number, sector, departure date, current seat, total seat)`.
pub fn write_inventory(
    dir: &Path,
    name: &str,
    rows: &[(&str, &str, &str, &str, &str)],
) -> std::io::Result<PathBuf> {
    let mut body = String::from(
        "DayWise Id,Flight Number,Sector,Dep Date,Dep Time,Current Seat,Total Seat,Series Owner\n",
    );
    for (index, (flight, sector, date, current, total)) in rows.iter().enumerate() {
        body.push_str(&format!(
            "{},{flight},{sector},{date},06:00,{current},{total},Agent\n",
            index + 1
        ));
    }
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}
