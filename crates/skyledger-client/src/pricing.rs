use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::dates::parse_lenient_date;
use crate::workbook::{Cell, Sheet};

const SECTOR_COLUMN: &str = "Sector";
const BASE_COLUMN: &str = "Base";

/// Validity period parsed from a `"<start>_<end>"` sheet name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PricePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasePriceRow {
    pub sector: String,
    pub base: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasePriceTable {
    pub label: String,
    pub period: Option<PricePeriod>,
    pub rows: Vec<BasePriceRow>,
}

impl BasePriceTable {
    pub fn new(label: &str, rows: Vec<BasePriceRow>) -> Self {
        Self {
            label: label.to_string(),
            period: parse_period_label(label),
            rows,
        }
    }

    /// Builds a table from one base-price sheet.
    ///
    /// A sheet without `Sector` and `Base` columns yields a table with no
    /// rows, so lookups against it simply miss.
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let (Some(sector_index), Some(base_index)) = (
            sheet.column_index(SECTOR_COLUMN),
            sheet.column_index(BASE_COLUMN),
        ) else {
            if parse_period_label(&sheet.name).is_some() {
                warn!(
                    sheet = %sheet.name,
                    "base price sheet has no Sector/Base columns; every lookup against it will miss"
                );
            }
            return Self::new(&sheet.name, Vec::new());
        };

        let rows = sheet
            .rows
            .iter()
            .filter_map(|row| {
                let sector = row.get(sector_index).and_then(Cell::as_text)?;
                Some(BasePriceRow {
                    sector,
                    base: row.get(base_index).and_then(Cell::as_number),
                })
            })
            .collect();

        Self::new(&sheet.name, rows)
    }

    /// Base of the first row whose sector matches exactly.
    ///
    /// A matching row with an unreadable base still ends the search.
    pub fn base_for(&self, sector: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.sector == sector)
            .and_then(|row| row.base)
    }
}

pub fn tables_from_sheets(sheets: &[Sheet]) -> Vec<BasePriceTable> {
    let tables = sheets
        .iter()
        .map(BasePriceTable::from_sheet)
        .collect::<Vec<BasePriceTable>>();
    let unlabelled = tables.iter().filter(|table| table.period.is_none()).count();
    if unlabelled > 0 {
        debug!(
            unlabelled,
            "base price sheets without a <start>_<end> name are ignored"
        );
    }
    tables
}

/// Splits on `_`; anything other than exactly two date parts is no period.
pub fn parse_period_label(label: &str) -> Option<PricePeriod> {
    let parts = label.split('_').collect::<Vec<&str>>();
    let [start, end] = parts.as_slice() else {
        return None;
    };
    Some(PricePeriod {
        start: parse_lenient_date(start)?,
        end: parse_lenient_date(end)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{BasePriceTable, parse_period_label};
    use crate::workbook::{Cell, Sheet};

    #[test]
    fn period_labels_need_exactly_two_date_parts() {
        let parsed = parse_period_label("2024-03-01_2024-03-31");
        assert!(parsed.is_some());
        if let Some(period) = parsed {
            assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default());
            assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap_or_default());
        }

        assert!(parse_period_label("Sheet1").is_none());
        assert!(parse_period_label("2024-03-01_2024-03-31_v2").is_none());
        assert!(parse_period_label("2024-03-01_later").is_none());
        assert!(parse_period_label("2024-03-01-2024-03-31").is_none());
    }

    #[test]
    fn lookup_uses_first_exact_sector_match() {
        let sheet = Sheet::new(
            "2024-03-01_2024-03-31",
            vec!["Sector".to_string(), "Base".to_string()],
            vec![
                vec![Cell::from_text("DELBOM"), Cell::Number(4000.0)],
                vec![Cell::from_text("DELBOM"), Cell::Number(9999.0)],
                vec![Cell::from_text("DEL-BLR"), Cell::Number(3000.0)],
            ],
        );

        let table = BasePriceTable::from_sheet(&sheet);
        assert_eq!(table.base_for("DELBOM"), Some(4000.0));
        assert_eq!(table.base_for("DELBLR"), None);
        assert_eq!(table.base_for("delbom"), None);
    }

    #[test]
    fn matching_row_with_unreadable_base_is_unresolved() {
        let sheet = Sheet::new(
            "2024-03-01_2024-03-31",
            vec!["Sector".to_string(), "Base".to_string()],
            vec![
                vec![Cell::from_text("DELBOM"), Cell::from_text("TBD")],
                vec![Cell::from_text("DELBOM"), Cell::Number(4000.0)],
            ],
        );
        let table = BasePriceTable::from_sheet(&sheet);
        assert_eq!(table.base_for("DELBOM"), None);
    }

    #[test]
    fn sheet_without_base_column_has_no_rows() {
        let sheet = Sheet::new(
            "2024-03-01_2024-03-31",
            vec!["Sector".to_string(), "Fare".to_string()],
            vec![vec![Cell::from_text("DELBOM"), Cell::Number(4000.0)]],
        );
        let table = BasePriceTable::from_sheet(&sheet);
        assert!(table.period.is_some());
        assert!(table.rows.is_empty());
    }
}
