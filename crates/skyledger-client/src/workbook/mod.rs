pub mod cell;
pub(crate) mod loader;

use std::path::PathBuf;

pub use cell::Cell;
pub use loader::load_workbook;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum WorkbookRole {
    Inventory,
    Sales,
    BasePrice,
}

impl WorkbookRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Sales => "sales",
            Self::BasePrice => "base price",
        }
    }
}

/// A named table whose first row supplied the headers.
///
/// Every row is padded or truncated to `headers.len()` cells at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: &str, headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|value| value == header)
    }

    pub fn has_column(&self, header: &str) -> bool {
        self.column_index(header).is_some()
    }

    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|header| !self.has_column(header))
            .map(|header| header.to_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes the named columns that exist; unknown names are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let mut doomed = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect::<Vec<usize>>();
        if doomed.is_empty() {
            return;
        }
        doomed.sort_unstable();
        doomed.dedup();

        for index in doomed.into_iter().rev() {
            self.headers.remove(index);
            for row in &mut self.rows {
                row.remove(index);
            }
        }
    }

    pub fn column_values<'a>(&'a self, header: &str) -> impl Iterator<Item = &'a Cell> + 'a {
        let index = self.column_index(header);
        self.rows
            .iter()
            .filter_map(move |row| index.and_then(|value| row.get(value)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub source: PathBuf,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Sheet};

    fn text(value: &str) -> Cell {
        Cell::from_text(value)
    }

    #[test]
    fn rows_are_padded_to_header_width() {
        let sheet = Sheet::new(
            "sales",
            vec!["Sector".to_string(), "Amount".to_string()],
            vec![vec![text("DELBOM")]],
        );
        assert_eq!(sheet.rows[0].len(), 2);
        assert!(sheet.rows[0][1].is_empty());
    }

    #[test]
    fn drop_columns_ignores_absent_names_and_keeps_alignment() {
        let mut sheet = Sheet::new(
            "sales",
            vec![
                "PNR".to_string(),
                "Sector".to_string(),
                "Title".to_string(),
                "Amount".to_string(),
            ],
            vec![vec![text("X1"), text("DELBOM"), text("Mr"), text("5000")]],
        );
        sheet.drop_columns(&["Title", "PNR", "DOB"]);

        assert_eq!(sheet.headers, vec!["Sector".to_string(), "Amount".to_string()]);
        assert_eq!(sheet.rows[0], vec![text("DELBOM"), text("5000")]);
    }

    #[test]
    fn missing_columns_lists_required_headers_in_order() {
        let sheet = Sheet::new("sales", vec!["Amount".to_string()], Vec::new());
        assert_eq!(
            sheet.missing_columns(&["Sector", "Amount", "TravelDate"]),
            vec!["Sector".to_string(), "TravelDate".to_string()]
        );
    }
}
