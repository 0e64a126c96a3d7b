use chrono::{NaiveDate, NaiveDateTime};

use crate::{ClientError, ClientResult};

/// Inclusive date window selected for a profit/loss report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate, command: &str) -> ClientResult<Self> {
        if start > end {
            return Err(ClientError::invalid_date_range(
                &format_iso_date(&start),
                &format_iso_date(&end),
                command,
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Both ends inclusive: `[start, end]` and the window share at least one day.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}

/// Parses the `--from` / `--to` pair strictly, the way the CLI accepts them.
pub fn build_window(from: Option<&str>, to: Option<&str>, command: &str) -> ClientResult<DateWindow> {
    let Some(from_value) = from else {
        return Err(ClientError::invalid_argument_for_command(
            "A start date is required: pass `--from YYYY-MM-DD`.",
            Some(command),
        ));
    };
    let Some(to_value) = to else {
        return Err(ClientError::invalid_argument_for_command(
            "An end date is required: pass `--to YYYY-MM-DD`.",
            Some(command),
        ));
    };

    let start = parse_iso_date_strict(from_value, "from", command)?;
    let end = parse_iso_date_strict(to_value, "to", command)?;
    DateWindow::new(start, end, command)
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

const LENIENT_DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
];

const LENIENT_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Reads dates as they show up in sheet cells and sheet names.
///
/// ISO dates come first, so `2024-03-01` is never read day-first. Timestamps
/// are truncated to their calendar day.
pub fn parse_lenient_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in LENIENT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in LENIENT_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

fn looks_like_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0usize, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|index| bytes[*index].is_ascii_digit())
}
