use chrono::NaiveDate;

use crate::dates::{format_iso_date, parse_lenient_date};

const MAX_COUNT: f64 = u32::MAX as f64;

/// One sheet cell, typed as far as the source format allows.
///
/// CSV sheets only ever produce `Text` and `Empty`; the accessors coerce text
/// on demand so both sources read the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    pub fn from_text(value: &str) -> Self {
        if value.trim().is_empty() {
            return Self::Empty;
        }
        Self::Text(value.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(value) => Some(value.clone()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Date(value) => Some(format_iso_date(value)),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Text(value) => parse_number(value),
            _ => None,
        }
    }

    /// Whole, non-negative counts such as seat numbers, at most `u32::MAX`.
    pub fn as_count(&self) -> Option<i64> {
        let value = self.as_number()?;
        if value < 0.0 || value.fract() != 0.0 || value > MAX_COUNT {
            return None;
        }
        Some(value as i64)
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(value) => Some(*value),
            Self::Text(value) => parse_lenient_date(value),
            _ => None,
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    let parsed = cleaned.parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::Cell;

    #[test]
    fn whole_numbers_render_without_decimal_point() {
        assert_eq!(Cell::Number(6102.0).as_text(), Some("6102".to_string()));
        assert_eq!(Cell::Number(12.5).as_text(), Some("12.5".to_string()));
    }

    #[test]
    fn text_numbers_accept_thousands_separators() {
        assert_eq!(Cell::from_text(" 4,500.50 ").as_number(), Some(4500.5));
        assert_eq!(Cell::from_text("n/a").as_number(), None);
    }

    #[test]
    fn counts_reject_fractions_and_negatives() {
        assert_eq!(Cell::Number(180.0).as_count(), Some(180));
        assert_eq!(Cell::Number(180.5).as_count(), None);
        assert_eq!(Cell::from_text("-3").as_count(), None);
    }

    #[test]
    fn counts_beyond_u32_range_are_unreadable() {
        assert_eq!(Cell::Number(4_294_967_295.0).as_count(), Some(4_294_967_295));
        assert_eq!(Cell::Number(4_294_967_296.0).as_count(), None);
        assert_eq!(Cell::Number(1e300).as_count(), None);
        assert_eq!(Cell::from_text("99999999999999999999").as_count(), None);
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(Cell::from_text("   ").is_empty());
        assert_eq!(
            Cell::from_text("2024-03-10").as_date(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
    }
}
