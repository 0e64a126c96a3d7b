use crate::sales::normalize::DEFAULT_EXCLUDED_PASSENGER_TYPES;
use crate::{ClientError, ClientResult};

pub const TOP_N_ENV: &str = "SKYLEDGER_TOP_N";
pub const CURRENCY_ENV: &str = "SKYLEDGER_CURRENCY";

const DEFAULT_TOP_N: usize = 5;
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub top_n: usize,
    pub excluded_passenger_types: Vec<String>,
    pub currency_symbol: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            excluded_passenger_types: DEFAULT_EXCLUDED_PASSENGER_TYPES
                .iter()
                .map(|value| value.to_string())
                .collect(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl ReportSettings {
    /// Defaults overridden by `SKYLEDGER_TOP_N` and `SKYLEDGER_CURRENCY`.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(TOP_N_ENV)
            && !raw.trim().is_empty()
        {
            settings.top_n = parse_top_n(raw.trim()).map_err(|message| {
                ClientError::invalid_argument_with_recovery(
                    &format!("`{TOP_N_ENV}` {message}"),
                    vec![format!("Unset `{TOP_N_ENV}` or set it to a number such as 5.")],
                )
            })?;
        }

        if let Some(raw) = lookup(CURRENCY_ENV)
            && !raw.trim().is_empty()
        {
            settings.currency_symbol = raw.trim().to_string();
        }

        Ok(settings)
    }

    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        if let Some(value) = top_n {
            self.top_n = value;
        }
        self
    }
}

pub fn parse_top_n(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err("must be a whole number greater than zero".to_string()),
    }
}
