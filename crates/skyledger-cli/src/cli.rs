use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use skyledger_client::config::parse_top_n;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_top(value: &str) -> Result<usize, String> {
    parse_top_n(value)
}

/// Extended help shown after `skyledger pl report --help` and
/// `skyledger pl analytics --help`.
pub const PROFIT_LOSS_AFTER_HELP: &str = "\
Inputs:
  --sales <path>       Sales workbook. Every sheet with a `TravelDate` column
                       must also carry `Sector`, `FlightNumber` and `Amount`.
                       Rows whose `Type` is infant or child are left out.
  --base-price <path>  Base price workbook. Each sheet is named
                       `<start>_<end>` (for example `2024-03-01_2024-03-31`)
                       and carries `Sector` and `Base` columns.

  A workbook is an .xlsx, .xls, .xlsb or .ods file, a single .csv file,
  or a directory of .csv files read as sheets in file-name order.

How rows are priced:
  Only sales rows travelling between --from and --to are used. The first
  base price sheet whose period overlaps that window is the price list for
  every row; rows whose sector it does not list are left out.

Environment:
  SKYLEDGER_TOP_N      Default for --top (5).
  SKYLEDGER_CURRENCY   Currency symbol used in text output (₹).
  SKYLEDGER_LOG        Log filter written to stderr (warn).
";

#[derive(Debug, Parser)]
#[command(
    name = "skyledger",
    version,
    about = "airline sales, seat inventory and profit/loss reports",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report sold and unsold seats per flight and sector from an inventory workbook
    Inventory {
        /// Path to the inventory workbook
        path: Option<String>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Reconcile sales against base prices for a travel date window
    #[command(arg_required_else_help = true)]
    Pl {
        #[command(subcommand)]
        command: PlCommand,
    },
    /// Look inside a workbook before reporting on it
    #[command(arg_required_else_help = true)]
    Workbook {
        #[command(subcommand)]
        command: WorkbookCommand,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ProfitLossArgs {
    /// Path to the sales workbook
    #[arg(long)]
    pub sales: Option<String>,
    /// Path to the base price workbook
    #[arg(long = "base-price")]
    pub base_price: Option<String>,
    /// First travel date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub from: Option<IsoDate>,
    /// Last travel date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub to: Option<IsoDate>,
    /// Emit structured JSON object output for machine parsing
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PlCommand {
    /// List every priced sales row with its profit or loss, plus sector totals
    #[command(after_long_help = PROFIT_LOSS_AFTER_HELP)]
    Report {
        #[command(flatten)]
        args: ProfitLossArgs,
    },
    /// Show KPIs, best and worst sectors, and per-sector trends
    #[command(after_long_help = PROFIT_LOSS_AFTER_HELP)]
    Analytics {
        #[command(flatten)]
        args: ProfitLossArgs,
        /// How many sectors to rank at each end
        #[arg(long, value_parser = parse_top)]
        top: Option<usize>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum WorkbookCommand {
    /// List sheets, headers, row counts and base price periods
    Inspect {
        /// Path to the workbook
        path: String,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
