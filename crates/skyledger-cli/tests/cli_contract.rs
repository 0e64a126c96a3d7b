use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tempfile::{Builder, TempDir};

struct CliOutput {
    code: Option<i32>,
    stdout: String,
}

fn run_cli(args: &[&str]) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_skyledger"))
        .args(args)
        .env_remove("SKYLEDGER_TOP_N")
        .env_remove("SKYLEDGER_CURRENCY")
        .env("SKYLEDGER_LOG", "off")
        .env("COLUMNS", "160")
        .output();
    assert!(output.is_ok());
    match output {
        Ok(value) => CliOutput {
            code: value.status.code(),
            stdout: String::from_utf8_lossy(&value.stdout).to_string(),
        },
        Err(_) => CliOutput {
            code: None,
            stdout: String::new(),
        },
    }
}

fn parse_json(text: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(text);
    assert!(parsed.is_ok(), "stdout was not JSON: {text}");
    parsed.unwrap_or(Value::Null)
}

struct Fixture {
    _dir: TempDir,
    sales: PathBuf,
    base: PathBuf,
    inventory: PathBuf,
}

fn fixture() -> Option<Fixture> {
    let dir = Builder::new().prefix("skyledger-cli").tempdir().ok()?;
    let sales = dir.path().join("sales.csv");
    fs::write(
        &sales,
        "SL NO,Type,Sector,FlightNumber,Amount,TravelDate\n\
         1,Adult,DEL-BOM,6102,5000,2024-03-10\n\
         2,Adult,BOM-DEL,6103,3800,2024-03-11\n\
         3,infant,DEL-BOM,6102,1500,2024-03-10\n\
         4,Adult,DEL-BOM,6104,4500,2024-04-02\n",
    )
    .ok()?;

    let base = dir.path().join("base");
    fs::create_dir_all(&base).ok()?;
    fs::write(
        base.join("2024-03-01_2024-03-31.csv"),
        "Sector,Base\nDELBOM,4000\nBOMDEL,4000\n",
    )
    .ok()?;

    let inventory = dir.path().join("inventory.csv");
    fs::write(
        &inventory,
        "Flight Number,Sector,Dep Date,Current Seat,Total Seat\n\
         QP-1401,BOM-DEL,2024-03-10,45,180\n",
    )
    .ok()?;

    Some(Fixture {
        _dir: dir,
        sales,
        base,
        inventory,
    })
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn top_level_help_lists_every_command() {
    let output = run_cli(&["--help"]);
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("skyledger inventory <path>"));
    assert!(output.stdout.contains("skyledger pl report"));
    assert!(output.stdout.contains("skyledger pl analytics"));
    assert!(output.stdout.contains("skyledger workbook inspect <path>"));
}

#[test]
fn pl_report_json_prints_the_success_envelope() {
    let fixture = fixture();
    assert!(fixture.is_some());
    if let Some(fixture) = fixture {
        let sales = path_arg(&fixture.sales);
        let base = path_arg(&fixture.base);
        let output = run_cli(&[
            "pl",
            "report",
            "--sales",
            &sales,
            "--base-price",
            &base,
            "--from",
            "2024-03-01",
            "--to",
            "2024-03-31",
            "--json",
        ]);

        assert_eq!(output.code, Some(0));
        let value = parse_json(&output.stdout);
        assert_eq!(value["ok"], true);
        assert_eq!(value["command"], "pl report");
        assert_eq!(value["data"]["summary"]["rows_in_window"], 2);
        let rows = value["data"]["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["sector"], "DELBOM");
        assert_eq!(rows[0]["profit_loss"].as_f64(), Some(1000.0));
        assert_eq!(rows[1]["sector"], "BOMDEL");
        assert_eq!(rows[1]["profit_loss"].as_f64(), Some(-200.0));
    }
}

#[test]
fn pl_analytics_text_shows_kpis_in_the_configured_currency() {
    let fixture = fixture();
    assert!(fixture.is_some());
    if let Some(fixture) = fixture {
        let sales = path_arg(&fixture.sales);
        let base = path_arg(&fixture.base);
        let output = Command::new(env!("CARGO_BIN_EXE_skyledger"))
            .args([
                "pl",
                "analytics",
                "--sales",
                &sales,
                "--base-price",
                &base,
                "--from",
                "2024-03-01",
                "--to",
                "2024-03-31",
                "--top",
                "1",
            ])
            .env("SKYLEDGER_CURRENCY", "Rs ")
            .env_remove("SKYLEDGER_TOP_N")
            .env("SKYLEDGER_LOG", "off")
            .output();
        assert!(output.is_ok());
        if let Ok(output) = output {
            let stdout = String::from_utf8_lossy(&output.stdout);
            assert_eq!(output.status.code(), Some(0));
            assert!(stdout.contains("Rs8,800.00"));
            assert!(stdout.contains("Top 1 sectors by profit/loss:"));
            assert!(stdout.contains("Trend by sector:"));
        }
    }
}

#[test]
fn missing_base_price_is_a_user_error_with_recovery_steps() {
    let fixture = fixture();
    assert!(fixture.is_some());
    if let Some(fixture) = fixture {
        let sales = path_arg(&fixture.sales);
        let output = run_cli(&[
            "pl",
            "report",
            "--sales",
            &sales,
            "--from",
            "2024-03-01",
            "--to",
            "2024-03-31",
            "--json",
        ]);

        assert_eq!(output.code, Some(1));
        let value = parse_json(&output.stdout);
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"]["code"], "missing_input");
        assert_eq!(value["data"]["missing"][0], "base price");
    }
}

#[test]
fn reversed_dates_render_the_text_error_block() {
    let fixture = fixture();
    assert!(fixture.is_some());
    if let Some(fixture) = fixture {
        let sales = path_arg(&fixture.sales);
        let base = path_arg(&fixture.base);
        let output = run_cli(&[
            "pl",
            "report",
            "--sales",
            &sales,
            "--base-price",
            &base,
            "--from",
            "2024-03-31",
            "--to",
            "2024-03-01",
        ]);

        assert_eq!(output.code, Some(1));
        assert!(output.stdout.contains("  Error:    invalid_date_range"));
        assert!(output.stdout.contains("What to do next:"));
    }
}

#[test]
fn malformed_date_is_an_invalid_argument_for_the_subcommand() {
    let output = run_cli(&["pl", "analytics", "--from", "03/01/2024", "--json"]);
    assert_eq!(output.code, Some(1));
    let value = parse_json(&output.stdout);
    assert_eq!(value["error"]["code"], "invalid_argument");
    let steps = value["error"]["recovery_steps"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    assert!(
        steps
            .iter()
            .any(|step| step.as_str() == Some("Run `skyledger pl analytics --help` for usage."))
    );
}

#[test]
fn inventory_text_and_workbook_inspect_render() {
    let fixture = fixture();
    assert!(fixture.is_some());
    if let Some(fixture) = fixture {
        let inventory = path_arg(&fixture.inventory);
        let output = run_cli(&["inventory", &inventory]);
        assert_eq!(output.code, Some(0));
        assert!(output.stdout.contains("Seat inventory from"));
        assert!(output.stdout.contains("BOMDEL"));
        assert!(output.stdout.contains("75.0% (high)"));

        let base = path_arg(&fixture.base);
        let output = run_cli(&["workbook", "inspect", &base, "--json"]);
        assert_eq!(output.code, Some(0));
        let value = parse_json(&output.stdout);
        assert_eq!(value["data"]["sheets"][0]["name"], "2024-03-01_2024-03-31");
        assert_eq!(
            value["data"]["sheets"][0]["price_period"]["start"],
            "2024-03-01"
        );
    }
}
