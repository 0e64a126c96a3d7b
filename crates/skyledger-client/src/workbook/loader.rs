use std::fs;
use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Reader, open_workbook_auto};
use tracing::{debug, warn};

use crate::workbook::{Cell, Sheet, Workbook};
use crate::{ClientError, ClientResult};

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads every sheet of a workbook. `role` names the workbook in errors.
///
/// A directory is read as a workbook of `.csv` sheets ordered by file name,
/// and a single `.csv` file as a one-sheet workbook named after its stem.
pub fn load_workbook(path: &Path, role: &str) -> ClientResult<Workbook> {
    let metadata = fs::metadata(path).map_err(|error| {
        ClientError::workbook_load_failed(role, path, &error.to_string())
    })?;

    let sheets = if metadata.is_dir() {
        load_csv_directory(path, role)?
    } else if has_extension(path, "csv") {
        vec![load_csv_sheet(path, role)?]
    } else if SPREADSHEET_EXTENSIONS
        .iter()
        .any(|extension| has_extension(path, extension))
    {
        load_spreadsheet(path, role)?
    } else {
        return Err(ClientError::workbook_load_failed(
            role,
            path,
            "unsupported file type",
        ));
    };

    debug!(
        role,
        path = %path.display(),
        sheets = sheets.len(),
        "loaded workbook"
    );

    Ok(Workbook {
        source: path.to_path_buf(),
        sheets,
    })
}

/// Files the loader would read for `path`, in sheet order.
pub(crate) fn workbook_files(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = fs::read_dir(path)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|candidate| candidate.is_file() && has_extension(candidate, "csv"))
        .collect::<Vec<PathBuf>>();
    files.sort();
    Ok(files)
}

fn load_spreadsheet(path: &Path, role: &str) -> ClientResult<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path).map_err(|error| {
        ClientError::workbook_load_failed(role, path, &error.to_string())
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names().to_vec() {
        let range = workbook.worksheet_range(&name).map_err(|error| {
            ClientError::workbook_load_failed(
                role,
                path,
                &format!("sheet `{name}`: {error}"),
            )
        })?;

        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|row| row.iter().map(header_from_data).collect::<Vec<String>>())
            .unwrap_or_default();
        let body = rows
            .map(|row| row.iter().map(cell_from_data).collect::<Vec<Cell>>())
            .collect::<Vec<Vec<Cell>>>();

        sheets.push(Sheet::new(&name, headers, body));
    }

    Ok(sheets)
}

fn load_csv_directory(path: &Path, role: &str) -> ClientResult<Vec<Sheet>> {
    let files = workbook_files(path).map_err(|error| {
        ClientError::workbook_load_failed(role, path, &error.to_string())
    })?;
    if files.is_empty() {
        return Err(ClientError::workbook_load_failed(
            role,
            path,
            "directory contains no .csv sheets",
        ));
    }

    files
        .iter()
        .map(|file| load_csv_sheet(file, role))
        .collect()
}

fn load_csv_sheet(path: &Path, role: &str) -> ClientResult<Sheet> {
    let fail = |detail: &str| ClientError::workbook_load_failed(role, path, detail);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| fail(&error.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|_| fail("CSV header row is missing or unreadable"))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|_| fail("CSV rows are malformed or not UTF-8"))?;
        rows.push(record.iter().map(Cell::from_text).collect::<Vec<Cell>>());
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Sheet::new(&name, headers, rows))
}

fn header_from_data(value: &Data) -> String {
    cell_from_data(value)
        .as_text()
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

fn cell_from_data(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::from_text(text),
        Data::Float(number) => Cell::Number(*number),
        Data::Int(number) => Cell::Number(*number as f64),
        Data::Bool(flag) => Cell::Text(flag.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => match value.as_date() {
            Some(date) => Cell::Date(date),
            None => Cell::Empty,
        },
        Data::DurationIso(text) => Cell::Text(text.clone()),
        Data::Error(kind) => {
            warn!(error = ?kind, "spreadsheet cell holds an error value; reading it as empty");
            Cell::Empty
        }
    }
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .map(|extension| extension.to_string_lossy().eq_ignore_ascii_case(expected))
        .unwrap_or(false)
}
