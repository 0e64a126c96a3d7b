use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use crate::config::ReportSettings;
use crate::dates::DateWindow;
use crate::inventory::{InventoryExtraction, build_inventory_rows};
use crate::pricing::{BasePriceTable, tables_from_sheets};
use crate::reconcile::{ReconcileOutcome, reconcile_with_stats};
use crate::sales::{SalesExtraction, extract_sales_sheets, normalize_sales_sheets};
use crate::workbook::loader::workbook_files;
use crate::workbook::{Workbook, WorkbookRole, load_workbook};
use crate::{ClientError, ClientResult};

/// Workbook paths supplied by the user for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportInputs {
    pub inventory: Option<PathBuf>,
    pub sales: Option<PathBuf>,
    pub base_price: Option<PathBuf>,
}

impl ReportInputs {
    pub fn path_for(&self, role: WorkbookRole) -> Option<&Path> {
        match role {
            WorkbookRole::Inventory => self.inventory.as_deref(),
            WorkbookRole::Sales => self.sales.as_deref(),
            WorkbookRole::BasePrice => self.base_price.as_deref(),
        }
    }

    pub fn require(&self, roles: &[WorkbookRole], command: &str) -> ClientResult<()> {
        let missing = roles
            .iter()
            .filter(|role| self.path_for(**role).is_none())
            .map(|role| role.as_str())
            .collect::<Vec<&str>>();
        if missing.is_empty() {
            return Ok(());
        }
        Err(ClientError::missing_input(&missing, command))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FileStamp {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
}

/// Identity of a workbook on disk: where it is and what its files looked
/// like when read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkbookKey {
    path: PathBuf,
    files: Vec<FileStamp>,
}

type ReconcileKey = (WorkbookKey, WorkbookKey, DateWindow);

/// Session-scoped context owned by the caller.
///
/// Holds the inputs and settings plus memoized intermediate results. Every
/// cache is keyed by input identity, so a changed file on disk is read again
/// while identical requests reuse the earlier result.
#[derive(Debug, Default)]
pub struct ReportSession {
    inputs: ReportInputs,
    settings: ReportSettings,
    workbooks: HashMap<WorkbookKey, Arc<Workbook>>,
    sales: HashMap<WorkbookKey, Arc<SalesExtraction>>,
    base_tables: HashMap<WorkbookKey, Arc<Vec<BasePriceTable>>>,
    reconciliations: HashMap<ReconcileKey, Arc<ReconcileOutcome>>,
    cache_hits: usize,
}

impl ReportSession {
    pub fn new(inputs: ReportInputs, settings: ReportSettings) -> Self {
        Self {
            inputs,
            settings,
            ..Self::default()
        }
    }

    pub fn inputs(&self) -> &ReportInputs {
        &self.inputs
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Number of lookups answered from a cache so far.
    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }

    pub fn workbook(&mut self, role: WorkbookRole, command: &str) -> ClientResult<Arc<Workbook>> {
        let key = self.key_for(role, command)?;
        self.workbook_for_key(role, &key)
    }

    pub fn sales_extraction(&mut self, command: &str) -> ClientResult<Arc<SalesExtraction>> {
        let key = self.key_for(WorkbookRole::Sales, command)?;
        if let Some(cached) = self.sales.get(&key) {
            self.cache_hits += 1;
            return Ok(Arc::clone(cached));
        }

        let workbook = self.workbook_for_key(WorkbookRole::Sales, &key)?;
        let normalized =
            normalize_sales_sheets(&workbook.sheets, &self.settings.excluded_passenger_types);
        let extraction = Arc::new(extract_sales_sheets(&normalized)?);
        self.sales.insert(key, Arc::clone(&extraction));
        Ok(extraction)
    }

    pub fn base_price_tables(&mut self, command: &str) -> ClientResult<Arc<Vec<BasePriceTable>>> {
        let key = self.key_for(WorkbookRole::BasePrice, command)?;
        if let Some(cached) = self.base_tables.get(&key) {
            self.cache_hits += 1;
            return Ok(Arc::clone(cached));
        }

        let workbook = self.workbook_for_key(WorkbookRole::BasePrice, &key)?;
        let tables = Arc::new(tables_from_sheets(&workbook.sheets));
        self.base_tables.insert(key, Arc::clone(&tables));
        Ok(tables)
    }

    pub fn reconcile(
        &mut self,
        window: DateWindow,
        command: &str,
    ) -> ClientResult<Arc<ReconcileOutcome>> {
        self.inputs
            .require(&[WorkbookRole::Sales, WorkbookRole::BasePrice], command)?;
        let key = (
            self.key_for(WorkbookRole::Sales, command)?,
            self.key_for(WorkbookRole::BasePrice, command)?,
            window,
        );
        if let Some(cached) = self.reconciliations.get(&key) {
            self.cache_hits += 1;
            return Ok(Arc::clone(cached));
        }

        let sales = self.sales_extraction(command)?;
        let tables = self.base_price_tables(command)?;
        let outcome = Arc::new(reconcile_with_stats(&sales.sheets, &tables, window));
        self.reconciliations.insert(key, Arc::clone(&outcome));
        Ok(outcome)
    }

    /// Inventory reports read the first sheet only.
    pub fn inventory(&mut self, command: &str) -> ClientResult<InventoryExtraction> {
        let workbook = self.workbook(WorkbookRole::Inventory, command)?;
        let Some(sheet) = workbook.first_sheet() else {
            return Err(ClientError::workbook_load_failed(
                WorkbookRole::Inventory.as_str(),
                &workbook.source,
                "workbook has no sheets",
            ));
        };
        build_inventory_rows(sheet)
    }

    fn key_for(&self, role: WorkbookRole, command: &str) -> ClientResult<WorkbookKey> {
        let Some(path) = self.inputs.path_for(role) else {
            return Err(ClientError::missing_input(&[role.as_str()], command));
        };
        identify(path, role)
    }

    fn workbook_for_key(
        &mut self,
        role: WorkbookRole,
        key: &WorkbookKey,
    ) -> ClientResult<Arc<Workbook>> {
        if let Some(cached) = self.workbooks.get(key) {
            self.cache_hits += 1;
            debug!(role = role.as_str(), path = %key.path.display(), "workbook cache hit");
            return Ok(Arc::clone(cached));
        }

        let workbook = Arc::new(load_workbook(&key.path, role.as_str())?);
        self.workbooks.insert(key.clone(), Arc::clone(&workbook));
        Ok(workbook)
    }
}

fn identify(path: &Path, role: WorkbookRole) -> ClientResult<WorkbookKey> {
    let fail = |error: std::io::Error| {
        ClientError::workbook_load_failed(role.as_str(), path, &error.to_string())
    };

    let canonical = fs::canonicalize(path).map_err(fail)?;
    let files = workbook_files(&canonical)
        .map_err(fail)?
        .into_iter()
        .map(|file| {
            let metadata = fs::metadata(&file)?;
            Ok(FileStamp {
                len: metadata.len(),
                modified: metadata.modified().ok(),
                path: file,
            })
        })
        .collect::<std::io::Result<Vec<FileStamp>>>()
        .map_err(fail)?;

    Ok(WorkbookKey {
        path: canonical,
        files,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use tempfile::Builder;

    use super::{ReportInputs, ReportSession};
    use crate::config::ReportSettings;
    use crate::dates::DateWindow;
    use crate::workbook::WorkbookRole;

    fn march() -> DateWindow {
        DateWindow {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap_or_default(),
        }
    }

    #[test]
    fn require_names_every_missing_role() {
        let inputs = ReportInputs {
            sales: Some("sales.csv".into()),
            ..ReportInputs::default()
        };
        let result = inputs.require(
            &[WorkbookRole::Sales, WorkbookRole::BasePrice],
            "pl report",
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "missing_input");
            assert!(error.message.contains("base price"));
            assert!(!error.message.contains("sales,"));
        }
    }

    #[test]
    fn repeated_reconciliation_reuses_the_cached_outcome() {
        let dir = Builder::new().prefix("skyledger-session").tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let sales = dir.path().join("sales.csv");
            let base = dir.path().join("2024-03-01_2024-03-31.csv");
            assert!(
                fs::write(
                    &sales,
                    "Sector,FlightNumber,Amount,TravelDate\nDEL-BOM,6102,5000,2024-03-10\n"
                )
                .is_ok()
            );
            assert!(fs::write(&base, "Sector,Base\nDELBOM,4000\n").is_ok());

            let mut session = ReportSession::new(
                ReportInputs {
                    inventory: None,
                    sales: Some(sales),
                    base_price: Some(base),
                },
                ReportSettings::default(),
            );

            let first = session.reconcile(march(), "pl report");
            assert!(first.is_ok());
            let hits_after_first = session.cache_hits();
            let second = session.reconcile(march(), "pl analytics");
            assert!(second.is_ok());
            assert_eq!(session.cache_hits(), hits_after_first + 1);

            if let (Ok(first), Ok(second)) = (first, second) {
                assert_eq!(first, second);
                assert_eq!(first.records.len(), 1);
                assert_eq!(first.records[0].profit_loss, 1000.0);
            }
        }
    }

    #[test]
    fn changed_file_is_read_again() {
        let dir = Builder::new().prefix("skyledger-session").tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let sales = dir.path().join("sales.csv");
            let base = dir.path().join("2024-03-01_2024-03-31.csv");
            assert!(
                fs::write(
                    &sales,
                    "Sector,FlightNumber,Amount,TravelDate\nDEL-BOM,6102,5000,2024-03-10\n"
                )
                .is_ok()
            );
            assert!(fs::write(&base, "Sector,Base\nDELBOM,4000\n").is_ok());

            let mut session = ReportSession::new(
                ReportInputs {
                    inventory: None,
                    sales: Some(sales),
                    base_price: Some(base.clone()),
                },
                ReportSettings::default(),
            );
            let before = session.reconcile(march(), "pl report");
            assert!(before.is_ok());

            assert!(fs::write(&base, "Sector,Base\nDELBOM,4500.00\n").is_ok());
            let after = session.reconcile(march(), "pl report");
            assert!(after.is_ok());
            if let Ok(outcome) = after {
                assert_eq!(outcome.records[0].profit_loss, 500.0);
            }
        }
    }
}
