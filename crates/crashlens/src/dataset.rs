//! In-memory crash dataset: row storage, column presence, shared handles.

pub mod loader;
pub mod options;
pub mod record;

pub use loader::load_csv;
pub use options::FilterOptions;
pub use record::CrashRecord;

use std::sync::{Arc, PoisonError, RwLock};

/// Presence flags for the CSV columns backing each filter dimension.
///
/// A dimension whose backing column(s) are entirely absent from the source
/// file is inert: it matches every record instead of erroring.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    pub borough: bool,
    pub year: bool,
    pub vehicle_type_primary: bool,
    pub vehicle_type_secondary: bool,
    pub contributing_factor_primary: bool,
    pub contributing_factor_secondary: bool,
    pub persons_injured: bool,
    pub persons_killed: bool,
    pub on_street_name: bool,
    pub cross_street_name: bool,
    pub off_street_name: bool,
}

impl Columns {
    /// Capture presence flags from a CSV header row. The `year` flag follows
    /// `crash_datetime`, since `year` is derived from it at load time.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut columns = Columns::default();
        for name in headers {
            match name {
                "borough" => columns.borough = true,
                "crash_datetime" => columns.year = true,
                "vehicle_type_code_1" => columns.vehicle_type_primary = true,
                "vehicle_type_code_2" => columns.vehicle_type_secondary = true,
                "contributing_factor_vehicle_1" => columns.contributing_factor_primary = true,
                "contributing_factor_vehicle_2" => columns.contributing_factor_secondary = true,
                "number_of_persons_injured" => columns.persons_injured = true,
                "number_of_persons_killed" => columns.persons_killed = true,
                "on_street_name" => columns.on_street_name = true,
                "cross_street_name" => columns.cross_street_name = true,
                "off_street_name" => columns.off_street_name = true,
                _ => {}
            }
        }
        columns
    }

    /// All columns present. Used for datasets built directly from records.
    pub fn all() -> Self {
        Columns {
            borough: true,
            year: true,
            vehicle_type_primary: true,
            vehicle_type_secondary: true,
            contributing_factor_primary: true,
            contributing_factor_secondary: true,
            persons_injured: true,
            persons_killed: true,
            on_street_name: true,
            cross_street_name: true,
            off_street_name: true,
        }
    }
}

/// An immutable, ordered collection of crash records plus the column
/// presence captured at load time and the precomputed dropdown options.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<CrashRecord>,
    columns: Columns,
    options: FilterOptions,
}

impl Dataset {
    pub fn new(records: Vec<CrashRecord>, columns: Columns) -> Self {
        let options = FilterOptions::collect(&records, &columns);
        Dataset {
            records,
            columns,
            options,
        }
    }

    /// Build a dataset from in-memory records, treating every column as
    /// present.
    pub fn from_records(records: Vec<CrashRecord>) -> Self {
        Self::new(records, Columns::all())
    }

    pub fn records(&self) -> &[CrashRecord] {
        &self.records
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Shared read-only handle to the loaded dataset.
///
/// Queries take a cheap `Arc` snapshot and never observe partial updates;
/// a reload swaps the inner `Arc` wholesale while in-flight queries keep
/// whatever snapshot they already hold.
#[derive(Debug, Clone)]
pub struct DatasetHandle {
    inner: Arc<RwLock<Arc<Dataset>>>,
}

impl DatasetHandle {
    pub fn new(dataset: Dataset) -> Self {
        DatasetHandle {
            inner: Arc::new(RwLock::new(Arc::new(dataset))),
        }
    }

    pub fn snapshot(&self) -> Arc<Dataset> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, dataset: Dataset) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(dataset);
    }
}
