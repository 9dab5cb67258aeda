//! Reshapes records for the UI: a memoized filtered table, category counts
//! for the chart, and a selected-record map marker.

use bson::Document as BsonDocument;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;

use crate::errors::DbError;
use crate::filters::FilterCatalog;
use crate::manager::AnimalManager;
use crate::query::{Projection, ReadOptions, SortSpec};
use crate::table::DataTable;
use crate::types::{FIELD_AGE_WEEKS, FIELD_BREED, FIELD_LAT, FIELD_LONG, FIELD_NAME, REQUIRED_FIELDS};

/// Fallback marker position when a record has no usable coordinates.
pub const DEFAULT_LAT: f64 = 30.75;
pub const DEFAULT_LONG: f64 = -97.48;

const RESET: &str = "RESET";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub long: f64,
    pub name: String,
    pub breed: String,
}

/// Holds the base dataset (loaded once, projected to the displayed fields,
/// youngest first) and memoizes filtered tables per filter name so repeat
/// selections are instant.
///
/// The memo is not invalidated by writes; `refresh` is the escape hatch.
pub struct DashboardView<'a> {
    manager: &'a AnimalManager,
    catalog: &'a FilterCatalog,
    /// When set, a memo miss queries the store; otherwise the base records
    /// are masked in memory.
    db_filters: bool,
    base_records: RwLock<Vec<BsonDocument>>,
    base_table: RwLock<DataTable>,
    memo: RwLock<HashMap<String, DataTable>>,
}

impl<'a> DashboardView<'a> {
    /// Loads the base dataset and prepares an empty memo.
    ///
    /// # Errors
    /// `Store` when the manager runs in strict mode and the load fails.
    pub fn new(
        manager: &'a AnimalManager,
        catalog: &'a FilterCatalog,
        db_filters: bool,
    ) -> Result<Self, DbError> {
        let view = Self {
            manager,
            catalog,
            db_filters,
            base_records: RwLock::new(Vec::new()),
            base_table: RwLock::new(DataTable::default()),
            memo: RwLock::new(HashMap::new()),
        };
        view.reload(false)?;
        Ok(view)
    }

    fn reload(&self, force_refresh: bool) -> Result<(), DbError> {
        let opts = ReadOptions {
            sort: Some(vec![SortSpec::asc(FIELD_AGE_WEEKS)]),
            use_cache: !force_refresh,
            ..ReadOptions::default()
        };
        let projection = Projection::fields(REQUIRED_FIELDS);
        let records = self.manager.read(None, Some(&projection), &opts)?;
        let table = DataTable::from_records(&records).clean();
        *self.base_records.write() = records;
        *self.base_table.write() = table;
        self.memo.write().clear();
        Ok(())
    }

    /// Re-reads the base dataset, bypassing the read cache, and clears the
    /// memo.
    pub fn refresh(&self) -> Result<(), DbError> {
        self.reload(true)
    }

    /// The unfiltered base table.
    #[must_use]
    pub fn base(&self) -> DataTable {
        self.base_table.read().clone()
    }

    /// Returns the table for the given filter selection. `RESET` (or an
    /// empty selection) is the base dataset; anything else resolves through
    /// the catalog, memoized per name.
    ///
    /// # Errors
    /// `UnknownFilter` for an unregistered name.
    pub fn filtered(&self, selection: &str) -> Result<DataTable, DbError> {
        let key = {
            let trimmed = selection.trim();
            if trimmed.is_empty() { RESET.to_string() } else { trimmed.to_ascii_uppercase() }
        };
        if key == RESET {
            return Ok(self.base());
        }
        if let Some(table) = self.memo.read().get(&key) {
            return Ok(table.clone());
        }
        let table = if self.db_filters {
            let query = self.catalog.to_query(&key)?;
            self.manager.read_table(Some(&query), Some(REQUIRED_FIELDS.as_slice()), false)?
        } else {
            let records = self.base_records.read();
            let subset = self.catalog.apply_in_memory(&records, &key)?;
            DataTable::from_records(&subset).clean()
        };
        self.memo.write().insert(key, table.clone());
        Ok(table)
    }
}

/// Breed distribution of the given table, for the pie chart.
#[must_use]
pub fn breed_counts(table: &DataTable) -> Vec<(String, u64)> {
    table.value_counts(FIELD_BREED)
}

/// Marker for the currently selected row. Out-of-range selections fall back
/// to the first row; unusable values fall back to the defaults the original
/// dashboard used.
#[must_use]
pub fn map_marker(table: &DataTable, selected_row: usize) -> MapMarker {
    let row = if selected_row < table.len() { selected_row } else { 0 };
    let lat = table.cell(row, FIELD_LAT).and_then(crate::table::Cell::as_f64).unwrap_or(DEFAULT_LAT);
    let long =
        table.cell(row, FIELD_LONG).and_then(crate::table::Cell::as_f64).unwrap_or(DEFAULT_LONG);
    let name = table
        .cell(row, FIELD_NAME)
        .and_then(|c| c.as_str().map(ToString::to_string))
        .unwrap_or_else(|| "Unknown".to_string());
    let breed = table
        .cell(row, FIELD_BREED)
        .and_then(|c| c.as_str().map(ToString::to_string))
        .unwrap_or_else(|| "Unknown".to_string());
    MapMarker { lat, long, name, breed }
}
