use super::core::AnimalManager;
use crate::errors::DbError;
use crate::query::{Projection, Query, ReadOptions};
use crate::table::DataTable;

impl AnimalManager {
    /// Reads matching records projected to `fields` and reshapes them into a
    /// cleaned [`DataTable`]: identifier stringified then dropped, named
    /// numeric columns coerced (non-convertible values become missing),
    /// named text columns trimmed. `force_refresh` bypasses the read cache.
    ///
    /// # Errors
    /// `Store` in strict mode.
    pub fn read_table(
        &self,
        query: Option<&Query>,
        fields: Option<&[&str]>,
        force_refresh: bool,
    ) -> Result<DataTable, DbError> {
        let projection = fields.map(|fs| Projection::fields(fs.iter().copied()));
        let opts = ReadOptions { use_cache: !force_refresh, ..ReadOptions::default() };
        let docs = self.read(query, projection.as_ref(), &opts)?;
        Ok(DataTable::from_records(&docs).clean())
    }
}
