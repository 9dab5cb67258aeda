use bson::Document as BsonDocument;

use super::core::AnimalManager;
use crate::cache::CacheKey;
use crate::diag;
use crate::errors::DbError;
use crate::query::{Projection, Query, ReadOptions};

impl AnimalManager {
    /// Inserts one record. Reports success as a boolean; a store fault in
    /// lenient mode becomes `Ok(false)` after a diagnostic record.
    ///
    /// # Errors
    /// `Validation` if the document is empty (raised before any store
    /// contact); `Store` in strict mode.
    pub fn create(&self, document: &BsonDocument) -> Result<bool, DbError> {
        if document.is_empty() {
            return Err(DbError::Validation("document must be a non-empty mapping".to_string()));
        }
        match self.backend.insert_one(document.clone()) {
            Ok(_id) => {
                // Data changed; every memoized read is now suspect.
                self.clear_cache();
                log::info!(target: "shelterlite::audit", "insert animals count=1");
                Ok(true)
            }
            Err(e) if self.lenient => {
                diag!("store fault during create: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Reads matching records, optionally projected, sorted, and limited.
    /// An absent query matches everything. With `opts.use_cache` a prior
    /// identical request is served from the cache with no store round-trip;
    /// a store fault in lenient mode yields an empty list.
    ///
    /// # Errors
    /// `Store` in strict mode.
    pub fn read(
        &self,
        query: Option<&Query>,
        projection: Option<&Projection>,
        opts: &ReadOptions,
    ) -> Result<Vec<BsonDocument>, DbError> {
        let match_all = Query::new();
        let query = query.unwrap_or(&match_all);
        let key = CacheKey::derive(query, projection);
        if opts.use_cache {
            if let Some(docs) = self.cache.get(&key) {
                return Ok(docs);
            }
        }
        match self.backend.find(query, projection, opts.sort.as_deref(), opts.limit) {
            Ok(docs) => {
                if opts.use_cache {
                    self.cache.put(key, docs.clone());
                }
                Ok(docs)
            }
            Err(e) if self.lenient => {
                diag!("store fault during read: {e}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Applies `patch` as a field-level merge to every matching record and
    /// returns the count modified. A store fault in lenient mode yields 0.
    ///
    /// # Errors
    /// `Validation` if either argument is empty; `Store` in strict mode.
    pub fn update(&self, query: &Query, patch: &BsonDocument) -> Result<u64, DbError> {
        if query.is_empty() {
            return Err(DbError::Validation("query must be a non-empty mapping".to_string()));
        }
        if patch.is_empty() {
            return Err(DbError::Validation("update data must be a non-empty mapping".to_string()));
        }
        match self.backend.update_many(query, patch) {
            Ok(n) => {
                self.clear_cache();
                log::info!(target: "shelterlite::audit", "update animals count={n}");
                Ok(n)
            }
            Err(e) if self.lenient => {
                diag!("store fault during update: {e}");
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    /// Removes every matching record and returns the count removed. A store
    /// fault in lenient mode yields 0.
    ///
    /// # Errors
    /// `Validation` if the query is empty; `Store` in strict mode.
    pub fn delete(&self, query: &Query) -> Result<u64, DbError> {
        if query.is_empty() {
            return Err(DbError::Validation("query must be a non-empty mapping".to_string()));
        }
        match self.backend.delete_many(query) {
            Ok(n) => {
                self.clear_cache();
                log::info!(target: "shelterlite::audit", "delete animals count={n}");
                Ok(n)
            }
            Err(e) if self.lenient => {
                diag!("store fault during delete: {e}");
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }
}
