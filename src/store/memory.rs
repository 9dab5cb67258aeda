use bson::oid::ObjectId;
use bson::{Bson, Document as BsonDocument};
use parking_lot::RwLock;

use super::backend::StoreBackend;
use crate::config::Config;
use crate::errors::DbError;
use crate::query::{Projection, Query, SortSpec, compare_docs, project_fields};
use crate::types::ID_FIELD;

const MAX_LIMIT: usize = 10_000;

/// Embedded document collection. Records live in insertion order behind a
/// single lock; the design assumes one synchronous caller.
#[derive(Default)]
pub struct MemoryBackend {
    records: RwLock<Vec<BsonDocument>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the connection parameters and opens the store. This is the
    /// one startup path whose failure is fatal and propagated.
    pub fn connect(config: &Config) -> Result<Self, DbError> {
        config.validate()?;
        log::info!(
            "opened shelter store for database '{}' at {}:{}",
            config.db_name,
            config.host,
            config.port
        );
        Ok(Self::new())
    }

    /// Snapshot of every record, insertion order preserved.
    #[must_use]
    pub fn all(&self) -> Vec<BsonDocument> {
        self.records.read().clone()
    }
}

impl StoreBackend for MemoryBackend {
    fn insert_one(&self, mut document: BsonDocument) -> Result<Bson, DbError> {
        let id = match document.get(ID_FIELD) {
            Some(existing) => existing.clone(),
            None => {
                let oid = ObjectId::new();
                document.insert(ID_FIELD, oid);
                Bson::ObjectId(oid)
            }
        };
        self.records.write().push(document);
        Ok(id)
    }

    fn find(
        &self,
        query: &Query,
        projection: Option<&Projection>,
        sort: Option<&[SortSpec]>,
        limit: Option<usize>,
    ) -> Result<Vec<BsonDocument>, DbError> {
        let mut docs: Vec<BsonDocument> = {
            let guard = self.records.read();
            guard.iter().filter(|d| query.matches(d)).cloned().collect()
        };
        if let Some(sort) = sort {
            // Stable sort keeps insertion order between equal keys.
            docs.sort_by(|a, b| compare_docs(a, b, sort));
        }
        if let Some(limit) = limit {
            docs.truncate(limit.min(MAX_LIMIT));
        }
        if let Some(p) = projection {
            docs = docs.iter().map(|d| project_fields(d, p.as_slice())).collect();
        }
        Ok(docs)
    }

    fn update_many(&self, query: &Query, patch: &BsonDocument) -> Result<u64, DbError> {
        let mut modified = 0u64;
        let mut guard = self.records.write();
        for doc in guard.iter_mut() {
            if !query.matches(doc) {
                continue;
            }
            let mut changed = false;
            for (k, v) in patch {
                let old = doc.insert(k.clone(), v.clone());
                if old.as_ref() != Some(v) {
                    changed = true;
                }
            }
            if changed {
                modified += 1;
            }
        }
        Ok(modified)
    }

    fn delete_many(&self, query: &Query) -> Result<u64, DbError> {
        let mut guard = self.records.write();
        let before = guard.len();
        guard.retain(|d| !query.matches(d));
        Ok((before - guard.len()) as u64)
    }

    fn count(&self, query: &Query) -> Result<usize, DbError> {
        Ok(self.records.read().iter().filter(|d| query.matches(d)).count())
    }
}
