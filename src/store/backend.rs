use bson::{Bson, Document as BsonDocument};

use crate::errors::DbError;
use crate::query::{Projection, Query, SortSpec};

/// The store boundary. Every method is fallible so a backend can surface
/// store-level faults; the manager decides whether they are swallowed.
///
/// Implementations must preserve insertion order for unsorted reads.
pub trait StoreBackend: Send + Sync {
    /// Inserts one record and returns its identifier value. Assigns an
    /// `ObjectId` identifier when the record carries none.
    fn insert_one(&self, document: BsonDocument) -> Result<Bson, DbError>;

    /// Returns matching records after applying filter, sort, limit, and
    /// projection in that order.
    fn find(
        &self,
        query: &Query,
        projection: Option<&Projection>,
        sort: Option<&[SortSpec]>,
        limit: Option<usize>,
    ) -> Result<Vec<BsonDocument>, DbError>;

    /// Merges `patch` fields into every matching record; returns how many
    /// records actually changed.
    fn update_many(&self, query: &Query, patch: &BsonDocument) -> Result<u64, DbError>;

    /// Removes every matching record; returns how many were removed.
    fn delete_many(&self, query: &Query) -> Result<u64, DbError>;

    fn count(&self, query: &Query) -> Result<usize, DbError>;
}
