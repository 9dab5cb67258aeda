use bson::Bson;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Safety limits to prevent resource abuse
pub(crate) const MAX_IN_SET: usize = 1000;
pub(crate) const MAX_SORT_FIELDS: usize = 8;

/// A single-field constraint. All constraints in a [`Query`] are conjunctive.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Eq(Bson),
    In(Vec<Bson>),
    Range { gte: Option<Bson>, lte: Option<Bson> },
}

/// A conjunctive query over record fields: equality, `$in` set membership,
/// and `$gte`/`$lte` ranges. Fields iterate in sorted order, which is the
/// normalized representation cache keys are derived from.
///
/// The empty query matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query(pub(crate) BTreeMap<String, Constraint>);

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Require `field == value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.0.insert(field.into(), Constraint::Eq(value.into()));
        self
    }

    /// Require `field` to be one of `values`.
    #[must_use]
    pub fn any_of(mut self, field: impl Into<String>, values: Vec<Bson>) -> Self {
        self.0.insert(field.into(), Constraint::In(values));
        self
    }

    /// Require `field` within the inclusive range. Either bound may be open.
    #[must_use]
    pub fn between(
        mut self,
        field: impl Into<String>,
        gte: Option<impl Into<Bson>>,
        lte: Option<impl Into<Bson>>,
    ) -> Self {
        self.0.insert(
            field.into(),
            Constraint::Range { gte: gte.map(Into::into), lte: lte.map(Into::into) },
        );
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Constraint)> {
        self.0.iter()
    }

    #[must_use]
    pub fn constraint(&self, field: &str) -> Option<&Constraint> {
        self.0.get(field)
    }
}

/// Requested read fields. Wire shape is a `{field: bool}` inclusion mapping;
/// the store always includes [`crate::types::ID_FIELD`] even when absent here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection(pub(crate) Vec<String>);

impl Projection {
    /// Builds a projection from field names, preserving order and dropping
    /// duplicates.
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for n in names {
            let n = n.into();
            if !out.contains(&n) {
                out.push(n);
            }
        }
        Self(out)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Requested names in the order given.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Sorted field names with the identifier excluded; this is the
    /// cache-key input.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.0.iter().filter(|f| f.as_str() != crate::types::ID_FIELD).cloned().collect();
        names.sort();
        names
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

impl SortSpec {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: Order::Asc }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: Order::Desc }
    }
}

/// Options for `AnimalManager::read`.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub sort: Option<Vec<SortSpec>>,
    pub limit: Option<usize>,
    pub use_cache: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { sort: None, limit: None, use_cache: true }
    }
}
