//! Named rescue-filter rules and their two evaluation paths: translation to
//! a store query, or an equivalent in-memory predicate over already-loaded
//! records.

use bson::{Bson, Document as BsonDocument};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::DbError;
use crate::query::{Query, numeric};
use crate::types::{FIELD_AGE_WEEKS, FIELD_ANIMAL_TYPE, FIELD_BREED, FIELD_SEX};

/// The built-in catalog, defined once at process start and immutable.
pub static BUILTIN_FILTERS: Lazy<FilterCatalog> = Lazy::new(FilterCatalog::builtin);

/// A fixed predicate over breed, sex, and age used to pre-select records for
/// one rescue use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub breeds: BTreeSet<String>,
    pub sex: String,
    /// Inclusive age window in weeks.
    pub age_min: i64,
    pub age_max: i64,
}

impl FilterRule {
    fn new<const N: usize>(breeds: [&str; N], sex: &str, age_min: i64, age_max: i64) -> Self {
        Self {
            breeds: breeds.iter().map(|b| (*b).to_string()).collect(),
            sex: sex.to_string(),
            age_min,
            age_max,
        }
    }

    /// In-memory predicate: breed in the allowed set, the required sex, and
    /// age within the inclusive window. A record missing any of the three
    /// attributes never matches.
    #[must_use]
    pub fn matches(&self, doc: &BsonDocument) -> bool {
        let breed_ok = doc.get_str(FIELD_BREED).is_ok_and(|b| self.breeds.contains(b));
        let sex_ok = doc.get_str(FIELD_SEX).is_ok_and(|s| s == self.sex);
        let age_ok = doc
            .get(FIELD_AGE_WEEKS)
            .and_then(numeric)
            .is_some_and(|a| a >= self.age_min as f64 && a <= self.age_max as f64);
        breed_ok && sex_ok && age_ok
    }
}

/// Ordered-by-name mapping from filter name to rule.
#[derive(Debug, Clone, Default)]
pub struct FilterCatalog(BTreeMap<String, FilterRule>);

impl FilterCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The three rescue profiles of the original dashboard.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(
            "WATER",
            FilterRule::new(
                ["Labrador Retriever Mix", "Chesapeake Bay Retriever", "Newfoundland"],
                "Intact Female",
                26,
                156,
            ),
        );
        catalog.register(
            "MOUNTAIN",
            FilterRule::new(
                [
                    "German Shepherd",
                    "Alaskan Malamute",
                    "Old English Sheepdog",
                    "Siberian Husky",
                    "Rottweiler",
                ],
                "Intact Male",
                26,
                156,
            ),
        );
        catalog.register(
            "DISASTER",
            FilterRule::new(
                [
                    "Doberman Pinscher",
                    "German Shepherd",
                    "Golden Retriever",
                    "Bloodhound",
                    "Rottweiler",
                ],
                "Intact Male",
                20,
                300,
            ),
        );
        catalog
    }

    pub fn register(&mut self, name: impl Into<String>, rule: FilterRule) {
        self.0.insert(name.into(), rule);
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// # Errors
    /// `UnknownFilter` if the name is not registered.
    pub fn rule(&self, name: &str) -> Result<&FilterRule, DbError> {
        self.0.get(name).ok_or_else(|| DbError::UnknownFilter(name.to_string()))
    }

    /// Renders a rule as a store query: dogs only, breed membership in the
    /// allowed set (serialized in sorted order for determinism), the
    /// required sex, and the inclusive age window.
    ///
    /// # Errors
    /// `UnknownFilter` if the name is not registered.
    pub fn to_query(&self, name: &str) -> Result<Query, DbError> {
        let rule = self.rule(name)?;
        let breeds: Vec<Bson> = rule.breeds.iter().map(|b| Bson::String(b.clone())).collect();
        Ok(Query::new()
            .eq(FIELD_ANIMAL_TYPE, "Dog")
            .any_of(FIELD_BREED, breeds)
            .eq(FIELD_SEX, rule.sex.clone())
            .between(FIELD_AGE_WEEKS, Some(rule.age_min), Some(rule.age_max)))
    }

    /// Evaluates the rule's predicate over already-materialized records,
    /// preserving relative order. Records missing any required attribute are
    /// excluded; a collection lacking them yields an empty subset, never a
    /// fault.
    ///
    /// # Errors
    /// `UnknownFilter` if the name is not registered.
    pub fn apply_in_memory(
        &self,
        records: &[BsonDocument],
        name: &str,
    ) -> Result<Vec<BsonDocument>, DbError> {
        let rule = self.rule(name)?;
        Ok(records.iter().filter(|d| rule.matches(d)).cloned().collect())
    }
}
