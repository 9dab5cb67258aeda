use crate::query::{Projection, Query};

/// Key for one memoized read: the canonical (sorted) query plus the sorted
/// requested field names. The identifier field never participates in key
/// derivation even though the store always returns it.
///
/// Sort and limit are deliberately not part of the key: a cached list is
/// returned unchanged for any sort/limit combination of the same query and
/// field set. This reproduces the observed legacy behavior.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    fields: Option<Vec<String>>,
}

impl CacheKey {
    #[must_use]
    pub fn derive(query: &Query, projection: Option<&Projection>) -> Self {
        let query = serde_json::to_string(query).unwrap_or_else(|_| format!("{query:?}"));
        let fields = projection.map(Projection::sorted_names);
        Self { query, fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;

    #[test]
    fn insertion_order_does_not_matter() {
        let a = Query::new().eq("animal_type", "Cat").eq("breed", "Sphynx");
        let b = Query::new().eq("breed", "Sphynx").eq("animal_type", "Cat");
        assert_eq!(CacheKey::derive(&a, None), CacheKey::derive(&b, None));
    }

    #[test]
    fn identifier_is_excluded_from_fields() {
        let q = Query::new();
        let with_id = Projection::fields(["name", "_id"]);
        let without = Projection::fields(["name"]);
        assert_eq!(CacheKey::derive(&q, Some(&with_id)), CacheKey::derive(&q, Some(&without)));
    }

    #[test]
    fn field_sets_distinguish_keys() {
        let q = Query::new();
        let a = Projection::fields(["name"]);
        let b = Projection::fields(["name", "breed"]);
        assert_ne!(CacheKey::derive(&q, Some(&a)), CacheKey::derive(&q, Some(&b)));
        assert_ne!(CacheKey::derive(&q, Some(&a)), CacheKey::derive(&q, None));
    }
}
