use bson::doc;
use shelterlite::cache::{CacheKey, NoopCache, QueryCache, ReadCache};
use shelterlite::query::{Projection, Query};

#[test]
fn put_then_get_returns_the_list_unchanged() {
    let cache = QueryCache::new();
    let key = CacheKey::derive(&Query::new().eq("animal_type", "Dog"), None);
    let docs = vec![doc! {"name": "Rex"}, doc! {"name": "Bella"}];
    cache.put(key.clone(), docs.clone());
    assert_eq!(cache.get(&key), Some(docs));
}

#[test]
fn flush_drops_every_entry() {
    let cache = QueryCache::new();
    cache.put(CacheKey::derive(&Query::new(), None), vec![doc! {"a": 1}]);
    cache.put(
        CacheKey::derive(&Query::new().eq("breed", "Beagle"), None),
        vec![doc! {"b": 2}],
    );
    assert_eq!(cache.len(), 2);
    cache.flush();
    assert!(cache.is_empty());
}

#[test]
fn metrics_track_hits_and_misses() {
    let cache = QueryCache::new();
    let key = CacheKey::derive(&Query::new(), None);
    assert!(cache.get(&key).is_none());
    cache.put(key.clone(), Vec::new());
    assert!(cache.get(&key).is_some());
    cache.flush();

    let snap = cache.metrics_snapshot();
    assert_eq!(snap.misses, 1);
    assert_eq!(snap.hits, 1);
    assert_eq!(snap.inserts, 1);
    assert_eq!(snap.flushes, 1);
}

#[test]
fn keys_distinguish_query_and_field_set_but_not_sort_or_limit() {
    // The key is derived from query content and field names only; there is
    // no sort/limit component by design.
    let q = Query::new().eq("animal_type", "Dog");
    let base = CacheKey::derive(&q, None);
    assert_eq!(base, CacheKey::derive(&q, None));

    let projected = CacheKey::derive(&q, Some(&Projection::fields(["name"])));
    assert_ne!(base, projected);

    let other_query = CacheKey::derive(&Query::new().eq("animal_type", "Cat"), None);
    assert_ne!(base, other_query);
}

#[test]
fn noop_cache_never_stores() {
    let cache = NoopCache;
    let key = CacheKey::derive(&Query::new(), None);
    cache.put(key.clone(), vec![doc! {"a": 1}]);
    assert!(cache.get(&key).is_none());
    assert_eq!(cache.len(), 0);
}
