use bson::{Bson, Document as BsonDocument, doc};
use shelterlite::cache::QueryCache;
use shelterlite::errors::DbError;
use shelterlite::manager::{AnimalManager, ManagerOptions};
use shelterlite::query::{Projection, Query, ReadOptions, SortSpec};
use shelterlite::store::{MemoryBackend, StoreBackend};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps the embedded store and counts round-trips per operation.
struct CountingBackend {
    inner: MemoryBackend,
    finds: Arc<AtomicUsize>,
    inserts: Arc<AtomicUsize>,
}

impl CountingBackend {
    fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let finds = Arc::new(AtomicUsize::new(0));
        let inserts = Arc::new(AtomicUsize::new(0));
        let backend =
            Self { inner: MemoryBackend::new(), finds: finds.clone(), inserts: inserts.clone() };
        (backend, finds, inserts)
    }
}

impl StoreBackend for CountingBackend {
    fn insert_one(&self, document: BsonDocument) -> Result<Bson, DbError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_one(document)
    }

    fn find(
        &self,
        query: &Query,
        projection: Option<&Projection>,
        sort: Option<&[SortSpec]>,
        limit: Option<usize>,
    ) -> Result<Vec<BsonDocument>, DbError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(query, projection, sort, limit)
    }

    fn update_many(&self, query: &Query, patch: &BsonDocument) -> Result<u64, DbError> {
        self.inner.update_many(query, patch)
    }

    fn delete_many(&self, query: &Query) -> Result<u64, DbError> {
        self.inner.delete_many(query)
    }

    fn count(&self, query: &Query) -> Result<usize, DbError> {
        self.inner.count(query)
    }
}

/// A store that is always unreachable.
struct FailingBackend;

impl StoreBackend for FailingBackend {
    fn insert_one(&self, _document: BsonDocument) -> Result<Bson, DbError> {
        Err(DbError::Store("connection refused".to_string()))
    }

    fn find(
        &self,
        _query: &Query,
        _projection: Option<&Projection>,
        _sort: Option<&[SortSpec]>,
        _limit: Option<usize>,
    ) -> Result<Vec<BsonDocument>, DbError> {
        Err(DbError::Store("connection refused".to_string()))
    }

    fn update_many(&self, _query: &Query, _patch: &BsonDocument) -> Result<u64, DbError> {
        Err(DbError::Store("connection refused".to_string()))
    }

    fn delete_many(&self, _query: &Query) -> Result<u64, DbError> {
        Err(DbError::Store("connection refused".to_string()))
    }

    fn count(&self, _query: &Query) -> Result<usize, DbError> {
        Err(DbError::Store("connection refused".to_string()))
    }
}

fn counting_manager() -> (AnimalManager, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let (backend, finds, inserts) = CountingBackend::new();
    let manager =
        AnimalManager::with_cache(Box::new(backend), Box::new(QueryCache::new()), true);
    (manager, finds, inserts)
}

#[test]
fn create_empty_document_is_validation_error_without_store_contact() {
    let (manager, _finds, inserts) = counting_manager();
    let err = manager.create(&BsonDocument::new()).unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    assert_eq!(inserts.load(Ordering::SeqCst), 0);
}

#[test]
fn create_inserts_and_reports_true() {
    let (manager, _finds, inserts) = counting_manager();
    assert!(manager.create(&doc! {"name": "Rex", "animal_type": "Dog"}).unwrap());
    assert_eq!(inserts.load(Ordering::SeqCst), 1);
}

#[test]
fn update_and_delete_validate_empty_arguments() {
    let (manager, _finds, _inserts) = counting_manager();
    assert!(matches!(
        manager.update(&Query::new(), &doc! {"name": "Rex"}),
        Err(DbError::Validation(_))
    ));
    assert!(matches!(
        manager.update(&Query::new().eq("name", "Rex"), &BsonDocument::new()),
        Err(DbError::Validation(_))
    ));
    assert!(matches!(manager.delete(&Query::new()), Err(DbError::Validation(_))));
}

#[test]
fn delete_on_empty_store_returns_zero() {
    let (manager, _finds, _inserts) = counting_manager();
    let removed = manager.delete(&Query::new().eq("animal_type", "Cat")).unwrap();
    assert_eq!(removed, 0);
}

#[test]
fn identical_read_is_served_from_cache() {
    let (manager, finds, _inserts) = counting_manager();
    manager.create(&doc! {"animal_type": "Dog", "breed": "Beagle"}).unwrap();

    // Equal query content built twice, in different insertion order.
    let q1 = Query::new().eq("animal_type", "Dog").eq("breed", "Beagle");
    let q2 = Query::new().eq("breed", "Beagle").eq("animal_type", "Dog");
    let p = Projection::fields(["name", "breed"]);

    let first = manager.read(Some(&q1), Some(&p), &ReadOptions::default()).unwrap();
    let second = manager.read(Some(&q2), Some(&p), &ReadOptions::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(finds.load(Ordering::SeqCst), 1, "second read must not hit the store");
}

#[test]
fn clear_cache_forces_requery() {
    let (manager, finds, _inserts) = counting_manager();
    let q = Query::new().eq("animal_type", "Dog");
    manager.read(Some(&q), None, &ReadOptions::default()).unwrap();
    manager.clear_cache();
    manager.read(Some(&q), None, &ReadOptions::default()).unwrap();
    assert_eq!(finds.load(Ordering::SeqCst), 2);
}

#[test]
fn writes_flush_the_cache() {
    let (manager, finds, _inserts) = counting_manager();
    let q = Query::new().eq("animal_type", "Dog");

    manager.read(Some(&q), None, &ReadOptions::default()).unwrap();
    manager.create(&doc! {"animal_type": "Dog", "breed": "Akita"}).unwrap();
    let docs = manager.read(Some(&q), None, &ReadOptions::default()).unwrap();
    assert_eq!(finds.load(Ordering::SeqCst), 2, "create must invalidate cached reads");
    assert_eq!(docs.len(), 1, "stale pre-write result must not be returned");

    manager.update(&q, &doc! {"breed": "Shiba Inu"}).unwrap();
    manager.read(Some(&q), None, &ReadOptions::default()).unwrap();
    assert_eq!(finds.load(Ordering::SeqCst), 3);

    manager.delete(&q).unwrap();
    manager.read(Some(&q), None, &ReadOptions::default()).unwrap();
    assert_eq!(finds.load(Ordering::SeqCst), 4);
}

#[test]
fn use_cache_off_always_queries_the_store() {
    let (manager, finds, _inserts) = counting_manager();
    let opts = ReadOptions { use_cache: false, ..ReadOptions::default() };
    manager.read(None, None, &opts).unwrap();
    manager.read(None, None, &opts).unwrap();
    assert_eq!(finds.load(Ordering::SeqCst), 2);
    assert_eq!(manager.cache_len(), 0, "bypassed reads must not populate the cache");
}

#[test]
fn force_refresh_bypasses_cached_table() {
    let (manager, finds, _inserts) = counting_manager();
    manager.create(&doc! {"name": "Rex", "animal_type": "Dog"}).unwrap();
    let fields = ["name", "animal_type"];
    manager.read_table(None, Some(&fields), false).unwrap();
    manager.read_table(None, Some(&fields), false).unwrap();
    assert_eq!(finds.load(Ordering::SeqCst), 1);
    manager.read_table(None, Some(&fields), true).unwrap();
    assert_eq!(finds.load(Ordering::SeqCst), 2);
}

#[test]
fn lenient_mode_swallows_store_faults_with_a_diagnostic() {
    let manager = AnimalManager::new(Box::new(FailingBackend));
    let _guard = shelterlite::diag::enable_thread_sink();

    assert_eq!(manager.read(None, None, &ReadOptions::default()).unwrap(), Vec::new());
    assert!(!manager.create(&doc! {"name": "Rex"}).unwrap());
    assert_eq!(manager.update(&Query::new().eq("name", "Rex"), &doc! {"seen": true}).unwrap(), 0);
    assert_eq!(manager.delete(&Query::new().eq("name", "Rex")).unwrap(), 0);

    let diags = shelterlite::diag::drain();
    assert_eq!(diags.len(), 4);
    assert!(diags.iter().all(|d| d.contains("store fault")));
}

#[test]
fn strict_mode_reraises_store_faults() {
    let manager = AnimalManager::with_options(
        Box::new(FailingBackend),
        ManagerOptions { lenient: false, use_cache: true },
    );
    assert!(matches!(manager.read(None, None, &ReadOptions::default()), Err(DbError::Store(_))));
    assert!(matches!(manager.create(&doc! {"name": "Rex"}), Err(DbError::Store(_))));
    assert!(matches!(
        manager.update(&Query::new().eq("name", "Rex"), &doc! {"seen": true}),
        Err(DbError::Store(_))
    ));
    assert!(matches!(manager.delete(&Query::new().eq("name", "Rex")), Err(DbError::Store(_))));
}

#[test]
fn update_merges_fields_and_returns_modified_count() {
    let manager = AnimalManager::new(Box::new(MemoryBackend::new()));
    manager.create(&doc! {"name": "Rex", "breed": "Beagle"}).unwrap();
    manager.create(&doc! {"name": "Bella", "breed": "Beagle"}).unwrap();
    manager.create(&doc! {"name": "Luna", "breed": "Poodle"}).unwrap();

    let n = manager
        .update(&Query::new().eq("breed", "Beagle"), &doc! {"outcome_type": "Adoption"})
        .unwrap();
    assert_eq!(n, 2);

    let adopted = manager
        .read(Some(&Query::new().eq("outcome_type", "Adoption")), None, &ReadOptions::default())
        .unwrap();
    assert_eq!(adopted.len(), 2);
    assert_eq!(adopted[0].get_str("name").unwrap(), "Rex");
}
