//! Tests for the in-memory store

use super::*;
use crate::record::{
    validate, BenchmarkRecord, HardwareContext, RawCandidate, RecordStatus, TechniqueFamily,
};
use crate::store::{HardwareSelector, RecordFilter, RecordId, RecordStore, Scope, StoreError};

fn record(subject: &str, processor: &str, optimized: f64) -> BenchmarkRecord {
    validate(
        &RawCandidate::new()
            .subject(subject)
            .technique("int8")
            .variant("static")
            .processor(processor)
            .baseline("accuracy", 76.87)
            .optimized("accuracy", optimized),
    )
    .unwrap()
}

#[test]
fn test_insert_and_get() {
    let store = InMemoryStore::new();
    let rec = record("ResNet50", "SPR", 76.2);
    let key = rec.key();

    let id = store.insert(rec.clone()).unwrap();

    assert_eq!(id, RecordId(1));
    assert_eq!(store.get(&key).unwrap().as_deref(), Some(&rec));
    assert_eq!(store.active_id(&key).unwrap(), Some(id));
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn test_duplicate_rejected() {
    let store = InMemoryStore::new();
    let first = store.insert(record("ResNet50", "SPR", 76.2)).unwrap();

    let err = store.insert(record("ResNet50", "SPR", 76.1)).unwrap_err();

    assert!(matches!(err, StoreError::DuplicateRecord { existing, .. } if existing == first));
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn test_hardware_is_part_of_key() {
    let store = InMemoryStore::new();
    store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    store.insert(record("ResNet50", "ICX", 76.1)).unwrap();

    assert_eq!(store.active_len().unwrap(), 2);
}

#[test]
fn test_supersede() {
    let store = InMemoryStore::new();
    let old = store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    let corrected = record("ResNet50", "SPR", 76.25);
    let key = corrected.key();

    let new = store.supersede(old, corrected.clone(), Some("typo in source")).unwrap();

    assert_eq!(store.get(&key).unwrap().as_deref(), Some(&corrected));
    assert_eq!(store.find(old, Scope::Active).unwrap(), None);
    let retired = store.find(old, Scope::History).unwrap().unwrap();
    assert_eq!(retired.superseded_by, Some(new));
    assert_eq!(store.len().unwrap(), 2);
    assert_eq!(store.active_len().unwrap(), 1);

    let history = store.history(old).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].new, new);
    assert_eq!(history[0].reason.as_deref(), Some("typo in source"));
}

#[test]
fn test_supersede_twice_fails() {
    let store = InMemoryStore::new();
    let old = store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    let new = store.supersede(old, record("ResNet50", "SPR", 76.25), None).unwrap();

    let err = store.supersede(old, record("ResNet50", "SPR", 76.3), None).unwrap_err();

    assert_eq!(err, StoreError::AlreadySuperseded { id: old, by: new });
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn test_supersede_unknown_id() {
    let store = InMemoryStore::new();
    let err = store.supersede(RecordId(9), record("ResNet50", "SPR", 76.2), None).unwrap_err();

    assert_eq!(err, StoreError::RecordNotFound(RecordId(9)));
    assert!(store.is_empty().unwrap());
}

#[test]
fn test_supersede_collision_leaves_store_unchanged() {
    let store = InMemoryStore::new();
    let spr = store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    let icx = store.insert(record("ResNet50", "ICX", 76.1)).unwrap();

    // Correction of the SPR row that lands on the ICX key
    let err = store.supersede(spr, record("ResNet50", "ICX", 76.0), None).unwrap_err();

    assert!(matches!(err, StoreError::DuplicateRecord { existing, .. } if existing == icx));
    assert!(store.find(spr, Scope::Active).unwrap().is_some());
    assert_eq!(store.len().unwrap(), 2);
    assert!(store.history(spr).unwrap().is_empty());
}

#[test]
fn test_supersede_may_change_key() {
    let store = InMemoryStore::new();
    let old = store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    let moved = record("ResNet50", "ICX", 76.2);

    store.supersede(old, moved.clone(), None).unwrap();

    assert_eq!(store.get(&record("ResNet50", "SPR", 76.2).key()).unwrap(), None);
    assert!(store.get(&moved.key()).unwrap().is_some());
}

#[test]
fn test_query_by_subject() {
    let store = InMemoryStore::new();
    store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    store.insert(record("BERT", "SPR", 88.0)).unwrap();

    let subjects: Vec<_> = store
        .query(RecordFilter::new().subject("BERT"))
        .iter()
        .unwrap()
        .map(|entry| entry.record.subject().to_string())
        .collect();

    assert_eq!(subjects, vec!["BERT"]);
}

#[test]
fn test_query_by_family_and_hardware() {
    let store = InMemoryStore::new();
    store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    store.insert(record("ResNet50", "ICX", 76.1)).unwrap();
    store.insert(record("BERT", "SPR", 88.0)).unwrap();

    let filter = RecordFilter::new()
        .technique(TechniqueFamily::Quantization)
        .hardware(HardwareSelector::Exact(HardwareContext::processor("SPR").unwrap()));
    assert_eq!(store.query(filter).count().unwrap(), 2);

    let filter = RecordFilter::new()
        .technique(TechniqueFamily::Pruning)
        .hardware(HardwareSelector::Default);
    assert_eq!(store.query(filter).count().unwrap(), 0);
}

#[test]
fn test_query_by_partial_hardware() {
    let store = InMemoryStore::new();
    store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    let with_provider = validate(
        &RawCandidate::new()
            .subject("BERT")
            .technique("int8")
            .processor("SPR")
            .execution_provider("CPUExecutionProvider")
            .baseline("accuracy", 90.0)
            .optimized("accuracy", 89.5),
    )
    .unwrap();
    store.insert(with_provider).unwrap();

    let exact = RecordFilter::new()
        .technique(TechniqueFamily::Quantization)
        .hardware(HardwareSelector::Exact(HardwareContext::processor("SPR").unwrap()));
    assert_eq!(store.query(exact).count().unwrap(), 1);

    let partial = RecordFilter::new()
        .technique(TechniqueFamily::Quantization)
        .hardware(HardwareSelector::Partial(HardwareContext::processor("SPR").unwrap()));
    assert_eq!(store.query(partial).count().unwrap(), 2);
}

#[test]
fn test_query_scope() {
    let store = InMemoryStore::new();
    let old = store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    store.supersede(old, record("ResNet50", "SPR", 76.25), None).unwrap();

    let active = store.query(RecordFilter::new().subject("ResNet50"));
    let all = store.query(RecordFilter::new().subject("ResNet50").scope(Scope::History));

    assert_eq!(active.count().unwrap(), 1);
    assert_eq!(all.count().unwrap(), 2);
}

#[test]
fn test_query_is_restartable() {
    let store = InMemoryStore::new();
    store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    let query = store.query(RecordFilter::new());

    assert_eq!(query.iter().unwrap().count(), 1);
    assert_eq!(query.iter().unwrap().count(), 1);

    store.insert(record("BERT", "SPR", 88.0)).unwrap();
    assert_eq!(query.iter().unwrap().count(), 2);
}

#[test]
fn test_query_status_filter() {
    let store = InMemoryStore::new();
    store.insert(record("ResNet50", "SPR", 76.2)).unwrap();
    let pending = validate(&RawCandidate::new().subject("Llama-2-7b").technique("woq").pending())
        .unwrap();
    store.insert(pending).unwrap();

    let filter = RecordFilter::new().status(RecordStatus::Pending);
    let found: Vec<_> = store.query(filter).iter().unwrap().collect();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].record.subject(), "Llama-2-7b");
}

#[test]
fn test_poisoned_lock_surfaces_error() {
    let store = std::sync::Arc::new(InMemoryStore::new());
    let poisoner = std::sync::Arc::clone(&store);
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.state.write().unwrap();
        panic!("poison the lock");
    })
    .join();

    assert!(matches!(store.len(), Err(StoreError::LockPoisoned(_))));
    assert!(matches!(
        store.insert(record("ResNet50", "SPR", 76.2)),
        Err(StoreError::LockPoisoned(_))
    ));
}
