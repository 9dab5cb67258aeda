use bson::doc;
use shelterlite::manager::AnimalManager;
use shelterlite::store::MemoryBackend;
use shelterlite::table::{Cell, DataTable};

#[test]
fn non_numeric_age_becomes_missing_and_other_rows_survive() {
    let manager = AnimalManager::new(Box::new(MemoryBackend::new()));
    manager
        .create(&doc! {"name": "Rex", "age_upon_outcome_in_weeks": "unknown"})
        .unwrap();
    manager.create(&doc! {"name": "Bella", "age_upon_outcome_in_weeks": 52}).unwrap();

    let table = manager.read_table(None, None, false).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.cell(0, "age_upon_outcome_in_weeks").unwrap().is_missing());
    assert_eq!(table.cell(1, "age_upon_outcome_in_weeks").unwrap().as_f64(), Some(52.0));
}

#[test]
fn identifier_is_stringified_then_dropped() {
    let manager = AnimalManager::new(Box::new(MemoryBackend::new()));
    manager.create(&doc! {"name": "Rex"}).unwrap();

    let table = manager.read_table(None, None, false).unwrap();
    assert!(!table.columns.iter().any(|c| c == "_id"));
    assert_eq!(table.cell(0, "name").unwrap().as_str(), Some("Rex"));
}

#[test]
fn text_fields_are_trimmed_and_stringified() {
    let manager = AnimalManager::new(Box::new(MemoryBackend::new()));
    manager
        .create(&doc! {"name": "  Rex  ", "breed": " Beagle", "animal_type": "Dog", "color": "  tan "})
        .unwrap();

    let table = manager.read_table(None, None, false).unwrap();
    assert_eq!(table.cell(0, "name").unwrap().as_str(), Some("Rex"));
    assert_eq!(table.cell(0, "breed").unwrap().as_str(), Some("Beagle"));
    // Only the named text columns are trimmed
    assert_eq!(table.cell(0, "color").unwrap().as_str(), Some("  tan "));
}

#[test]
fn coordinates_are_coerced_from_string_values() {
    let manager = AnimalManager::new(Box::new(MemoryBackend::new()));
    manager
        .create(&doc! {"name": "Rex", "location_lat": "30.5", "location_long": -97.3})
        .unwrap();

    let table = manager.read_table(None, None, false).unwrap();
    assert_eq!(table.cell(0, "location_lat").unwrap().as_f64(), Some(30.5));
    assert_eq!(table.cell(0, "location_long").unwrap().as_f64(), Some(-97.3));
}

#[test]
fn projection_limits_table_columns() {
    let manager = AnimalManager::new(Box::new(MemoryBackend::new()));
    manager
        .create(&doc! {"name": "Rex", "breed": "Beagle", "outcome_type": "Adoption"})
        .unwrap();

    let fields = ["name", "breed"];
    let table = manager.read_table(None, Some(&fields), false).unwrap();
    assert_eq!(table.columns, vec!["name", "breed"]);
}

#[test]
fn table_serializes_to_json_scalars() {
    let table = DataTable::from_records(&[doc! {
        "name": "Rex",
        "age_upon_outcome_in_weeks": 52,
        "adopted": true,
        "note": bson::Bson::Null,
    }]);
    let records = table.to_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], serde_json::json!("Rex"));
    assert_eq!(records[0]["age_upon_outcome_in_weeks"], serde_json::json!(52));
    assert_eq!(records[0]["adopted"], serde_json::json!(true));
    assert_eq!(records[0]["note"], serde_json::Value::Null);
}

#[test]
fn empty_record_set_yields_empty_table() {
    let table = DataTable::from_records(&[]).clean();
    assert!(table.is_empty());
    assert!(table.columns.is_empty());
    assert_eq!(Vec::<(String, u64)>::new(), table.value_counts("breed"));
}

#[test]
fn cell_accessors_expose_scalar_views() {
    assert_eq!(Cell::Int(5).as_f64(), Some(5.0));
    assert_eq!(Cell::Num(2.5).as_f64(), Some(2.5));
    assert_eq!(Cell::Str("x".into()).as_str(), Some("x"));
    assert!(Cell::Missing.is_missing());
    assert_eq!(Cell::Str("x".into()).as_f64(), None);
}
