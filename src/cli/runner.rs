use serde_json::json;
use std::fs::File;

use super::command::Command;
use crate::ShelterDb;
use crate::errors::DbError;
use crate::import::{ImportOptions, import_csv};
use crate::query::parse_query_json;

/// Executes one command against an open database and returns its JSON
/// output. Everything the UI boundary receives is a JSON-serializable
/// scalar.
pub fn run(db: &ShelterDb, cmd: Command) -> Result<String, DbError> {
    match cmd {
        Command::Import { file } => {
            let reader = File::open(file)?;
            let report = import_csv(db.manager().backend(), reader, &ImportOptions::default())?;
            Ok(json!({"inserted": report.inserted, "skipped": report.skipped}).to_string())
        }
        Command::Table { filter, refresh } => {
            let view = db.dashboard()?;
            if refresh {
                view.refresh()?;
            }
            let table = view.filtered(filter.as_deref().unwrap_or(""))?;
            Ok(serde_json::to_string(&table.to_records())?)
        }
        Command::Breeds { filter } => {
            let view = db.dashboard()?;
            let table = view.filtered(filter.as_deref().unwrap_or(""))?;
            let counts: Vec<_> = crate::dashboard::breed_counts(&table)
                .into_iter()
                .map(|(breed, count)| json!({"breed": breed, "count": count}))
                .collect();
            Ok(serde_json::to_string(&counts)?)
        }
        Command::Marker { filter, row } => {
            let view = db.dashboard()?;
            let table = view.filtered(filter.as_deref().unwrap_or(""))?;
            let marker = crate::dashboard::map_marker(&table, row);
            Ok(serde_json::to_string(&marker)?)
        }
        Command::Filters => Ok(serde_json::to_string(&db.catalog().names())?),
        Command::Count { query_json } => {
            let query = parse_query_json(&query_json)?;
            let n = db.manager().backend().count(&query)?;
            Ok(json!({"count": n}).to_string())
        }
    }
}
