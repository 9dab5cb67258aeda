//! CSV ingestion for the shelter outcomes dataset.

use bson::{Bson, Document as BsonDocument};
use std::io::Read;

use crate::errors::DbError;
use crate::store::StoreBackend;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Record malformed rows in the report instead of failing the import.
    pub skip_errors: bool,
    /// Infer int/float/bool scalars from field text.
    pub type_infer: bool,
    /// Log progress every N rows.
    pub progress_every: Option<usize>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { skip_errors: true, type_infer: true, progress_every: Some(10_000) }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: u64,
    pub skipped: u64,
}

/// Streams CSV rows into the store. The header row names the record fields.
///
/// # Errors
/// `Csv` for a malformed row when `skip_errors` is off; `Store` if an insert
/// fails.
pub fn import_csv<R: Read>(
    backend: &dyn StoreBackend,
    reader: R,
    opts: &ImportOptions,
) -> Result<ImportReport, DbError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers: Vec<String> =
        rdr.headers()?.iter().map(std::string::ToString::to_string).collect();
    let mut report = ImportReport::default();
    let mut row_no: usize = 0;
    for rec in rdr.records() {
        row_no += 1;
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                if opts.skip_errors {
                    log::warn!("skipping malformed csv row {row_no}: {e}");
                    report.skipped += 1;
                    continue;
                }
                return Err(e.into());
            }
        };
        let mut doc = BsonDocument::new();
        for (i, field) in rec.iter().enumerate() {
            let key = headers.get(i).cloned().unwrap_or_else(|| format!("field_{i}"));
            doc.insert(key, field_to_bson(field, opts.type_infer));
        }
        backend.insert_one(doc)?;
        report.inserted += 1;
        if let Some(n) = opts.progress_every {
            if row_no % n == 0 {
                log::info!("imported {} records (csv)", report.inserted);
            }
        }
    }
    Ok(report)
}

fn field_to_bson(field: &str, infer: bool) -> Bson {
    if !infer {
        return Bson::String(field.to_string());
    }
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Bson::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Bson::Int64(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Bson::Double(f);
    }
    match trimmed.to_lowercase().as_str() {
        "true" => Bson::Boolean(true),
        "false" => Bson::Boolean(false),
        _ => Bson::String(field.to_string()),
    }
}
