use bson::{Bson, Document as BsonDocument};
use std::cmp::Ordering;

use super::types::{Constraint, MAX_IN_SET, MAX_SORT_FIELDS, Query, SortSpec};
use crate::types::ID_FIELD;

impl Query {
    /// Evaluates the conjunction against one record. A missing field fails
    /// any constraint placed on it.
    #[must_use]
    pub fn matches(&self, doc: &BsonDocument) -> bool {
        self.fields().all(|(field, c)| match c {
            Constraint::Eq(v) => doc.get(field).is_some_and(|x| values_equal(x, v)),
            Constraint::In(vs) => doc
                .get(field)
                .is_some_and(|x| vs.iter().take(MAX_IN_SET).any(|v| values_equal(x, v))),
            Constraint::Range { gte, lte } => doc.get(field).is_some_and(|x| {
                gte.as_ref().is_none_or(|b| compare_bson(x, b) != Ordering::Less)
                    && lte.as_ref().is_none_or(|b| compare_bson(x, b) != Ordering::Greater)
            }),
        })
    }
}

/// Equality with numeric coercion: `Int32(26)` equals `Double(26.0)`.
/// The store does not guarantee attribute types, so a query built with
/// integers must still match records ingested as doubles.
#[must_use]
pub fn values_equal(a: &Bson, b: &Bson) -> bool {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Numeric view of a BSON value, if it has one.
#[must_use]
pub fn numeric(v: &Bson) -> Option<f64> {
    match v {
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

pub fn compare_bson(a: &Bson, b: &Bson) -> Ordering {
    if let (Some(x), Some(y)) = (numeric(a), numeric(b)) {
        return x.total_cmp(&y);
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => x.cmp(y),
        (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Bson) -> u8 {
    match v {
        Bson::Null => 0,
        Bson::Boolean(_) => 1,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => 2,
        Bson::String(_) => 3,
        Bson::Array(_) => 4,
        Bson::Document(_) => 5,
        Bson::ObjectId(_) => 6,
        _ => 7,
    }
}

/// Multi-field document comparison for server-side sorts. Missing fields
/// order before present ones.
pub fn compare_docs(a: &BsonDocument, b: &BsonDocument, sort: &[SortSpec]) -> Ordering {
    for s in sort.iter().take(MAX_SORT_FIELDS) {
        let va = a.get(&s.field);
        let vb = b.get(&s.field);
        let ord = match (va, vb) {
            (Some(x), Some(y)) => compare_bson(x, y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return if matches!(s.order, super::types::Order::Asc) { ord } else { ord.reverse() };
        }
    }
    Ordering::Equal
}

/// Keeps the requested fields. The identifier is always carried through,
/// requested or not.
#[must_use]
pub fn project_fields(doc: &BsonDocument, fields: &[String]) -> BsonDocument {
    let mut out = BsonDocument::new();
    if let Some(id) = doc.get(ID_FIELD) {
        out.insert(ID_FIELD, id.clone());
    }
    for f in fields {
        if f == ID_FIELD {
            continue;
        }
        if let Some(v) = doc.get(f) {
            out.insert(f.clone(), v.clone());
        }
    }
    out
}
