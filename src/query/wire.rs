//! Mongo-style operator wire shape for queries and projections.
//!
//! A query serializes as `{"breed": {"$in": [..]}, "sex_upon_outcome": "Intact
//! Female", "age_upon_outcome_in_weeks": {"$gte": 26, "$lte": 156}}`; a
//! projection as `{"name": true, "breed": true}`.

use bson::Bson;
use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::types::{Constraint, Projection, Query};
use crate::errors::DbError;

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Eq(v) => v.serialize(serializer),
            Self::In(vs) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$in", vs)?;
                map.end()
            }
            Self::Range { gte, lte } => {
                let len = usize::from(gte.is_some()) + usize::from(lte.is_some());
                let mut map = serializer.serialize_map(Some(len))?;
                if let Some(v) = gte {
                    map.serialize_entry("$gte", v)?;
                }
                if let Some(v) = lte {
                    map.serialize_entry("$lte", v)?;
                }
                map.end()
            }
        }
    }
}

impl Constraint {
    /// Interprets a wire value: an operator document becomes `$in`/range,
    /// anything else is an equality match.
    fn from_wire(value: Bson) -> Result<Self, String> {
        let Bson::Document(d) = &value else {
            return Ok(Self::Eq(value));
        };
        if !d.keys().any(|k| k.starts_with('$')) {
            return Ok(Self::Eq(value));
        }
        let Bson::Document(d) = value else { unreachable!() };
        let mut in_vals: Option<Vec<Bson>> = None;
        let mut gte: Option<Bson> = None;
        let mut lte: Option<Bson> = None;
        for (k, v) in d {
            match k.as_str() {
                "$in" => match v {
                    Bson::Array(a) => in_vals = Some(a),
                    _ => return Err("$in requires an array".to_string()),
                },
                "$gte" => gte = Some(v),
                "$lte" => lte = Some(v),
                other => return Err(format!("unsupported operator: {other}")),
            }
        }
        match in_vals {
            Some(_) if gte.is_some() || lte.is_some() => {
                Err("$in cannot be combined with range operators".to_string())
            }
            Some(vs) => Ok(Self::In(vs)),
            None => Ok(Self::Range { gte, lte }),
        }
    }
}

impl<'de> Deserialize<'de> for Constraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Bson::deserialize(deserializer)?;
        Self::from_wire(value).map_err(D::Error::custom)
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, c) in &self.0 {
            map.serialize_entry(field, c)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, Constraint>::deserialize(deserializer)?;
        Ok(Self(map))
    }
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for field in &self.0 {
            map.serialize_entry(field, &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Projection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, bool>::deserialize(deserializer)?;
        Ok(Self::fields(map.into_iter().filter(|(_, included)| *included).map(|(f, _)| f)))
    }
}

/// # Errors
/// Returns an error if the JSON string cannot be parsed into a query.
pub fn parse_query_json(json: &str) -> Result<Query, DbError> {
    Ok(serde_json::from_str(json)?)
}
