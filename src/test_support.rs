#![cfg(test)]

// Tiny test-only record builders.

use bson::{Document as BsonDocument, doc};

/// A dog record with the attributes the filter rules look at.
pub fn dog(breed: &str, sex: &str, age_weeks: i64) -> BsonDocument {
    doc! {
        "animal_type": "Dog",
        "breed": breed,
        "sex_upon_outcome": sex,
        "age_upon_outcome_in_weeks": age_weeks,
    }
}

/// A fully populated record as the dashboard projects it.
pub fn animal(name: &str, breed: &str, sex: &str, age_weeks: i64, lat: f64, long: f64) -> BsonDocument {
    doc! {
        "name": name,
        "breed": breed,
        "animal_type": "Dog",
        "sex_upon_outcome": sex,
        "age_upon_outcome_in_weeks": age_weeks,
        "location_lat": lat,
        "location_long": long,
    }
}
