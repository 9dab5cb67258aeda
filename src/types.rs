//! Field names shared across the data layer.

/// Identifier field assigned by the store. Always retrievable, never shown raw.
pub const ID_FIELD: &str = "_id";

pub const FIELD_NAME: &str = "name";
pub const FIELD_BREED: &str = "breed";
pub const FIELD_ANIMAL_TYPE: &str = "animal_type";
pub const FIELD_SEX: &str = "sex_upon_outcome";
pub const FIELD_AGE_WEEKS: &str = "age_upon_outcome_in_weeks";
pub const FIELD_LAT: &str = "location_lat";
pub const FIELD_LONG: &str = "location_long";

/// Columns coerced to numbers during table cleanup.
pub const NUMERIC_FIELDS: [&str; 3] = [FIELD_AGE_WEEKS, FIELD_LAT, FIELD_LONG];

/// Columns trimmed and coerced to strings during table cleanup.
pub const TEXT_FIELDS: [&str; 4] = [FIELD_NAME, FIELD_BREED, FIELD_ANIMAL_TYPE, FIELD_SEX];

/// The field set the dashboard actually displays. Projecting only these
/// reduces transfer volume.
pub const REQUIRED_FIELDS: [&str; 7] = [
    FIELD_NAME,
    FIELD_BREED,
    FIELD_ANIMAL_TYPE,
    FIELD_SEX,
    FIELD_AGE_WEEKS,
    FIELD_LAT,
    FIELD_LONG,
];
