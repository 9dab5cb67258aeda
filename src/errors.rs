use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    #[error("store fault: {0}")]
    Store(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("BSON: {0}")]
    Bson(#[from] bson::error::Error),
}
