use std::path::PathBuf;

/// Programmatic commands, decoupled from argument parsing so they can be
/// driven from tests as well as the binary.
pub enum Command {
    /// Load a shelter outcomes CSV into the store.
    Import { file: PathBuf },
    /// Print the (optionally filtered) display table as JSON records.
    Table { filter: Option<String>, refresh: bool },
    /// Print breed counts for the chart.
    Breeds { filter: Option<String> },
    /// Print the map marker for a selected row.
    Marker { filter: Option<String>, row: usize },
    /// List the registered filter names.
    Filters,
    /// Count records matching an ad-hoc JSON query.
    Count { query_json: String },
}
