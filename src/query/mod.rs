mod eval;
mod types;
mod wire;

pub use eval::{compare_bson, compare_docs, numeric, project_fields, values_equal};
pub use types::{Constraint, Order, Projection, Query, ReadOptions, SortSpec};
pub use wire::parse_query_json;
