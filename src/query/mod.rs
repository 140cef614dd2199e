//! Query construction: the typed AST, the mapping compilers, and the builder.
//!
//! This module turns caller input into the immutable [`MetricsQuery`] request
//! body:
//!
//! - [`ast`] - typed AST matching the service wire format
//! - [`filter`] - filter mapping → [`Expression`] compiler
//! - [`time_range`] - time range mapping → [`TimeRange`] normalizer
//! - [`builder`] - fluent [`QueryBuilder`] accumulator
//! - [`error`] - validation errors with corrective examples
//!
//! ```ignore
//! use rill_client::query::QueryBuilder;
//! use serde_json::json;
//!
//! let query = QueryBuilder::new()
//!     .metrics_view("bids_metrics")
//!     .dimensions(["campaign_name"])
//!     .measures(["overall_spend", "total_bids"])
//!     .time_range(&json!({"iso_duration": "P7D"}))?
//!     .sort("overall_spend", true)
//!     .build()?;
//! ```

pub mod ast;
pub mod builder;
pub mod error;
pub mod filter;
pub mod time_range;

pub use ast::{
    Condition, Dimension, DimensionCompute, Expression, Measure, MeasureCompute, MetricsQuery,
    MetricsSqlQuery, Operator, QueryResult, Sort, SqlQuery, Subquery, TimeGrain, TimeRange,
};
pub use builder::QueryBuilder;
pub use error::{BuildResult, QueryError};
pub use filter::compile_filter;
pub use time_range::{normalize_time_range, TimeBound};

use serde_json::Value;

/// Render a JSON value for an error message: strings bare, everything else
/// as JSON text.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The JSON type name of a value, for "expected X, got Y" messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
