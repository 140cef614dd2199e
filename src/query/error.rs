//! Validation errors for query construction.

use thiserror::Error;

use super::ast::Operator;

/// Result type for query construction.
pub type BuildResult<T> = Result<T, QueryError>;

/// Errors raised while compiling filter specs, normalizing time ranges, or
/// finalizing a query.
///
/// Messages name the offending key and, where the shape is easy to get
/// wrong, carry a corrective example inline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Filter spec was not a JSON object.
    #[error("Filter must be an object. Example: {{\"op\": \"eq\", \"field\": \"device_type\", \"value\": \"mobile\"}}")]
    FilterNotObject,

    /// Filter node had no `op` key.
    #[error("Missing required key 'op' in filter. Example: {{\"op\": \"eq\", \"field\": \"device_type\", \"value\": \"mobile\"}}")]
    MissingOperator,

    /// Operator not in the supported set.
    #[error("Invalid operator '{0}'. Supported: eq, neq, lt, lte, gt, gte, in, nin, ilike, nilike, and, or")]
    InvalidOperator(String),

    /// Boolean node without nested conditions.
    #[error("For '{op}' operator, provide 'conditions' (a list of nested filters). Example: {{\"op\": \"{op}\", \"conditions\": [{{...}}, {{...}}]}}")]
    MissingConditions { op: Operator },

    /// `conditions` was present but not a list.
    #[error("'conditions' must be a list for '{op}' operator")]
    ConditionsNotList { op: Operator },

    /// Comparison or membership node without a `field`.
    #[error("Missing 'field' key for '{op}' operator")]
    MissingField { op: Operator },

    /// `field` was present but not a string.
    #[error("'field' must be a string for '{op}' operator")]
    FieldNotString { op: Operator },

    /// Membership node without `values`. Singular `value` is the common
    /// mistake here, so the message spells out the difference.
    #[error("For '{op}' operator, use 'values' (list) not 'value'. Example: {{\"op\": \"{op}\", \"field\": \"region\", \"values\": [\"US\", \"GB\"]}}")]
    MissingValues { op: Operator },

    /// `values` was present but not a list.
    #[error("'values' must be a list for '{op}' operator")]
    ValuesNotList { op: Operator },

    /// Comparison node without a `value`.
    #[error("Missing 'value' key for '{op}' operator. Example: {{\"op\": \"{op}\", \"field\": \"clicks\", \"value\": 100}}")]
    MissingValue { op: Operator },

    /// Time range spec was not a JSON object.
    #[error("Time range must be an object")]
    TimeRangeNotObject,

    /// None of the three range shapes was present.
    #[error("Time range requires one of: (start+end), iso_duration, or expression. Examples: absolute {{\"start\": \"2024-01-01\", \"end\": \"2024-01-31\"}}; relative {{\"iso_duration\": \"P7D\"}}; expression {{\"expression\": \"P7D\"}}")]
    EmptyTimeRange,

    /// More than one range shape was present.
    #[error("Time range cannot combine multiple types. Use only one of: (start+end), iso_duration, or expression")]
    ConflictingTimeRange,

    /// Absolute shape with only one of `start`/`end`.
    #[error("Absolute time range requires both 'start' and 'end'. Example: {{\"start\": \"2024-01-01\", \"end\": \"2024-01-31\"}}")]
    IncompleteAbsoluteRange,

    /// `start` or `end` carried a non-string value.
    #[error("'{key}' must be an ISO-8601 string, a date, or a date-time. Got: {got}")]
    InvalidTimeBound { key: &'static str, got: &'static str },

    /// A key that must hold a string held something else.
    #[error("'{key}' must be a string. Got: {got}")]
    ExpectedString { key: &'static str, got: &'static str },

    /// `round_to_grain` outside the enumerated set.
    #[error("Invalid grain '{0}'. Supported: millisecond, second, minute, hour, day, week, month, quarter, year")]
    InvalidGrain(String),

    /// Dimension compute spec with an unrecognized key.
    #[error("Unsupported dimension compute type. Supported: time_floor. Got: {0:?}")]
    UnsupportedDimensionCompute(Vec<String>),

    /// Measure compute spec with an unrecognized key.
    #[error("Unsupported measure compute type. Supported: count_distinct. Got: {0:?}")]
    UnsupportedMeasureCompute(Vec<String>),

    /// Compute spec was not a JSON object.
    #[error("Compute spec must be an object. Example: {{\"time_floor\": {{\"dimension\": \"ts\", \"grain\": \"day\"}}}}")]
    ComputeNotObject,

    /// `time_floor` payload missing or malformed.
    #[error("'time_floor' compute requires 'dimension' (string) and 'grain'. Example: {{\"time_floor\": {{\"dimension\": \"ts\", \"grain\": \"day\"}}}}")]
    InvalidTimeFloorCompute,

    /// `count_distinct` payload missing or malformed.
    #[error("'count_distinct' compute requires 'dimension' (string). Example: {{\"count_distinct\": {{\"dimension\": \"user_id\"}}}}")]
    InvalidCountDistinctCompute,

    /// `build()` called before `metrics_view()`.
    #[error("metrics_view is required. Call .metrics_view(name) first.")]
    MissingMetricsView,
}
