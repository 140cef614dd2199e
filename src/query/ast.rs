//! Typed query AST mirroring the metrics service wire format.
//!
//! [`MetricsQuery`] is the request body for the metrics endpoint. The nested
//! unions serialize untagged so the emitted JSON matches the service schema
//! exactly: a field reference is `{"name": ...}`, a literal is `{"val": ...}`,
//! a nested condition is `{"cond": {...}}`. Optional fields are skipped when
//! unset.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::time_range::TimeBound;

// =============================================================================
// Operators and grains
// =============================================================================

/// Filter operators accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Nin,
    Ilike,
    Nilike,
    And,
    Or,
}

impl Operator {
    /// Every operator, in documentation order.
    pub const ALL: [Operator; 12] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
        Operator::In,
        Operator::Nin,
        Operator::Ilike,
        Operator::Nilike,
        Operator::And,
        Operator::Or,
    ];

    /// Parse the wire spelling of an operator.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "eq" => Some(Operator::Eq),
            "neq" => Some(Operator::Neq),
            "lt" => Some(Operator::Lt),
            "lte" => Some(Operator::Lte),
            "gt" => Some(Operator::Gt),
            "gte" => Some(Operator::Gte),
            "in" => Some(Operator::In),
            "nin" => Some(Operator::Nin),
            "ilike" => Some(Operator::Ilike),
            "nilike" => Some(Operator::Nilike),
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::In => "in",
            Operator::Nin => "nin",
            Operator::Ilike => "ilike",
            Operator::Nilike => "nilike",
            Operator::And => "and",
            Operator::Or => "or",
        }
    }

    /// Boolean combinators nest further conditions instead of a field.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }

    /// Membership operators compare a field against a list of values.
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::Nin)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time grains for rounding and time-floor computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeGrain {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeGrain {
    /// Parse the wire spelling of a grain.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "millisecond" => Some(TimeGrain::Millisecond),
            "second" => Some(TimeGrain::Second),
            "minute" => Some(TimeGrain::Minute),
            "hour" => Some(TimeGrain::Hour),
            "day" => Some(TimeGrain::Day),
            "week" => Some(TimeGrain::Week),
            "month" => Some(TimeGrain::Month),
            "quarter" => Some(TimeGrain::Quarter),
            "year" => Some(TimeGrain::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeGrain::Millisecond => "millisecond",
            TimeGrain::Second => "second",
            TimeGrain::Minute => "minute",
            TimeGrain::Hour => "hour",
            TimeGrain::Day => "day",
            TimeGrain::Week => "week",
            TimeGrain::Month => "month",
            TimeGrain::Quarter => "quarter",
            TimeGrain::Year => "year",
        }
    }
}

impl fmt::Display for TimeGrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Filter expressions
// =============================================================================

/// A filter expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    /// Reference to a dimension or measure by name.
    Field { name: String },
    /// A literal value (scalar or list).
    Value { val: Value },
    /// A nested condition.
    Cond { cond: Condition },
    /// A correlated subquery.
    Subquery { subquery: Box<Subquery> },
}

impl Expression {
    pub fn field(name: impl Into<String>) -> Self {
        Expression::Field { name: name.into() }
    }

    pub fn value(val: impl Into<Value>) -> Self {
        Expression::Value { val: val.into() }
    }

    pub fn cond(cond: Condition) -> Self {
        Expression::Cond { cond }
    }

    pub fn subquery(subquery: Subquery) -> Self {
        Expression::Subquery {
            subquery: Box::new(subquery),
        }
    }
}

/// An operator applied to a list of operand expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub op: Operator,
    pub exprs: Vec<Expression>,
}

impl Condition {
    pub fn new(op: Operator, exprs: Vec<Expression>) -> Self {
        Self { op, exprs }
    }

    /// Condition comparing a named field against a literal.
    pub fn compare(op: Operator, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op,
            exprs: vec![Expression::field(field), Expression::value(value)],
        }
    }
}

/// A correlated subquery usable as a filter operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subquery {
    pub dimension: Dimension,
    pub measures: Vec<Measure>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub having: Option<Expression>,
}

// =============================================================================
// Dimensions and measures
// =============================================================================

/// A dimension selection, optionally derived through a compute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<DimensionCompute>,
}

impl Dimension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compute: None,
        }
    }

    /// Dimension derived by flooring a time column to a grain.
    pub fn time_floor(
        name: impl Into<String>,
        dimension: impl Into<String>,
        grain: TimeGrain,
    ) -> Self {
        Self {
            name: name.into(),
            compute: Some(DimensionCompute::TimeFloor {
                dimension: dimension.into(),
                grain,
            }),
        }
    }
}

/// Server-side dimension computations.
///
/// Serializes externally tagged: `{"time_floor": {"dimension": ..., "grain": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionCompute {
    TimeFloor { dimension: String, grain: TimeGrain },
}

/// A measure selection, optionally derived through a compute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<MeasureCompute>,
}

impl Measure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compute: None,
        }
    }

    /// Measure counting distinct values of a dimension.
    pub fn count_distinct(name: impl Into<String>, dimension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compute: Some(MeasureCompute::CountDistinct {
                dimension: dimension.into(),
            }),
        }
    }
}

/// Server-side measure computations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureCompute {
    Count(bool),
    CountDistinct {
        dimension: String,
    },
    ComparisonValue {
        measure: String,
    },
    ComparisonDelta {
        measure: String,
    },
    ComparisonRatio {
        measure: String,
    },
    PercentOfTotal {
        measure: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        total: Option<f64>,
    },
    Uri {
        dimension: String,
    },
}

// =============================================================================
// Time ranges
// =============================================================================

/// A query time range. Exactly one of the three shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimeRange {
    /// Fixed bounds, RFC 3339 strings or plain dates.
    Absolute { start: String, end: String },
    /// A rolling window, e.g. `P7D`, optionally offset and rounded.
    Relative {
        iso_duration: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        iso_offset: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        round_to_grain: Option<TimeGrain>,
    },
    /// An opaque range token resolved server side, e.g. `rill-WTD`.
    Expression { expression: String },
}

impl TimeRange {
    /// Absolute range between two typed bounds.
    pub fn absolute(start: impl Into<TimeBound>, end: impl Into<TimeBound>) -> Self {
        TimeRange::Absolute {
            start: start.into().into_iso(),
            end: end.into().into_iso(),
        }
    }

    /// Rolling range over an ISO-8601 duration.
    pub fn duration(iso: impl Into<String>) -> Self {
        TimeRange::Relative {
            iso_duration: iso.into(),
            iso_offset: None,
            round_to_grain: None,
        }
    }

    /// Range from an opaque server-side expression.
    pub fn expression(expression: impl Into<String>) -> Self {
        TimeRange::Expression {
            expression: expression.into(),
        }
    }

    /// The ISO duration, for relative ranges.
    pub fn iso_duration(&self) -> Option<&str> {
        match self {
            TimeRange::Relative { iso_duration, .. } => Some(iso_duration),
            _ => None,
        }
    }

    /// Start and end, for absolute ranges.
    pub fn bounds(&self) -> Option<(&str, &str)> {
        match self {
            TimeRange::Absolute { start, end } => Some((start, end)),
            _ => None,
        }
    }

    /// The opaque expression, for expression ranges.
    pub fn range_expression(&self) -> Option<&str> {
        match self {
            TimeRange::Expression { expression } => Some(expression),
            _ => None,
        }
    }
}

// =============================================================================
// Sort and the query roots
// =============================================================================

/// Sort key with direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    pub name: String,
    pub desc: bool,
}

impl Sort {
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: false,
        }
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: true,
        }
    }
}

/// Request body for the metrics query endpoint.
///
/// Construct directly (all fields are public) or through
/// [`QueryBuilder`](super::QueryBuilder). Unset fields are omitted from the
/// serialized body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsQuery {
    pub metrics_view: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<Dimension>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measures: Option<Vec<Measure>>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub having: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_time_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Sort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_on: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_display_names: Option<bool>,
}

impl MetricsQuery {
    /// A query against the named metrics view with nothing else set.
    pub fn new(metrics_view: impl Into<String>) -> Self {
        Self {
            metrics_view: metrics_view.into(),
            ..Default::default()
        }
    }
}

/// Request body for the metrics SQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSqlQuery {
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_where: Option<Expression>,
}

impl MetricsSqlQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            additional_where: None,
        }
    }
}

/// Request body for the raw SQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlQuery {
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector: Option<String>,
}

impl SqlQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            connector: None,
        }
    }
}

/// Row set returned by the query endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub data: Vec<serde_json::Map<String, Value>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
