//! Fluent builder for [`MetricsQuery`].
//!
//! Setters consume and return the builder. Dimensions, measures, and sorts
//! accumulate across calls; scalar setters and the compiled filter/range
//! setters replace on repeat. Setters that run a compiler return `Result`
//! so malformed specs fail at the call site rather than at `build()`.
//!
//! ```ignore
//! let query = QueryBuilder::new()
//!     .metrics_view("bids_metrics")
//!     .dimensions(["campaign_name", "device_type"])
//!     .measure("overall_spend")
//!     .filter(&json!({"op": "eq", "field": "device_type", "value": "mobile"}))?
//!     .time_range(&json!({"iso_duration": "P7D"}))?
//!     .sort("overall_spend", true)
//!     .limit(20)
//!     .build()?;
//! ```

use serde_json::Value;

use super::ast::{
    Dimension, DimensionCompute, Expression, Measure, MeasureCompute, MetricsQuery, Sort,
    TimeGrain, TimeRange,
};
use super::display_value;
use super::error::QueryError;
use super::filter::compile_filter;
use super::time_range::normalize_time_range;

/// Accumulates query parts and produces an immutable [`MetricsQuery`].
#[derive(Debug, Clone, Default)]
#[must_use = "builders have no effect until build() is called"]
pub struct QueryBuilder {
    metrics_view: Option<String>,
    dimensions: Vec<Dimension>,
    measures: Vec<Measure>,
    where_clause: Option<Expression>,
    having: Option<Expression>,
    time_range: Option<TimeRange>,
    comparison_time_range: Option<TimeRange>,
    sort: Vec<Sort>,
    limit: Option<u64>,
    offset: Option<u64>,
    pivot_on: Vec<String>,
    time_zone: Option<String>,
    use_display_names: Option<bool>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metrics view to query. Required before `build()`.
    pub fn metrics_view(mut self, name: impl Into<String>) -> Self {
        self.metrics_view = Some(name.into());
        self
    }

    /// Add a single dimension by name.
    pub fn dimension(mut self, name: impl Into<String>) -> Self {
        self.dimensions.push(Dimension::new(name));
        self
    }

    /// Add a dimension derived through a compute spec.
    ///
    /// Supported spec: `{"time_floor": {"dimension": ..., "grain": ...}}`.
    pub fn dimension_with(
        mut self,
        name: impl Into<String>,
        compute: &Value,
    ) -> Result<Self, QueryError> {
        let compute = compile_dimension_compute(compute)?;
        self.dimensions.push(Dimension {
            name: name.into(),
            compute: Some(compute),
        });
        Ok(self)
    }

    /// Add several dimensions by name. Accumulates across calls.
    pub fn dimensions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions
            .extend(names.into_iter().map(Dimension::new));
        self
    }

    /// Add a single measure by name.
    pub fn measure(mut self, name: impl Into<String>) -> Self {
        self.measures.push(Measure::new(name));
        self
    }

    /// Add a measure derived through a compute spec.
    ///
    /// Supported spec: `{"count_distinct": {"dimension": ...}}`.
    pub fn measure_with(
        mut self,
        name: impl Into<String>,
        compute: &Value,
    ) -> Result<Self, QueryError> {
        let compute = compile_measure_compute(compute)?;
        self.measures.push(Measure {
            name: name.into(),
            compute: Some(compute),
        });
        Ok(self)
    }

    /// Add several measures by name. Accumulates across calls.
    pub fn measures<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measures.extend(names.into_iter().map(Measure::new));
        self
    }

    /// Set the `where` filter from a filter mapping. Replaces on repeat.
    pub fn filter(mut self, spec: &Value) -> Result<Self, QueryError> {
        self.where_clause = Some(compile_filter(spec)?);
        Ok(self)
    }

    /// Set the `having` filter from a filter mapping. Replaces on repeat.
    pub fn having(mut self, spec: &Value) -> Result<Self, QueryError> {
        self.having = Some(compile_filter(spec)?);
        Ok(self)
    }

    /// Set the time range from a range mapping. Replaces on repeat.
    pub fn time_range(mut self, spec: &Value) -> Result<Self, QueryError> {
        self.time_range = Some(normalize_time_range(spec)?);
        Ok(self)
    }

    /// Set the comparison time range from a range mapping. Replaces on repeat.
    pub fn comparison_time_range(mut self, spec: &Value) -> Result<Self, QueryError> {
        self.comparison_time_range = Some(normalize_time_range(spec)?);
        Ok(self)
    }

    /// Append a sort key. Accumulates across calls.
    pub fn sort(mut self, name: impl Into<String>, desc: bool) -> Self {
        self.sort.push(Sort {
            name: name.into(),
            desc,
        });
        self
    }

    /// Append several sort keys.
    pub fn sorts<I>(mut self, sorts: I) -> Self
    where
        I: IntoIterator<Item = Sort>,
    {
        self.sort.extend(sorts);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Set the columns to pivot on. Replaces on repeat.
    pub fn pivot_on<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pivot_on = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the IANA time zone for time bucketing.
    pub fn time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = Some(tz.into());
        self
    }

    /// Resolve display names instead of internal names in the result.
    pub fn use_display_names(mut self, enabled: bool) -> Self {
        self.use_display_names = Some(enabled);
        self
    }

    /// Finalize into a [`MetricsQuery`].
    ///
    /// Lists left empty become `None` so they are omitted from the wire
    /// format entirely.
    pub fn build(self) -> Result<MetricsQuery, QueryError> {
        let metrics_view = match self.metrics_view {
            Some(view) if !view.is_empty() => view,
            _ => return Err(QueryError::MissingMetricsView),
        };

        Ok(MetricsQuery {
            metrics_view,
            dimensions: none_if_empty(self.dimensions),
            measures: none_if_empty(self.measures),
            where_clause: self.where_clause,
            having: self.having,
            time_range: self.time_range,
            comparison_time_range: self.comparison_time_range,
            sort: none_if_empty(self.sort),
            limit: self.limit,
            offset: self.offset,
            pivot_on: none_if_empty(self.pivot_on),
            time_zone: self.time_zone,
            use_display_names: self.use_display_names,
        })
    }
}

fn none_if_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

// =============================================================================
// Compute sub-specs
// =============================================================================

fn compile_dimension_compute(spec: &Value) -> Result<DimensionCompute, QueryError> {
    let node = spec.as_object().ok_or(QueryError::ComputeNotObject)?;
    let payload = match node.get("time_floor") {
        Some(payload) => payload,
        None => {
            return Err(QueryError::UnsupportedDimensionCompute(
                node.keys().cloned().collect(),
            ))
        }
    };

    let payload = payload
        .as_object()
        .ok_or(QueryError::InvalidTimeFloorCompute)?;
    let dimension = payload
        .get("dimension")
        .and_then(Value::as_str)
        .ok_or(QueryError::InvalidTimeFloorCompute)?;
    let raw_grain = payload
        .get("grain")
        .ok_or(QueryError::InvalidTimeFloorCompute)?;
    let grain = raw_grain
        .as_str()
        .and_then(TimeGrain::parse)
        .ok_or_else(|| QueryError::InvalidGrain(display_value(raw_grain)))?;

    Ok(DimensionCompute::TimeFloor {
        dimension: dimension.to_string(),
        grain,
    })
}

fn compile_measure_compute(spec: &Value) -> Result<MeasureCompute, QueryError> {
    let node = spec.as_object().ok_or(QueryError::ComputeNotObject)?;
    let payload = match node.get("count_distinct") {
        Some(payload) => payload,
        None => {
            return Err(QueryError::UnsupportedMeasureCompute(
                node.keys().cloned().collect(),
            ))
        }
    };

    let dimension = payload
        .as_object()
        .and_then(|p| p.get("dimension"))
        .and_then(Value::as_str)
        .ok_or(QueryError::InvalidCountDistinctCompute)?;

    Ok(MeasureCompute::CountDistinct {
        dimension: dimension.to_string(),
    })
}
