//! Normalizes untyped time range mappings into the typed [`TimeRange`] union.
//!
//! Three mutually exclusive shapes: absolute bounds (`start` + `end`), a
//! rolling ISO-8601 duration (`iso_duration`, optionally with `iso_offset`
//! and `round_to_grain`), or an opaque range expression (`expression`).

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use super::ast::{TimeGrain, TimeRange};
use super::error::QueryError;
use super::{display_value, json_type_name};

// =============================================================================
// Typed bounds
// =============================================================================

/// A point-in-time input for absolute ranges.
///
/// Strings pass through verbatim. Calendar dates anchor to midnight UTC, so
/// `2024-01-01` renders as `2024-01-01T00:00:00+00:00`.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeBound {
    Iso(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl TimeBound {
    /// Render the bound as the string the service accepts.
    pub fn into_iso(self) -> String {
        match self {
            TimeBound::Iso(s) => s,
            TimeBound::Date(d) => Utc
                .from_utc_datetime(&d.and_time(NaiveTime::MIN))
                .to_rfc3339(),
            TimeBound::DateTime(dt) => dt.to_rfc3339(),
        }
    }
}

impl From<&str> for TimeBound {
    fn from(s: &str) -> Self {
        TimeBound::Iso(s.to_string())
    }
}

impl From<String> for TimeBound {
    fn from(s: String) -> Self {
        TimeBound::Iso(s)
    }
}

impl From<NaiveDate> for TimeBound {
    fn from(d: NaiveDate) -> Self {
        TimeBound::Date(d)
    }
}

impl From<DateTime<Utc>> for TimeBound {
    fn from(dt: DateTime<Utc>) -> Self {
        TimeBound::DateTime(dt)
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize a time range mapping into a [`TimeRange`].
///
/// Exactly one of the three shapes must be present. `round_to_grain` is
/// validated whenever present and carried on the relative shape.
pub fn normalize_time_range(spec: &Value) -> Result<TimeRange, QueryError> {
    let node = spec.as_object().ok_or(QueryError::TimeRangeNotObject)?;

    let has_absolute = node.contains_key("start") || node.contains_key("end");
    let has_duration = node.contains_key("iso_duration");
    let has_expression = node.contains_key("expression");

    let specified =
        usize::from(has_absolute) + usize::from(has_duration) + usize::from(has_expression);
    if specified == 0 {
        return Err(QueryError::EmptyTimeRange);
    }
    if specified > 1 {
        return Err(QueryError::ConflictingTimeRange);
    }

    let round_to_grain = match node.get("round_to_grain") {
        Some(raw) => Some(
            raw.as_str()
                .and_then(TimeGrain::parse)
                .ok_or_else(|| QueryError::InvalidGrain(display_value(raw)))?,
        ),
        None => None,
    };

    if has_absolute {
        let (start, end) = match (node.get("start"), node.get("end")) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(QueryError::IncompleteAbsoluteRange),
        };
        return Ok(TimeRange::Absolute {
            start: bound_string("start", start)?,
            end: bound_string("end", end)?,
        });
    }

    if has_duration {
        let iso_duration = string_value("iso_duration", &node["iso_duration"])?;
        let iso_offset = match node.get("iso_offset") {
            Some(raw) => Some(string_value("iso_offset", raw)?),
            None => None,
        };
        return Ok(TimeRange::Relative {
            iso_duration,
            iso_offset,
            round_to_grain,
        });
    }

    Ok(TimeRange::Expression {
        expression: string_value("expression", &node["expression"])?,
    })
}

fn bound_string(key: &'static str, raw: &Value) -> Result<String, QueryError> {
    raw.as_str()
        .map(str::to_string)
        .ok_or(QueryError::InvalidTimeBound {
            key,
            got: json_type_name(raw),
        })
}

fn string_value(key: &'static str, raw: &Value) -> Result<String, QueryError> {
    raw.as_str()
        .map(str::to_string)
        .ok_or(QueryError::ExpectedString {
            key,
            got: json_type_name(raw),
        })
}
