//! Tests for the wire format of the query AST.
//!
//! The service schema is positional about key names: expressions serialize
//! untagged as `{"name"}` / `{"val"}` / `{"cond"}` / `{"subquery"}`, the
//! filter key is `where`, and unset optionals disappear entirely.

use rill_client::query::{
    Condition, Dimension, Expression, Measure, MetricsQuery, MetricsSqlQuery, Operator,
    QueryBuilder, Sort, SqlQuery, Subquery, TimeGrain, TimeRange,
};
use serde_json::json;

// ============================================================================
// Expression shapes
// ============================================================================

#[test]
fn test_field_serializes_as_name() {
    let rendered = serde_json::to_value(Expression::field("device_type")).unwrap();
    assert_eq!(rendered, json!({"name": "device_type"}));
}

#[test]
fn test_value_serializes_as_val() {
    let rendered = serde_json::to_value(Expression::value(json!(["US", "GB"]))).unwrap();
    assert_eq!(rendered, json!({"val": ["US", "GB"]}));
}

#[test]
fn test_condition_serializes_as_cond() {
    let expr = Expression::cond(Condition::compare(Operator::Eq, "device_type", "mobile"));
    let rendered = serde_json::to_value(expr).unwrap();

    assert_eq!(
        rendered,
        json!({
            "cond": {
                "op": "eq",
                "exprs": [
                    {"name": "device_type"},
                    {"val": "mobile"},
                ],
            }
        })
    );
}

#[test]
fn test_subquery_serializes_with_where_rename() {
    let expr = Expression::subquery(Subquery {
        dimension: Dimension::new("campaign_name"),
        measures: vec![Measure::new("overall_spend")],
        where_clause: Some(Expression::cond(Condition::compare(
            Operator::Eq,
            "device_type",
            "mobile",
        ))),
        having: None,
    });
    let rendered = serde_json::to_value(expr).unwrap();

    let subquery = &rendered["subquery"];
    assert_eq!(subquery["dimension"], json!({"name": "campaign_name"}));
    assert_eq!(subquery["measures"], json!([{"name": "overall_spend"}]));
    assert!(subquery.get("where").is_some());
    assert!(subquery.get("where_clause").is_none());
    assert!(subquery.get("having").is_none());
}

#[test]
fn test_nested_boolean_round_trips_through_json() {
    let expr = Expression::cond(Condition::new(
        Operator::And,
        vec![
            Expression::cond(Condition::compare(Operator::Eq, "a", 1)),
            Expression::cond(Condition::compare(Operator::In, "region", json!(["US"]))),
        ],
    ));
    let rendered = serde_json::to_value(expr).unwrap();

    assert_eq!(rendered["cond"]["op"], "and");
    assert_eq!(rendered["cond"]["exprs"][1]["cond"]["op"], "in");
}

// ============================================================================
// Time range shapes
// ============================================================================

#[test]
fn test_absolute_range_serializes_flat() {
    let rendered = serde_json::to_value(TimeRange::absolute("2024-01-01", "2024-01-31")).unwrap();
    assert_eq!(rendered, json!({"start": "2024-01-01", "end": "2024-01-31"}));
}

#[test]
fn test_relative_range_omits_unset_fields() {
    let rendered = serde_json::to_value(TimeRange::duration("P7D")).unwrap();
    assert_eq!(rendered, json!({"iso_duration": "P7D"}));
}

#[test]
fn test_relative_range_with_all_fields() {
    let range = TimeRange::Relative {
        iso_duration: "P4W".to_string(),
        iso_offset: Some("P1W".to_string()),
        round_to_grain: Some(TimeGrain::Week),
    };
    let rendered = serde_json::to_value(range).unwrap();

    assert_eq!(
        rendered,
        json!({
            "iso_duration": "P4W",
            "iso_offset": "P1W",
            "round_to_grain": "week",
        })
    );
}

#[test]
fn test_expression_range_serializes_flat() {
    let rendered = serde_json::to_value(TimeRange::expression("rill-WTD")).unwrap();
    assert_eq!(rendered, json!({"expression": "rill-WTD"}));
}

// ============================================================================
// Dimensions, measures, sort
// ============================================================================

#[test]
fn test_plain_dimension_omits_compute() {
    let rendered = serde_json::to_value(Dimension::new("campaign_name")).unwrap();
    assert_eq!(rendered, json!({"name": "campaign_name"}));
}

#[test]
fn test_time_floor_compute_is_externally_tagged() {
    let dim = Dimension::time_floor("day", "ts", TimeGrain::Day);
    let rendered = serde_json::to_value(dim).unwrap();

    assert_eq!(
        rendered,
        json!({
            "name": "day",
            "compute": {"time_floor": {"dimension": "ts", "grain": "day"}},
        })
    );
}

#[test]
fn test_count_distinct_compute_is_externally_tagged() {
    let measure = Measure::count_distinct("uniques", "user_id");
    let rendered = serde_json::to_value(measure).unwrap();

    assert_eq!(
        rendered,
        json!({
            "name": "uniques",
            "compute": {"count_distinct": {"dimension": "user_id"}},
        })
    );
}

#[test]
fn test_sort_serializes_name_and_desc() {
    let rendered = serde_json::to_value(Sort::desc("overall_spend")).unwrap();
    assert_eq!(rendered, json!({"name": "overall_spend", "desc": true}));
}

// ============================================================================
// Query roots
// ============================================================================

#[test]
fn test_minimal_query_body_has_only_the_view() {
    let query = MetricsQuery::new("bids_metrics");
    let rendered = serde_json::to_value(query).unwrap();

    assert_eq!(rendered, json!({"metrics_view": "bids_metrics"}));
}

#[test]
fn test_query_filter_key_is_where() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .filter(&json!({"op": "eq", "field": "device_type", "value": "mobile"}))
        .unwrap()
        .build()
        .unwrap();
    let rendered = serde_json::to_value(query).unwrap();

    assert!(rendered.get("where").is_some());
    assert!(rendered.get("where_clause").is_none());
}

#[test]
fn test_full_query_body_shape() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .dimensions(["campaign_name"])
        .measures(["overall_spend"])
        .time_range(&json!({"iso_duration": "P7D"}))
        .unwrap()
        .sort("overall_spend", true)
        .limit(10)
        .time_zone("UTC")
        .build()
        .unwrap();
    let rendered = serde_json::to_value(query).unwrap();

    assert_eq!(
        rendered,
        json!({
            "metrics_view": "bids_metrics",
            "dimensions": [{"name": "campaign_name"}],
            "measures": [{"name": "overall_spend"}],
            "time_range": {"iso_duration": "P7D"},
            "sort": [{"name": "overall_spend", "desc": true}],
            "limit": 10,
            "time_zone": "UTC",
        })
    );
}

#[test]
fn test_metrics_sql_body() {
    let rendered =
        serde_json::to_value(MetricsSqlQuery::new("select * from bids_metrics")).unwrap();
    assert_eq!(rendered, json!({"sql": "select * from bids_metrics"}));
}

#[test]
fn test_raw_sql_body_with_connector() {
    let mut query = SqlQuery::new("select 1");
    query.connector = Some("duckdb".to_string());
    let rendered = serde_json::to_value(query).unwrap();

    assert_eq!(rendered, json!({"sql": "select 1", "connector": "duckdb"}));
}
