//! Tests for the query-to-URL projection.
//!
//! The encoder maps a metrics query onto the dashboard URL format: time
//! range rendering, the display grain heuristic, single-sort projection,
//! leaderboard and pivot layouts, the comparison sentinel, and warnings
//! for features the URL cannot carry.

use rill_client::explore::{
    ExploreError, SortDir, StaticPageMap, UrlBuilder, UrlOptions, DEFAULT_UI_BASE_URL,
};
use rill_client::logging::RecordingLogger;
use rill_client::query::{MetricsQuery, QueryBuilder, TimeGrain};
use serde_json::json;

fn demo_builder() -> UrlBuilder {
    UrlBuilder::new().with_org("demo").with_project("my-project")
}

fn weekly_query() -> MetricsQuery {
    QueryBuilder::new()
        .metrics_view("bids_metrics")
        .dimensions(["campaign_name"])
        .measures(["overall_spend", "total_bids"])
        .time_range(&json!({"iso_duration": "P7D"}))
        .unwrap()
        .build()
        .unwrap()
}

// ============================================================================
// End-to-end URL shape
// ============================================================================

#[test]
fn test_full_url_for_a_weekly_query() {
    let url = demo_builder().build_url(&weekly_query()).unwrap();

    assert_eq!(
        url.to_string(),
        "https://ui.rilldata.com/demo/my-project/explore/bids_explore\
         ?tr=P7D&measures=overall_spend,total_bids&dims=campaign_name\
         &leaderboard_measures=overall_spend,total_bids&grain=day"
    );
}

#[test]
fn test_default_base_url_is_the_hosted_ui() {
    assert_eq!(DEFAULT_UI_BASE_URL, "https://ui.rilldata.com");
    let url = demo_builder().build_url(&weekly_query()).unwrap();
    assert!(url.to_string().starts_with("https://ui.rilldata.com/"));
}

#[test]
fn test_custom_base_url_trims_trailing_slash() {
    let url = demo_builder()
        .with_base_url("https://dashboards.example.com/")
        .build_url(&weekly_query())
        .unwrap();

    assert!(url
        .to_string()
        .starts_with("https://dashboards.example.com/demo/my-project/explore/bids_explore"));
}

#[test]
fn test_timezone_is_carried_and_encoded() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_zone("America/New_York")
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.timezone.as_deref(), Some("America/New_York"));
    assert!(url.to_string().contains("tz=America%2FNew_York"));
}

// ============================================================================
// Time range rendering and the grain heuristic
// ============================================================================

#[test]
fn test_relative_range_passes_through_with_day_grain() {
    let url = demo_builder().build_url(&weekly_query()).unwrap();

    assert_eq!(url.time_range.as_deref(), Some("P7D"));
    assert_eq!(url.grain, Some(TimeGrain::Day));
}

#[test]
fn test_short_relative_range_charts_by_hour() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_range(&json!({"iso_duration": "P1D"}))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.time_range.as_deref(), Some("P1D"));
    assert_eq!(url.grain, Some(TimeGrain::Hour));
}

#[test]
fn test_two_day_span_still_charts_by_hour() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_range(&json!({"iso_duration": "P2D"}))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.grain, Some(TimeGrain::Hour));
}

#[test]
fn test_month_duration_charts_by_day() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_range(&json!({"iso_duration": "P3M"}))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.grain, Some(TimeGrain::Day));
}

#[test]
fn test_oversized_duration_count_charts_by_day() {
    // u64::MAX years; the compiler accepts any duration string, so the
    // encoder has to survive it.
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_range(&json!({"iso_duration": "P18446744073709551615Y"}))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.time_range.as_deref(), Some("P18446744073709551615Y"));
    assert_eq!(url.grain, Some(TimeGrain::Day));
}

#[test]
fn test_absolute_range_renders_date_parts_only() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_range(&json!({
            "start": "2025-11-12T08:30:00+00:00",
            "end": "2025-11-15T20:00:00+00:00",
        }))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.time_range.as_deref(), Some("2025-11-12 to 2025-11-15"));
    assert_eq!(url.grain, Some(TimeGrain::Day));
    assert!(url.to_string().contains("tr=2025-11-12+to+2025-11-15"));
}

#[test]
fn test_short_absolute_span_charts_by_hour() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_range(&json!({"start": "2025-11-12", "end": "2025-11-13"}))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.grain, Some(TimeGrain::Hour));
}

#[test]
fn test_absolute_span_counts_fractional_seconds() {
    // Two days plus half a second is over the two-day line.
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_range(&json!({
            "start": "2025-11-10T00:00:00Z",
            "end": "2025-11-12T00:00:00.500Z",
        }))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.grain, Some(TimeGrain::Day));
}

#[test]
fn test_expression_range_gets_no_grain() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .time_range(&json!({"expression": "rill-WTD"}))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.time_range.as_deref(), Some("rill-WTD"));
    assert_eq!(url.grain, None);
}

#[test]
fn test_query_without_range_gets_neither_tr_nor_grain() {
    let query = QueryBuilder::new().metrics_view("bids_metrics").build().unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.time_range, None);
    assert_eq!(url.grain, None);
}

// ============================================================================
// Sort projection
// ============================================================================

#[test]
fn test_only_the_first_sort_is_encoded() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .sort("overall_spend", true)
        .sort("campaign_name", false)
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.sort_by.as_deref(), Some("overall_spend"));
    assert_eq!(url.sort_dir, Some(SortDir::Desc));
}

#[test]
fn test_ascending_sort_direction() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .sort("campaign_name", false)
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert_eq!(url.sort_dir, Some(SortDir::Asc));
    assert!(url.to_string().contains("sort_dir=ASC&sort_by=campaign_name"));
}

// ============================================================================
// Leaderboard modes
// ============================================================================

#[test]
fn test_leaderboard_expands_all_measures_by_default() {
    let url = demo_builder().build_url(&weekly_query()).unwrap();

    assert_eq!(url.measures, ["overall_spend", "total_bids"]);
    assert_eq!(url.leaderboard_measures, ["overall_spend", "total_bids"]);
}

#[test]
fn test_single_leaderboard_keeps_only_the_first_measure() {
    let url = demo_builder()
        .build_url_with(&weekly_query(), &UrlOptions::new().with_single_leaderboard())
        .unwrap();

    assert_eq!(url.measures, ["overall_spend", "total_bids"]);
    assert_eq!(url.leaderboard_measures, ["overall_spend"]);
}

#[test]
fn test_no_measures_means_no_leaderboard_param() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .dimensions(["campaign_name"])
        .build()
        .unwrap();

    let url = demo_builder().build_url(&query).unwrap();
    assert!(url.leaderboard_measures.is_empty());
    assert!(!url.to_string().contains("leaderboard_measures"));
}

// ============================================================================
// Pivot layout
// ============================================================================

#[test]
fn test_pivot_moves_names_into_rows_and_cols() {
    let url = demo_builder()
        .build_url_with(&weekly_query(), &UrlOptions::new().with_pivot())
        .unwrap();

    assert_eq!(url.view.as_deref(), Some("pivot"));
    assert_eq!(url.rows, ["campaign_name"]);
    assert_eq!(url.cols, ["overall_spend", "total_bids"]);
    assert_eq!(url.table_mode.as_deref(), Some("nest"));
    assert!(url.dimensions.is_empty());
    assert!(url.measures.is_empty());
    assert!(url.leaderboard_measures.is_empty());
}

#[test]
fn test_pivot_keeps_sort_by_but_drops_direction() {
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .dimensions(["campaign_name"])
        .measures(["overall_spend"])
        .sort("overall_spend", true)
        .build()
        .unwrap();

    let url = demo_builder()
        .build_url_with(&query, &UrlOptions::new().with_pivot())
        .unwrap();

    assert_eq!(url.sort_by.as_deref(), Some("overall_spend"));
    assert_eq!(url.sort_dir, None);
    let rendered = url.to_string();
    assert!(rendered.contains("sort_by=overall_spend"));
    assert!(!rendered.contains("sort_dir"));
}

#[test]
fn test_pivot_url_param_order() {
    let url = demo_builder()
        .build_url_with(&weekly_query(), &UrlOptions::new().with_pivot())
        .unwrap();

    assert_eq!(
        url.to_string(),
        "https://ui.rilldata.com/demo/my-project/explore/bids_explore\
         ?tr=P7D&view=pivot&rows=campaign_name&cols=overall_spend,total_bids\
         &table_mode=nest&grain=day"
    );
}

// ============================================================================
// Comparison
// ============================================================================

#[test]
fn test_comparison_is_off_by_default() {
    let url = demo_builder().build_url(&weekly_query()).unwrap();
    assert_eq!(url.comparison, None);
    assert!(!url.to_string().contains("compare_tr"));
}

#[test]
fn test_comparison_option_sets_the_sentinel() {
    let url = demo_builder()
        .build_url_with(&weekly_query(), &UrlOptions::new().with_comparison())
        .unwrap();

    assert_eq!(url.comparison.as_deref(), Some("rill-PP"));
    assert!(url.to_string().ends_with("compare_tr=rill-PP"));
}

// ============================================================================
// Feature-loss warnings
// ============================================================================

#[test]
fn test_where_filter_warns_and_is_dropped() {
    let logger = RecordingLogger::new();
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .filter(&json!({"op": "eq", "field": "device_type", "value": "mobile"}))
        .unwrap()
        .build()
        .unwrap();

    let url = demo_builder()
        .with_logger(logger.clone())
        .build_url(&query)
        .unwrap();

    assert_eq!(url.filter, None);
    assert_eq!(
        logger.warnings(),
        ["Query has a 'where' filter which cannot be encoded in the URL; it was dropped"]
    );
}

#[test]
fn test_having_and_comparison_range_each_warn() {
    let logger = RecordingLogger::new();
    let query = QueryBuilder::new()
        .metrics_view("bids_metrics")
        .having(&json!({"op": "gt", "field": "overall_spend", "value": 1000}))
        .unwrap()
        .comparison_time_range(&json!({"iso_duration": "P7D", "iso_offset": "P7D"}))
        .unwrap()
        .build()
        .unwrap();

    demo_builder()
        .with_logger(logger.clone())
        .build_url(&query)
        .unwrap();

    let warnings = logger.warnings();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("'having' filter"));
    assert!(warnings[1].contains("'comparison_time_range'"));
}

#[test]
fn test_clean_query_emits_no_warnings() {
    let logger = RecordingLogger::new();
    demo_builder()
        .with_logger(logger.clone())
        .build_url(&weekly_query())
        .unwrap();

    assert!(logger.warnings().is_empty());
}

// ============================================================================
// Resolution errors
// ============================================================================

#[test]
fn test_missing_org_and_project() {
    let err = UrlBuilder::new().build_url(&weekly_query()).unwrap_err();

    assert_eq!(
        err,
        ExploreError::MissingConfiguration {
            missing: vec!["org", "project"],
        }
    );
    assert_eq!(
        err.to_string(),
        "Missing required configuration: org and project. Pass them per call or set defaults on the builder"
    );
}

#[test]
fn test_missing_project_alone() {
    let err = UrlBuilder::new()
        .with_org("demo")
        .build_url(&weekly_query())
        .unwrap_err();

    assert_eq!(
        err,
        ExploreError::MissingConfiguration {
            missing: vec!["project"],
        }
    );
}

#[test]
fn test_options_override_builder_defaults() {
    let url = demo_builder()
        .build_url_with(
            &weekly_query(),
            &UrlOptions::new().with_org("acme").with_project("prod-dash"),
        )
        .unwrap();

    assert!(url
        .to_string()
        .starts_with("https://ui.rilldata.com/acme/prod-dash/explore/bids_explore"));
}

#[test]
fn test_options_can_fill_in_for_a_bare_builder() {
    let url = UrlBuilder::new()
        .build_url_with(
            &weekly_query(),
            &UrlOptions::new().with_org("demo").with_project("my-project"),
        )
        .unwrap();

    assert!(url.to_string().contains("/demo/my-project/"));
}

#[test]
fn test_unknown_metrics_view_lists_known_ones() {
    let query = QueryBuilder::new().metrics_view("made_up_metrics").build().unwrap();
    let err = demo_builder().build_url(&query).unwrap_err();

    assert_eq!(
        err.to_string(),
        "No dashboard page known for metrics view 'made_up_metrics'. Known views: auction_metrics, bids_metrics"
    );
}

#[test]
fn test_empty_metrics_view_is_its_own_error() {
    let query = MetricsQuery::default();
    let err = demo_builder().build_url(&query).unwrap_err();

    assert_eq!(err, ExploreError::MissingMetricsView);
}

#[test]
fn test_custom_page_lookup_replaces_the_builtin_map() {
    let pages = StaticPageMap::new().with("bids_metrics", "custom_dash");
    let url = demo_builder()
        .with_page_lookup(pages)
        .build_url(&weekly_query())
        .unwrap();

    assert!(url.to_string().contains("/explore/custom_dash"));

    let auction = QueryBuilder::new().metrics_view("auction_metrics").build().unwrap();
    let err = demo_builder()
        .with_page_lookup(StaticPageMap::new().with("bids_metrics", "custom_dash"))
        .build_url(&auction)
        .unwrap_err();
    assert!(matches!(err, ExploreError::UnknownMetricsView { .. }));
}
