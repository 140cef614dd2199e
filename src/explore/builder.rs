//! Projection of a [`MetricsQuery`] onto an [`ExploreUrl`].
//!
//! The URL format carries far less than the query API does, so the
//! encoder is lossy by contract:
//!
//! - Org, project, and page mapping must resolve or encoding fails.
//! - Filters, having clauses, and explicit comparison ranges cannot be
//!   represented; they are dropped with a warning through the logger.
//! - A display grain is inferred from the time range so the dashboard
//!   opens with a sensible chart resolution.

use std::sync::{Arc, LazyLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use thiserror::Error;

use crate::logging::{ClientLogger, NullLogger};
use crate::query::{MetricsQuery, TimeGrain, TimeRange};

use super::pages::{PageLookup, StaticPageMap};
use super::url::{
    ExploreUrl, SortDir, COMPARE_PREVIOUS_PERIOD, TABLE_MODE_NEST, VIEW_PIVOT,
};

/// Hosted dashboard UI.
pub const DEFAULT_UI_BASE_URL: &str = "https://ui.rilldata.com";

/// Duration prefix the grain heuristic understands, e.g. `P7D` or `P3M`.
static DURATION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P(\d+)([DWMY])").unwrap());

// ============================================================================
// Errors
// ============================================================================

/// Failures that stop URL encoding outright.
///
/// Everything else the URL format cannot express is dropped with a
/// warning instead of an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExploreError {
    /// Org or project resolved to nothing from either the per-call
    /// options or the builder defaults.
    #[error(
        "Missing required configuration: {}. Pass them per call or set defaults on the builder",
        .missing.join(" and ")
    )]
    MissingConfiguration { missing: Vec<&'static str> },

    /// The query named no metrics view.
    #[error("Query has no metrics view to resolve a dashboard page for")]
    MissingMetricsView,

    /// No dashboard page is mapped for the query's metrics view.
    #[error(
        "No dashboard page known for metrics view '{metrics_view}'. Known views: {}",
        .known.join(", ")
    )]
    UnknownMetricsView {
        metrics_view: String,
        known: Vec<String>,
    },
}

// ============================================================================
// Options
// ============================================================================

/// Per-call knobs for [`UrlBuilder::build_url_with`].
#[derive(Debug, Clone)]
pub struct UrlOptions {
    /// Overrides the builder's default org.
    pub org: Option<String>,
    /// Overrides the builder's default project.
    pub project: Option<String>,
    /// Render the pivot layout instead of the flat explore layout.
    pub pivot: bool,
    /// Expand every measure into the leaderboard instead of just the first.
    pub multi_leaderboard_measures: bool,
    /// Open the dashboard with a previous-period comparison.
    pub enable_comparison: bool,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            org: None,
            project: None,
            pivot: false,
            multi_leaderboard_measures: true,
            enable_comparison: false,
        }
    }
}

impl UrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_pivot(mut self) -> Self {
        self.pivot = true;
        self
    }

    /// Keep only the first measure in the leaderboard.
    pub fn with_single_leaderboard(mut self) -> Self {
        self.multi_leaderboard_measures = false;
        self
    }

    pub fn with_comparison(mut self) -> Self {
        self.enable_comparison = true;
        self
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Encodes metrics queries as shareable dashboard URLs.
///
/// ```ignore
/// let url = UrlBuilder::new()
///     .with_org("demo")
///     .with_project("my-project")
///     .build_url(&query)?;
/// println!("{url}");
/// ```
pub struct UrlBuilder {
    base_url: String,
    org: Option<String>,
    project: Option<String>,
    pages: Box<dyn PageLookup>,
    logger: Arc<dyn ClientLogger>,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlBuilder {
    /// A builder pointing at the hosted UI with the built-in page mappings
    /// and no logging.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_UI_BASE_URL.to_string(),
            org: None,
            project: None,
            pages: Box::new(StaticPageMap::builtin()),
            logger: Arc::new(NullLogger),
        }
    }

    /// Point at a different UI deployment. Trailing slashes are trimmed.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Default org for calls that do not override it.
    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    /// Default project for calls that do not override it.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Replace the metrics-view to page mapping.
    pub fn with_page_lookup(mut self, pages: impl PageLookup + 'static) -> Self {
        self.pages = Box::new(pages);
        self
    }

    /// Route feature-loss warnings somewhere visible.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Encode a query with default options.
    pub fn build_url(&self, query: &MetricsQuery) -> Result<ExploreUrl, ExploreError> {
        self.build_url_with(query, &UrlOptions::default())
    }

    /// Encode a query into an [`ExploreUrl`].
    ///
    /// Org and project resolve per-call options first, then builder
    /// defaults. Resolution failures are fatal; unencodable query
    /// features are logged as warnings and dropped.
    pub fn build_url_with(
        &self,
        query: &MetricsQuery,
        options: &UrlOptions,
    ) -> Result<ExploreUrl, ExploreError> {
        let org = options.org.as_deref().or(self.org.as_deref());
        let project = options.project.as_deref().or(self.project.as_deref());
        let (org, project) = match (org, project) {
            (Some(org), Some(project)) => (org, project),
            (org, project) => {
                let mut missing = Vec::new();
                if org.is_none() {
                    missing.push("org");
                }
                if project.is_none() {
                    missing.push("project");
                }
                return Err(ExploreError::MissingConfiguration { missing });
            }
        };

        if query.metrics_view.is_empty() {
            return Err(ExploreError::MissingMetricsView);
        }
        let page_name = self.pages.page_for(&query.metrics_view).ok_or_else(|| {
            ExploreError::UnknownMetricsView {
                metrics_view: query.metrics_view.clone(),
                known: self
                    .pages
                    .known_views()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }
        })?;

        let mut url = ExploreUrl::new(&self.base_url, org, project, page_name);
        url.time_range = query.time_range.as_ref().map(render_time_range);
        url.timezone = query.time_zone.clone();
        url.grain = grain_for_query(query);

        if let Some(first) = query.sort.as_ref().and_then(|sorts| sorts.first()) {
            url.sort_by = Some(first.name.clone());
            url.sort_dir = Some(if first.desc { SortDir::Desc } else { SortDir::Asc });
        }

        if options.enable_comparison {
            url.comparison = Some(COMPARE_PREVIOUS_PERIOD.to_string());
        }

        let dimension_names: Vec<String> = query
            .dimensions
            .iter()
            .flatten()
            .map(|d| d.name.clone())
            .collect();
        let measure_names: Vec<String> = query
            .measures
            .iter()
            .flatten()
            .map(|m| m.name.clone())
            .collect();

        if options.pivot {
            url.view = Some(VIEW_PIVOT.to_string());
            url.rows = dimension_names;
            url.cols = measure_names;
            url.table_mode = Some(TABLE_MODE_NEST.to_string());
            // The pivot table sorts by column name alone.
            url.sort_dir = None;
        } else {
            url.dimensions = dimension_names;
            if !measure_names.is_empty() {
                url.leaderboard_measures = if options.multi_leaderboard_measures {
                    measure_names.clone()
                } else {
                    vec![measure_names[0].clone()]
                };
            }
            url.measures = measure_names;
        }

        self.warn_dropped_features(query);

        Ok(url)
    }

    fn warn_dropped_features(&self, query: &MetricsQuery) {
        if query.where_clause.is_some() {
            self.logger.warning(
                "Query has a 'where' filter which cannot be encoded in the URL; it was dropped",
            );
        }
        if query.having.is_some() {
            self.logger.warning(
                "Query has a 'having' filter which cannot be encoded in the URL; it was dropped",
            );
        }
        if query.comparison_time_range.is_some() {
            self.logger.warning(
                "Query has 'comparison_time_range' which the URL ignores; use the comparison option instead",
            );
        }
    }
}

// ============================================================================
// Time range rendering and the grain heuristic
// ============================================================================

/// The `tr` param. Durations and expressions pass through verbatim;
/// absolute bounds keep only their date parts.
fn render_time_range(range: &TimeRange) -> String {
    match range {
        TimeRange::Relative { iso_duration, .. } => iso_duration.clone(),
        TimeRange::Absolute { start, end } => {
            format!("{} to {}", date_part(start), date_part(end))
        }
        TimeRange::Expression { expression } => expression.clone(),
    }
}

fn date_part(bound: &str) -> &str {
    bound.split('T').next().unwrap_or(bound)
}

/// Spans over two days chart by day, shorter ones by hour. Ranges whose
/// length cannot be determined get no grain at all.
fn grain_for_query(query: &MetricsQuery) -> Option<TimeGrain> {
    let days = match query.time_range.as_ref()? {
        TimeRange::Relative { iso_duration, .. } => duration_days(iso_duration)? as f64,
        TimeRange::Absolute { start, end } => span_days(start, end)?,
        TimeRange::Expression { .. } => return None,
    };
    Some(if days > 2.0 {
        TimeGrain::Day
    } else {
        TimeGrain::Hour
    })
}

/// Day count from a duration prefix. `P2W` is 14, `P3M` approximates to
/// 90, `P1Y` to 365. Sub-day durations and compound tails are ignored.
/// Oversized counts clamp to `u64::MAX`.
fn duration_days(iso_duration: &str) -> Option<u64> {
    let caps = DURATION_PREFIX.captures(iso_duration)?;
    // The regex admits digits only, so the sole parse failure is overflow.
    let count: u64 = caps[1].parse().unwrap_or(u64::MAX);
    match &caps[2] {
        "D" => Some(count),
        "W" => Some(count.saturating_mul(7)),
        "M" => Some(count.saturating_mul(30)),
        "Y" => Some(count.saturating_mul(365)),
        _ => None,
    }
}

fn span_days(start: &str, end: &str) -> Option<f64> {
    let start = parse_point(start)?;
    let end = parse_point(end)?;
    Some((end - start).num_milliseconds() as f64 / 86_400_000.0)
}

/// Accepts RFC 3339, a bare datetime, or a bare date. Offset-less
/// values are taken as UTC.
fn parse_point(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    None
}
