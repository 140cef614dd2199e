//! The explore URL value object and its string rendering.
//!
//! [`ExploreUrl`] is a structured representation of a dashboard URL:
//! `{base}/{org}/{project}/{page_type}/{page_name}?{params}`. Rendering is
//! deterministic: params appear in a fixed order and only when set, and the
//! `?` is omitted entirely for a bare path.

use std::fmt;

use crate::query::TimeGrain;

/// `view` param value selecting the pivot layout.
pub const VIEW_PIVOT: &str = "pivot";

/// `table_mode` param value for nested pivot tables.
pub const TABLE_MODE_NEST: &str = "nest";

/// `compare_tr` sentinel enabling previous-period comparison.
pub const COMPARE_PREVIOUS_PERIOD: &str = "rill-PP";

/// Dashboard page kinds addressable in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageType {
    #[default]
    Explore,
    Canvas,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Explore => "explore",
            PageType::Canvas => "canvas",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction rendered into the `sort_dir` param.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured representation of an explore or canvas URL.
///
/// Constructed by [`UrlBuilder`](super::UrlBuilder); all fields are public
/// for direct assembly. `Display` produces the final URL string.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreUrl {
    pub base_url: String,
    pub org: String,
    pub project: String,
    pub page_type: PageType,
    pub page_name: String,

    /// `tr` param: a duration, a rendered absolute span, or an expression.
    pub time_range: Option<String>,
    /// `tz` param: IANA time zone name.
    pub timezone: Option<String>,
    pub measures: Vec<String>,
    /// `dims` param.
    pub dimensions: Vec<String>,
    pub sort_dir: Option<SortDir>,
    pub sort_by: Option<String>,
    pub leaderboard_measures: Vec<String>,

    /// `view` param, [`VIEW_PIVOT`] for the pivot layout.
    pub view: Option<String>,
    /// Pivot rows (dimension names).
    pub rows: Vec<String>,
    /// Pivot columns (measure names).
    pub cols: Vec<String>,
    /// `table_mode` param, [`TABLE_MODE_NEST`] for pivot.
    pub table_mode: Option<String>,

    /// `f` param. Reserved; the encoder never populates it.
    pub filter: Option<String>,
    pub grain: Option<TimeGrain>,
    /// `compare_tr` param, [`COMPARE_PREVIOUS_PERIOD`] when comparison is on.
    pub comparison: Option<String>,
}

impl ExploreUrl {
    /// A URL with the given path components and no query params.
    pub fn new(
        base_url: impl Into<String>,
        org: impl Into<String>,
        project: impl Into<String>,
        page_name: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            org: org.into(),
            project: project.into(),
            page_type: PageType::Explore,
            page_name: page_name.into(),
            time_range: None,
            timezone: None,
            measures: Vec::new(),
            dimensions: Vec::new(),
            sort_dir: None,
            sort_by: None,
            leaderboard_measures: Vec::new(),
            view: None,
            rows: Vec::new(),
            cols: Vec::new(),
            table_mode: None,
            filter: None,
            grain: None,
            comparison: None,
        }
    }

    /// The path portion, without query params.
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.base_url, self.org, self.project, self.page_type, self.page_name
        )
    }

    /// Query params in emission order. Unset and empty values are skipped.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_string(&mut params, "tr", &self.time_range);
        push_string(&mut params, "tz", &self.timezone);
        push_list(&mut params, "measures", &self.measures);
        push_list(&mut params, "dims", &self.dimensions);
        if let Some(dir) = self.sort_dir {
            params.push(("sort_dir", dir.as_str().to_string()));
        }
        push_string(&mut params, "sort_by", &self.sort_by);
        push_list(&mut params, "leaderboard_measures", &self.leaderboard_measures);
        push_string(&mut params, "view", &self.view);
        push_list(&mut params, "rows", &self.rows);
        push_list(&mut params, "cols", &self.cols);
        push_string(&mut params, "table_mode", &self.table_mode);
        push_string(&mut params, "f", &self.filter);
        if let Some(grain) = self.grain {
            params.push(("grain", grain.as_str().to_string()));
        }
        push_string(&mut params, "compare_tr", &self.comparison);
        params
    }
}

impl fmt::Display for ExploreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params();
        if params.is_empty() {
            return f.write_str(&self.path());
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode_param(value)))
            .collect::<Vec<_>>()
            .join("&");
        write!(f, "{}?{}", self.path(), query)
    }
}

fn push_string(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            params.push((key, value.clone()));
        }
    }
}

fn push_list(params: &mut Vec<(&'static str, String)>, key: &'static str, values: &[String]) {
    if !values.is_empty() {
        params.push((key, values.join(",")));
    }
}

/// Form-style percent-encoding with commas kept literal.
///
/// Spaces render as `+` and commas survive so comma-joined lists stay
/// readable, matching what the dashboard itself produces.
fn encode_param(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%20", "+")
        .replace("%2C", ",")
}
