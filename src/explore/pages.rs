//! Metrics-view to dashboard-page resolution.

use std::collections::BTreeMap;

/// Resolves a metrics view to the dashboard page that visualizes it.
///
/// The mapping is deployment specific, so the encoder takes it as an
/// injected strategy instead of hardcoding page names.
pub trait PageLookup: Send + Sync {
    /// The page name for a metrics view, if one is known.
    fn page_for(&self, metrics_view: &str) -> Option<&str>;

    /// Every metrics view with a known page, for error listings.
    fn known_views(&self) -> Vec<&str>;
}

/// Table-backed lookup with deterministic listing order.
#[derive(Debug, Clone, Default)]
pub struct StaticPageMap {
    entries: BTreeMap<String, String>,
}

impl StaticPageMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mappings shipped with the demo project.
    pub fn builtin() -> Self {
        Self::new()
            .with("bids_metrics", "bids_explore")
            .with("auction_metrics", "auction_explore")
    }

    /// Add a mapping.
    pub fn with(mut self, metrics_view: impl Into<String>, page: impl Into<String>) -> Self {
        self.entries.insert(metrics_view.into(), page.into());
        self
    }
}

impl PageLookup for StaticPageMap {
    fn page_for(&self, metrics_view: &str) -> Option<&str> {
        self.entries.get(metrics_view).map(String::as_str)
    }

    fn known_views(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
