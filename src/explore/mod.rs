//! Shareable dashboard URLs for metrics queries.
//!
//! A [`MetricsQuery`](crate::query::MetricsQuery) describes more than a
//! dashboard URL can hold, so this module is a lossy projection with an
//! explicit contract:
//!
//! - [`UrlBuilder`] resolves org, project, and the dashboard page for
//!   the query's metrics view, then fills an [`ExploreUrl`].
//! - Features the URL cannot carry (filters, having, explicit
//!   comparison ranges) are dropped with a warning through the
//!   configured [`ClientLogger`](crate::logging::ClientLogger).
//! - [`ExploreUrl`] is a plain value object; `Display` renders the
//!   final link.

pub mod builder;
pub mod pages;
pub mod url;

pub use builder::{ExploreError, UrlBuilder, UrlOptions, DEFAULT_UI_BASE_URL};
pub use pages::{PageLookup, StaticPageMap};
pub use url::{
    ExploreUrl, PageType, SortDir, COMPARE_PREVIOUS_PERIOD, TABLE_MODE_NEST, VIEW_PIVOT,
};
