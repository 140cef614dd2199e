//! # rill-client
//!
//! Rust SDK for the Rill Data hosted analytics service.
//!
//! ## Architecture
//!
//! The crate centers on compiling loosely structured query input into
//! typed, wire-shaped requests, then projecting those requests onto
//! either the query API or a shareable dashboard URL:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        untyped filter / time-range JSON maps            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [query::filter, query::time_range]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Expression / TimeRange AST (typed)             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [query::QueryBuilder]
//! ┌─────────────────────────────────────────────────────────┐
//! │            MetricsQuery (serde wire shape)              │
//! └─────────────────────────────────────────────────────────┘
//!                │                          │
//!                ▼ [client, resources]      ▼ [explore::UrlBuilder]
//! ┌──────────────────────────┐  ┌───────────────────────────┐
//! │  runtime query APIs      │  │  ExploreUrl (dashboard    │
//! │  (async, reqwest)        │  │  link, lossy projection)  │
//! └──────────────────────────┘  └───────────────────────────┘
//! ```
//!
//! The compilers and encoders are pure synchronous functions; only
//! [`RillClient`] touches the network.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod explore;
pub mod logging;
pub mod models;
pub mod query;
pub mod resources;

// The types nearly every caller needs, at the crate root.
pub use client::{RillClient, RillClientBuilder};
pub use error::{RillError, RillResult};
pub use explore::{ExploreUrl, UrlBuilder, UrlOptions};
pub use query::{MetricsQuery, QueryBuilder, QueryResult};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::client::{RillClient, RillClientBuilder};
    pub use crate::config::RillConfig;
    pub use crate::error::{RillError, RillResult};
    pub use crate::explore::{
        ExploreError, ExploreUrl, PageLookup, StaticPageMap, UrlBuilder, UrlOptions,
    };
    pub use crate::logging::{ClientLogger, NullLogger, TracingLogger};
    pub use crate::models::{
        Alert, AlertOptions, MagicAuthToken, Org, Project, PublicUrlOptions, Report,
        ReportOptions, Token, User, Usergroup,
    };
    pub use crate::query::{
        compile_filter, normalize_time_range, Dimension, Expression, Measure, MetricsQuery,
        MetricsSqlQuery, Operator, QueryBuilder, QueryError, QueryResult, Sort, SqlQuery,
        TimeGrain, TimeRange,
    };
}
