//! Async client for the hosted analytics service.
//!
//! [`RillClient`] is a cheap-to-clone handle over shared state: one
//! `reqwest` client, the resolved configuration, a logger, and an
//! optional response cache. Resource accessors ([`RillClient::orgs`],
//! [`RillClient::queries`], ...) hand out lightweight views over the
//! same state.
//!
//! # Example
//!
//! ```ignore
//! let client = RillClient::builder()
//!     .org("demo")
//!     .project("my-project")
//!     .build()?;
//!
//! let orgs = client.orgs().list().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::cache::{ResponseCache, DEFAULT_CACHE_TTL_SECS};
use crate::config::{RillConfig, ENV_ORG, ENV_PROJECT};
use crate::error::{RillError, RillResult};
use crate::explore::{ExploreUrl, UrlBuilder, UrlOptions};
use crate::logging::{ClientLogger, NullLogger};
use crate::query::MetricsQuery;
use crate::resources::{
    alerts::AlertsResource, auth::AuthResource, orgs, orgs::OrgsResource, projects,
    projects::ProjectsResource, publicurls::PublicUrlsResource, query::QueryResource,
    reports::ReportsResource, usergroups::UsergroupsResource, users::UsersResource,
};

/// Default timeout for requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("rill-client-rust/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Shared state
// ============================================================================

/// State shared by the client and every resource handle.
pub(crate) struct ClientInner {
    http: reqwest::Client,

    /// Normalized to end with exactly one `/`.
    api_base_url: String,

    api_token: String,

    pub(crate) default_org: Option<String>,
    pub(crate) default_project: Option<String>,

    pub(crate) logger: Arc<dyn ClientLogger>,

    /// `None` unless caching was enabled on the builder.
    cache: Option<ResponseCache>,
}

impl ClientInner {
    /// Send a request and parse the JSON payload. Empty and 204
    /// responses come back as `Value::Null`.
    pub(crate) async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> RillResult<Value> {
        let url = format!("{}{}", self.api_base_url, endpoint);
        self.logger.debug(&format!("Request: {method} {endpoint}"));

        let mut request = self.http.request(method.clone(), &url).bearer_auth(&self.api_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = service_error_detail(&text);
            let reason = status.canonical_reason().unwrap_or("error");
            let message = match detail {
                Some(detail) => format!(
                    "Request failed: {method} {endpoint} - {} {reason}: {detail}",
                    status.as_u16()
                ),
                None => format!(
                    "Request failed: {method} {endpoint} - {} {reason}",
                    status.as_u16()
                ),
            };
            self.logger.error(&message);
            return Err(RillError::Api {
                status: status.as_u16(),
                message,
                body: (!text.is_empty()).then_some(text),
            });
        }

        self.logger
            .debug(&format!("Request completed: {method} {endpoint} ({})", status.as_u16()));

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| RillError::Decode {
            context: format!("{method} {endpoint} response"),
            source,
        })
    }

    /// GET without caching.
    pub(crate) async fn get(&self, endpoint: &str) -> RillResult<Value> {
        self.request(Method::GET, endpoint, None::<&Value>).await
    }

    /// GET through the response cache, keyed by endpoint.
    pub(crate) async fn get_cached(&self, endpoint: &str) -> RillResult<Value> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(endpoint) {
                self.logger.debug(&format!("Cache hit: GET {endpoint}"));
                return Ok(hit);
            }
        }

        let payload = self.get(endpoint).await?;
        if let Some(cache) = &self.cache {
            cache.set(endpoint, payload.clone());
        }
        Ok(payload)
    }

    /// Org for an operation: explicit wins, then the client default.
    pub(crate) fn resolve_org(&self, org: Option<&str>) -> RillResult<String> {
        org.map(str::to_string)
            .or_else(|| self.default_org.clone())
            .ok_or_else(|| {
                RillError::Auth(
                    "An organization is required. Provide one explicitly or set \
                     RILL_DEFAULT_ORG (or configure it on the builder)."
                        .to_string(),
                )
            })
    }

    /// Org and project for an operation, explicit values winning over
    /// client defaults. The error names exactly what is missing.
    pub(crate) fn resolve_org_project(
        &self,
        org: Option<&str>,
        project: Option<&str>,
    ) -> RillResult<(String, String)> {
        let org = org.map(str::to_string).or_else(|| self.default_org.clone());
        let project = project
            .map(str::to_string)
            .or_else(|| self.default_project.clone());

        match (org, project) {
            (Some(org), Some(project)) => Ok((org, project)),
            (org, project) => {
                let mut missing = Vec::new();
                if org.is_none() {
                    missing.push("org");
                }
                if project.is_none() {
                    missing.push("project");
                }
                Err(RillError::Auth(format!(
                    "This operation requires {}. Provide them explicitly or set \
                     RILL_DEFAULT_ORG and RILL_DEFAULT_PROJECT (or configure them on the builder).",
                    missing.join(" and ")
                )))
            }
        }
    }

    pub(crate) fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

/// The service reports errors as `{"error": ...}` or `{"message": ...}`.
fn service_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn mask_token(token: &str) -> String {
    match token.get(..12) {
        Some(prefix) if token.len() > 12 => format!("{prefix}..."),
        _ => "***".to_string(),
    }
}

// ============================================================================
// Client
// ============================================================================

/// Handle to the hosted service. Clones share all state.
#[derive(Clone)]
pub struct RillClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for RillClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RillClient")
            .field("api_base_url", &self.inner.api_base_url)
            .field("default_org", &self.inner.default_org)
            .field("default_project", &self.inner.default_project)
            .finish_non_exhaustive()
    }
}

impl RillClient {
    pub fn builder() -> RillClientBuilder {
        RillClientBuilder::default()
    }

    /// The current user and their tokens.
    pub fn auth(&self) -> AuthResource {
        AuthResource::new(self.inner.clone())
    }

    /// Organization listings.
    pub fn orgs(&self) -> OrgsResource {
        OrgsResource::new(self.inner.clone())
    }

    /// Project listings.
    pub fn projects(&self) -> ProjectsResource {
        ProjectsResource::new(self.inner.clone())
    }

    /// Organization membership.
    pub fn users(&self) -> UsersResource {
        UsersResource::new(self.inner.clone())
    }

    /// Organization usergroups.
    pub fn usergroups(&self) -> UsergroupsResource {
        UsergroupsResource::new(self.inner.clone())
    }

    /// Scheduled report management.
    pub fn reports(&self) -> ReportsResource {
        ReportsResource::new(self.inner.clone())
    }

    /// Alert management.
    pub fn alerts(&self) -> AlertsResource {
        AlertsResource::new(self.inner.clone())
    }

    /// Public URL management.
    pub fn public_urls(&self) -> PublicUrlsResource {
        PublicUrlsResource::new(self.inner.clone())
    }

    /// Query execution against project runtimes.
    pub fn queries(&self) -> QueryResource {
        QueryResource::new(self.inner.clone())
    }

    pub fn default_org(&self) -> Option<&str> {
        self.inner.default_org.as_deref()
    }

    pub fn default_project(&self) -> Option<&str> {
        self.inner.default_project.as_deref()
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        self.inner.clear_cache();
    }

    /// Dashboard URL for a query, using the client's org, project, and
    /// logger.
    pub fn explore_url(&self, query: &MetricsQuery) -> RillResult<ExploreUrl> {
        self.explore_url_with(query, &UrlOptions::default())
    }

    /// Dashboard URL for a query with explicit encoding options.
    pub fn explore_url_with(
        &self,
        query: &MetricsQuery,
        options: &UrlOptions,
    ) -> RillResult<ExploreUrl> {
        let mut builder = UrlBuilder::new().with_logger(self.inner.logger.clone());
        if let Some(org) = &self.inner.default_org {
            builder = builder.with_org(org);
        }
        if let Some(project) = &self.inner.default_project {
            builder = builder.with_project(project);
        }
        Ok(builder.build_url_with(query, options)?)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`RillClient`].
///
/// Anything not set explicitly falls back to the environment, then to
/// `rill.toml`, then to defaults (see [`RillConfig`]).
#[derive(Default)]
#[must_use = "builders have no effect until build() or connect() is called"]
pub struct RillClientBuilder {
    api_token: Option<String>,
    base_url: Option<String>,
    org: Option<String>,
    project: Option<String>,
    logger: Option<Arc<dyn ClientLogger>>,
    timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    enable_cache: bool,
}

impl RillClientBuilder {
    /// Bearer token for API requests.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Base URL of the admin API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Default org for operations that do not name one.
    pub fn org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    /// Default project for operations that do not name one.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Route client diagnostics somewhere visible.
    pub fn logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// How long cached GET responses stay fresh. Defaults to 300
    /// seconds; has no effect unless caching is enabled.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Cache listing GET responses in memory. Off by default; listings
    /// can then lag the service by up to the TTL.
    pub fn enable_cache(mut self) -> Self {
        self.enable_cache = true;
        self
    }

    /// Build a client without touching the network.
    ///
    /// Fails when no API token is resolvable. Org and project may stay
    /// unset; operations that need them will say so.
    pub fn build(self) -> RillResult<RillClient> {
        let inner = self.build_inner()?;
        Ok(RillClient {
            inner: Arc::new(inner),
        })
    }

    /// Build a client and auto-detect missing org and project defaults.
    ///
    /// A single accessible org becomes the default org; a single
    /// project within it becomes the default project. Anything still
    /// missing afterwards is an error.
    pub async fn connect(self) -> RillResult<RillClient> {
        let mut inner = self.build_inner()?;

        if inner.default_org.is_none() {
            let orgs = orgs::fetch_list(&inner).await.map_err(auto_detect_error)?;
            if let [org] = orgs.as_slice() {
                inner
                    .logger
                    .info(&format!("Auto-detected default org: {}", org.name));
                inner.default_org = Some(org.name.clone());
            }
        }

        if inner.default_project.is_none() {
            if let Some(org) = inner.default_org.clone() {
                let projects = projects::fetch_list_in(&inner, &org)
                    .await
                    .map_err(auto_detect_error)?;
                if let [project] = projects.as_slice() {
                    inner
                        .logger
                        .info(&format!("Auto-detected default project: {}", project.name));
                    inner.default_project = Some(project.name.clone());
                }
            }
        }

        let mut missing = Vec::new();
        if inner.default_org.is_none() {
            missing.push(ENV_ORG);
        }
        if inner.default_project.is_none() {
            missing.push(ENV_PROJECT);
        }
        if !missing.is_empty() {
            return Err(RillError::Auth(format!(
                "Missing required configuration: {}. Set the environment variable(s) \
                 or configure org and project on the builder.",
                missing.join(", ")
            )));
        }

        Ok(RillClient {
            inner: Arc::new(inner),
        })
    }

    fn build_inner(self) -> RillResult<ClientInner> {
        let mut config = RillConfig::load()?;
        if let Some(token) = self.api_token {
            config.api_token = Some(token);
        }
        if let Some(base) = self.base_url {
            config.api_base_url = base;
        }
        if let Some(org) = self.org {
            config.default_org = Some(org);
        }
        if let Some(project) = self.project {
            config.default_project = Some(project);
        }

        let logger = self.logger.unwrap_or_else(|| Arc::new(NullLogger));

        let Some(api_token) = config.api_token.filter(|token| !token.is_empty()) else {
            logger.error("No API token provided");
            return Err(RillError::Auth(
                "No API token provided. Set the RILL_USER_TOKEN environment variable \
                 or configure a token on the builder."
                    .to_string(),
            ));
        };

        let api_base_url = format!("{}/", config.api_base_url.trim_end_matches('/'));
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let cache = self.enable_cache.then(|| {
            ResponseCache::new(
                self.cache_ttl
                    .unwrap_or(Duration::from_secs(DEFAULT_CACHE_TTL_SECS)),
            )
        });

        logger.info(&format!(
            "Client initialized (base_url={}, token={}, org={}, project={})",
            api_base_url,
            mask_token(&api_token),
            config.default_org.as_deref().unwrap_or("-"),
            config.default_project.as_deref().unwrap_or("-"),
        ));

        Ok(ClientInner {
            http,
            api_base_url,
            api_token,
            default_org: config.default_org,
            default_project: config.default_project,
            logger,
            cache,
        })
    }
}

fn auto_detect_error(err: RillError) -> RillError {
    RillError::Auth(format!(
        "Failed while auto-detecting client defaults: {err}"
    ))
}
