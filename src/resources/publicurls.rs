//! Public URL management.
//!
//! Public URLs are backed by magic auth tokens: anyone holding the
//! link can view the named explore without signing in, within the
//! token's filter, field, and expiry limits.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::client::ClientInner;
use crate::error::RillResult;
use crate::models::{CreatePublicUrlResponse, MagicAuthToken, PublicUrlOptions, ResourceName};

use super::{decode, decode_list};

const EXPLORE_KIND: &str = "rill.runtime.v1.Explore";

/// Wire shape of the token issue request: the target resource plus
/// whatever restrictions were set.
#[derive(Serialize)]
struct IssueTokenRequest<'a> {
    resources: Vec<ResourceName>,
    #[serde(flatten)]
    options: &'a PublicUrlOptions,
}

/// Operations on public URLs, scoped to the client's default org and
/// project.
#[derive(Clone)]
pub struct PublicUrlsResource {
    inner: Arc<ClientInner>,
}

impl PublicUrlsResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// All magic auth tokens of the project. Cached.
    pub async fn list(&self) -> RillResult<Vec<MagicAuthToken>> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .get_cached(&format!("orgs/{org}/projects/{project}/tokens/magic"))
            .await?;
        decode_list(payload, "tokens", "magic token list")
    }

    /// Issue a public URL for an explore, with no restrictions and no
    /// expiry.
    pub async fn create(&self, explore: &str) -> RillResult<CreatePublicUrlResponse> {
        self.create_with(explore, &PublicUrlOptions::default()).await
    }

    /// Issue a public URL for an explore with explicit restrictions.
    pub async fn create_with(
        &self,
        explore: &str,
        options: &PublicUrlOptions,
    ) -> RillResult<CreatePublicUrlResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        self.inner
            .logger
            .info(&format!("Creating public URL in {org}/{project}"));
        let request = IssueTokenRequest {
            resources: vec![ResourceName {
                kind: EXPLORE_KIND.to_string(),
                name: explore.to_string(),
            }],
            options,
        };
        let payload = self
            .inner
            .request(
                Method::POST,
                &format!("orgs/{org}/projects/{project}/tokens/magic"),
                Some(&request),
            )
            .await?;
        decode(payload, "create public URL response")
    }

    /// Revoke a magic auth token. The token id addresses the token
    /// directly, no org or project needed.
    pub async fn delete(&self, token_id: &str) -> RillResult<()> {
        self.inner
            .request(
                Method::DELETE,
                &format!("magic-tokens/{token_id}"),
                None::<&Value>,
            )
            .await?;
        Ok(())
    }
}
