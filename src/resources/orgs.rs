//! Organization operations.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::error::RillResult;
use crate::models::Org;

use super::{decode_list, decode_object};

/// Operations on organizations.
#[derive(Clone)]
pub struct OrgsResource {
    inner: Arc<ClientInner>,
}

impl OrgsResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Every organization the token can see. Cached.
    pub async fn list(&self) -> RillResult<Vec<Org>> {
        fetch_list(&self.inner).await
    }

    /// One organization by name. Cached.
    pub async fn get(&self, org: &str) -> RillResult<Org> {
        let payload = self.inner.get_cached(&format!("orgs/{org}")).await?;
        decode_object(payload, "organization", "organization")
    }
}

/// Shared with default auto-detection, which runs before a client
/// handle exists.
pub(crate) async fn fetch_list(inner: &ClientInner) -> RillResult<Vec<Org>> {
    let payload = inner.get_cached("orgs").await?;
    decode_list(payload, "organizations", "organization list")
}
