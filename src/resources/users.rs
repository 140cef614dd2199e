//! Organization membership operations.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::error::RillResult;
use crate::models::OrganizationMemberUser;

use super::decode_list;

/// Membership listings for organizations.
#[derive(Clone)]
pub struct UsersResource {
    inner: Arc<ClientInner>,
}

impl UsersResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Members of the default organization. Cached.
    pub async fn list(&self) -> RillResult<Vec<OrganizationMemberUser>> {
        let org = self.inner.resolve_org(None)?;
        self.list_in(&org).await
    }

    /// Members of a named organization. Cached.
    pub async fn list_in(&self, org: &str) -> RillResult<Vec<OrganizationMemberUser>> {
        let payload = self.inner.get_cached(&format!("orgs/{org}/members")).await?;
        decode_list(payload, "members", "member list")
    }
}
