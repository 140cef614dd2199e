//! Organization usergroup operations.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::error::RillResult;
use crate::models::{MemberUsergroup, Usergroup};

use super::{decode_list, decode_object};

/// Usergroup listings for organizations.
#[derive(Clone)]
pub struct UsergroupsResource {
    inner: Arc<ClientInner>,
}

impl UsergroupsResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Usergroups of the default organization. Cached.
    pub async fn list(&self) -> RillResult<Vec<MemberUsergroup>> {
        let org = self.inner.resolve_org(None)?;
        self.list_in(&org).await
    }

    /// Usergroups of a named organization. Cached.
    pub async fn list_in(&self, org: &str) -> RillResult<Vec<MemberUsergroup>> {
        let payload = self
            .inner
            .get_cached(&format!("orgs/{org}/usergroups"))
            .await?;
        decode_list(payload, "members", "usergroup list")
    }

    /// One usergroup in the default organization. Cached.
    pub async fn get(&self, usergroup: &str) -> RillResult<Usergroup> {
        let org = self.inner.resolve_org(None)?;
        self.get_in(&org, usergroup).await
    }

    /// One usergroup in a named organization. Cached.
    pub async fn get_in(&self, org: &str, usergroup: &str) -> RillResult<Usergroup> {
        let payload = self
            .inner
            .get_cached(&format!("orgs/{org}/usergroups/{usergroup}"))
            .await?;
        decode_object(payload, "usergroup", "usergroup")
    }
}
