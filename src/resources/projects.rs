//! Project operations.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::error::RillResult;
use crate::models::Project;

use super::{decode_list, decode_object};

/// Operations on projects.
#[derive(Clone)]
pub struct ProjectsResource {
    inner: Arc<ClientInner>,
}

impl ProjectsResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Projects across every visible organization. Cached per org.
    pub async fn list(&self) -> RillResult<Vec<Project>> {
        let orgs = super::orgs::fetch_list(&self.inner).await?;
        let mut projects = Vec::new();
        for org in orgs {
            projects.extend(fetch_list_in(&self.inner, &org.name).await?);
        }
        Ok(projects)
    }

    /// Projects within one organization. Cached.
    pub async fn list_in(&self, org: &str) -> RillResult<Vec<Project>> {
        fetch_list_in(&self.inner, org).await
    }

    /// A project in the default organization. Cached.
    pub async fn get(&self, project: &str) -> RillResult<Project> {
        let org = self.inner.resolve_org(None)?;
        self.get_in(&org, project).await
    }

    /// A project in a named organization. Cached.
    pub async fn get_in(&self, org: &str, project: &str) -> RillResult<Project> {
        let payload = self
            .inner
            .get_cached(&format!("orgs/{org}/projects/{project}"))
            .await?;
        decode_object(payload, "project", "project")
    }
}

/// Shared with default auto-detection.
pub(crate) async fn fetch_list_in(inner: &ClientInner, org: &str) -> RillResult<Vec<Project>> {
    let payload = inner.get_cached(&format!("orgs/{org}/projects")).await?;
    decode_list(payload, "projects", "project list")
}
