//! Project and deployment models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A project, from `orgs/{org}/projects` and `orgs/{org}/projects/{project}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Option<String>,
    pub name: String,
    pub org_id: Option<String>,
    pub org_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    pub created_by_user_id: Option<String>,
    pub directory_name: Option<String>,
    pub provisioner: Option<String>,
    pub git_remote: Option<String>,
    pub managed_git_id: Option<String>,
    pub subpath: Option<String>,
    pub prod_branch: Option<String>,
    pub archive_asset_id: Option<String>,
    pub prod_slots: Option<i64>,
    pub prod_deployment_id: Option<String>,
    pub dev_slots: Option<i64>,
    pub frontend_url: Option<String>,
    pub prod_ttl_seconds: Option<i64>,
    pub annotations: Option<HashMap<String, String>>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}

/// A runtime deployment attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: Option<String>,
    pub project_id: Option<String>,
    pub owner_user_id: Option<String>,
    pub environment: Option<String>,
    pub branch: Option<String>,
    pub runtime_host: Option<String>,
    pub runtime_instance_id: Option<String>,
    /// e.g. `DEPLOYMENT_STATUS_OK`.
    pub status: Option<String>,
    pub status_message: Option<String>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}
