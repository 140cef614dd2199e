//! Public URL (magic auth token) models.
//!
//! Magic auth tokens grant unauthenticated access to a dashboard,
//! optionally narrowed by a row filter and a field allowlist.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime resource a token grants access to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceName {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

/// A magic auth token, from `orgs/{org}/projects/{project}/tokens/magic`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicAuthToken {
    pub id: String,
    pub project_id: Option<String>,
    pub url: Option<String>,
    pub token: Option<String>,
    pub created_on: Option<String>,
    pub expires_on: Option<String>,
    pub used_on: Option<String>,
    pub created_by_user_id: Option<String>,
    pub created_by_user_email: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceName>,
    /// Runtime filter expression, passed through opaquely.
    pub filter: Option<Value>,
    #[serde(default)]
    pub fields: Vec<String>,
    pub state: Option<String>,
    pub display_name: Option<String>,
}

/// Restrictions applied when issuing a public URL.
///
/// Everything is optional; an unset field is omitted from the request.
/// Without a TTL the URL never expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublicUrlOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_minutes: Option<i64>,
    /// Runtime filter expression, passed through opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Response from issuing a public URL: the token and the shareable
/// link.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePublicUrlResponse {
    pub token: String,
    pub url: String,
}
