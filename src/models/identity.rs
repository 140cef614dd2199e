//! Identity models shared across resources.

use serde::{Deserialize, Serialize};

/// The authenticated user, from `users/current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    // The service lowercases "user" in this one key.
    #[serde(rename = "quotaSingleuserOrgId")]
    pub quota_single_user_org_id: Option<String>,
    pub preference_time_zone: Option<String>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}

/// A personal access token, from `users/current/tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub display_name: Option<String>,
    pub auth_client_id: Option<String>,
    pub auth_client_display_name: Option<String>,
    pub representing_user_id: Option<String>,
    /// Visible token prefix, the only part the service keeps.
    pub prefix: String,
    pub created_on: Option<String>,
    pub expires_on: Option<String>,
    pub used_on: Option<String>,
}
