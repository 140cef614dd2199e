//! Organization membership models.

use serde::{Deserialize, Serialize};

/// A member of an organization, from `orgs/{org}/members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMemberUser {
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub user_photo_url: Option<String>,
    pub role_name: Option<String>,
    pub projects_count: Option<i64>,
    pub usergroups_count: Option<i64>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}

/// A usergroup as listed by `orgs/{org}/usergroups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUsergroup {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub group_managed: Option<bool>,
    pub role_name: Option<String>,
    pub users_count: Option<i64>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}

/// Usergroup detail from `orgs/{org}/usergroups/{usergroup}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usergroup {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub group_managed: Option<bool>,
    pub org_id: Option<String>,
    pub role_name: Option<String>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}
