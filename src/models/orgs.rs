//! Organization models.

use serde::{Deserialize, Serialize};

/// An organization, from `orgs` and `orgs/{org}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Org {
    pub id: Option<String>,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub custom_domain: Option<String>,
    pub default_project_role_id: Option<String>,
    pub billing_customer_id: Option<String>,
    pub payment_customer_id: Option<String>,
    pub billing_email: Option<String>,
    pub billing_plan_name: Option<String>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
}
