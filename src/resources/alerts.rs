//! Alert management.
//!
//! Same resource layout as reports: listings come from the runtime
//! resources endpoint filtered to alert kinds, never cached.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};

use crate::client::ClientInner;
use crate::error::{RillError, RillResult};
use crate::models::{
    Alert, AlertOptions, CreateAlertResponse, DeleteAlertResponse, EditAlertResponse,
    UnsubscribeAlertResponse,
};

use super::{decode, decode_lenient, decode_object, resource_kind, resource_name};

const ALERT_KIND: &str = "rill.runtime.v1.Alert";

/// Operations on alerts, scoped to the client's default org and
/// project.
#[derive(Clone)]
pub struct AlertsResource {
    inner: Arc<ClientInner>,
}

impl AlertsResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// All alerts in the project.
    pub async fn list(&self) -> RillResult<Vec<Alert>> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .get(&format!(
                "organizations/{org}/projects/{project}/runtime/resources"
            ))
            .await?;
        collect_alerts(&payload)
    }

    /// One alert by name.
    pub async fn get(&self, name: &str) -> RillResult<Alert> {
        let alerts = self.list().await?;
        alerts
            .into_iter()
            .find(|alert| alert.name.as_deref() == Some(name))
            .ok_or_else(|| RillError::Api {
                status: 404,
                message: format!("Alert '{name}' not found"),
                body: None,
            })
    }

    /// Create an alert from options; the response carries its name.
    pub async fn create(&self, options: &AlertOptions) -> RillResult<CreateAlertResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        self.inner
            .logger
            .info(&format!("Creating alert in {org}/{project}"));
        let payload = self
            .inner
            .request(
                Method::POST,
                &format!("orgs/{org}/projects/{project}/alerts"),
                Some(&json!({ "options": options })),
            )
            .await?;
        decode(payload, "create alert response")
    }

    /// Replace an alert's options.
    pub async fn edit(&self, name: &str, options: &AlertOptions) -> RillResult<EditAlertResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::PUT,
                &format!("orgs/{org}/projects/{project}/alerts/{name}"),
                Some(&json!({ "options": options })),
            )
            .await?;
        decode_lenient(payload, "edit alert response")
    }

    /// Delete an alert.
    pub async fn delete(&self, name: &str) -> RillResult<DeleteAlertResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::DELETE,
                &format!("orgs/{org}/projects/{project}/alerts/{name}"),
                None::<&Value>,
            )
            .await?;
        decode_lenient(payload, "delete alert response")
    }

    /// Remove the current user from an alert's recipients.
    pub async fn unsubscribe(&self, name: &str) -> RillResult<UnsubscribeAlertResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::POST,
                &format!("orgs/{org}/projects/{project}/alerts/{name}/unsubscribe"),
                Some(&json!({})),
            )
            .await?;
        decode_lenient(payload, "unsubscribe alert response")
    }

    /// YAML definition of an existing alert.
    pub async fn get_yaml(&self, name: &str) -> RillResult<String> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .get(&format!("orgs/{org}/projects/{project}/alerts/{name}/yaml"))
            .await?;
        decode_object(payload, "yaml", "alert yaml response")
    }

    /// YAML for an alert that does not exist yet, ready to commit to
    /// the project repository.
    pub async fn generate_yaml(&self, options: &AlertOptions) -> RillResult<String> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::POST,
                &format!("orgs/{org}/projects/{project}/alerts/-/yaml"),
                Some(&json!({ "options": options })),
            )
            .await?;
        decode_object(payload, "yaml", "generate alert yaml response")
    }
}

fn collect_alerts(payload: &Value) -> RillResult<Vec<Alert>> {
    let Some(resources) = payload.get("resources").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut alerts = Vec::new();
    for resource in resources {
        if resource_kind(resource) != Some(ALERT_KIND) {
            continue;
        }
        let mut alert: Alert = match resource.get("alert") {
            Some(body) => decode(body.clone(), "alert resource")?,
            None => Alert::default(),
        };
        alert.name = resource_name(resource).map(str::to_string);
        alerts.push(alert);
    }
    Ok(alerts)
}
