//! Scheduled report management.
//!
//! Listings read the project's runtime resources and keep only report
//! kinds; mutations go through the admin endpoints. Nothing here is
//! cached, report state moves too fast for that.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};

use crate::client::ClientInner;
use crate::error::{RillError, RillResult};
use crate::models::{
    CreateReportResponse, DeleteReportResponse, EditReportResponse, Report, ReportOptions,
    TriggerReportResponse, UnsubscribeReportResponse,
};

use super::{decode, decode_lenient, decode_object, resource_kind, resource_name};

const REPORT_KIND: &str = "rill.runtime.v1.Report";

/// Operations on scheduled reports, scoped to the client's default
/// org and project.
#[derive(Clone)]
pub struct ReportsResource {
    inner: Arc<ClientInner>,
}

impl ReportsResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// All reports in the project.
    pub async fn list(&self) -> RillResult<Vec<Report>> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .get(&format!(
                "organizations/{org}/projects/{project}/runtime/resources"
            ))
            .await?;
        collect_reports(&payload)
    }

    /// One report by name.
    pub async fn get(&self, name: &str) -> RillResult<Report> {
        let reports = self.list().await?;
        reports
            .into_iter()
            .find(|report| report.name.as_deref() == Some(name))
            .ok_or_else(|| RillError::Api {
                status: 404,
                message: format!("Report '{name}' not found"),
                body: None,
            })
    }

    /// Create a report from options; the response carries its name.
    pub async fn create(&self, options: &ReportOptions) -> RillResult<CreateReportResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        self.inner
            .logger
            .info(&format!("Creating report in {org}/{project}"));
        let payload = self
            .inner
            .request(
                Method::POST,
                &format!("orgs/{org}/projects/{project}/reports"),
                Some(&json!({ "options": options })),
            )
            .await?;
        decode(payload, "create report response")
    }

    /// Replace a report's options.
    pub async fn edit(
        &self,
        name: &str,
        options: &ReportOptions,
    ) -> RillResult<EditReportResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::PUT,
                &format!("orgs/{org}/projects/{project}/reports/{name}"),
                Some(&json!({ "options": options })),
            )
            .await?;
        decode_lenient(payload, "edit report response")
    }

    /// Delete a report.
    pub async fn delete(&self, name: &str) -> RillResult<DeleteReportResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::DELETE,
                &format!("orgs/{org}/projects/{project}/reports/{name}"),
                None::<&Value>,
            )
            .await?;
        decode_lenient(payload, "delete report response")
    }

    /// Run a report now, outside its schedule.
    pub async fn trigger(&self, name: &str) -> RillResult<TriggerReportResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::POST,
                &format!("orgs/{org}/projects/{project}/reports/{name}/trigger"),
                Some(&json!({})),
            )
            .await?;
        decode_lenient(payload, "trigger report response")
    }

    /// Remove the current user from a report's recipients.
    pub async fn unsubscribe(&self, name: &str) -> RillResult<UnsubscribeReportResponse> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::POST,
                &format!("orgs/{org}/projects/{project}/reports/{name}/unsubscribe"),
                Some(&json!({})),
            )
            .await?;
        decode_lenient(payload, "unsubscribe report response")
    }

    /// YAML for a report that does not exist yet, ready to commit to
    /// the project repository.
    pub async fn generate_yaml(&self, options: &ReportOptions) -> RillResult<String> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        let payload = self
            .inner
            .request(
                Method::POST,
                &format!("orgs/{org}/projects/{project}/reports/-/yaml"),
                Some(&json!({ "options": options })),
            )
            .await?;
        decode_object(payload, "yaml", "generate report yaml response")
    }
}

/// Keep report-kind resources, decoding each `report` payload and
/// filling its name in from the resource metadata.
fn collect_reports(payload: &Value) -> RillResult<Vec<Report>> {
    let Some(resources) = payload.get("resources").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut reports = Vec::new();
    for resource in resources {
        if resource_kind(resource) != Some(REPORT_KIND) {
            continue;
        }
        let mut report: Report = match resource.get("report") {
            Some(body) => decode(body.clone(), "report resource")?,
            None => Report::default(),
        };
        report.name = resource_name(resource).map(str::to_string);
        reports.push(report);
    }
    Ok(reports)
}
