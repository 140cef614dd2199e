//! Query execution against project runtimes.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::ClientInner;
use crate::error::{RillError, RillResult};
use crate::query::{MetricsQuery, MetricsSqlQuery, QueryResult, SqlQuery};

use super::decode;

/// Executes queries through a project runtime. Results are never
/// cached.
#[derive(Clone)]
pub struct QueryResource {
    inner: Arc<ClientInner>,
}

impl QueryResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Run a structured metrics query against the default project.
    pub async fn metrics(&self, query: &MetricsQuery) -> RillResult<QueryResult> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        self.metrics_in(&org, &project, query).await
    }

    /// Run a structured metrics query against a named project.
    pub async fn metrics_in(
        &self,
        org: &str,
        project: &str,
        query: &MetricsQuery,
    ) -> RillResult<QueryResult> {
        self.inner.logger.info(&format!(
            "Executing metrics query (view={}, project={org}/{project})",
            query.metrics_view
        ));
        self.execute("metrics", org, project, query).await
    }

    /// Run SQL with metrics-view context against the default project.
    pub async fn metrics_sql(&self, query: &MetricsSqlQuery) -> RillResult<QueryResult> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        self.metrics_sql_in(&org, &project, query).await
    }

    /// Run SQL with metrics-view context against a named project.
    pub async fn metrics_sql_in(
        &self,
        org: &str,
        project: &str,
        query: &MetricsSqlQuery,
    ) -> RillResult<QueryResult> {
        self.inner.logger.info(&format!(
            "Executing metrics SQL query (project={org}/{project})"
        ));
        self.execute("metrics-sql", org, project, query).await
    }

    /// Run raw SQL against the default project. Admin only.
    pub async fn sql(&self, query: &SqlQuery) -> RillResult<QueryResult> {
        let (org, project) = self.inner.resolve_org_project(None, None)?;
        self.sql_in(&org, &project, query).await
    }

    /// Run raw SQL against a named project. Admin only.
    pub async fn sql_in(
        &self,
        org: &str,
        project: &str,
        query: &SqlQuery,
    ) -> RillResult<QueryResult> {
        self.inner
            .logger
            .info(&format!("Executing raw SQL query (project={org}/{project})"));
        self.execute("sql", org, project, query).await
    }

    /// POST a query body to one of the runtime query APIs. The runtime
    /// answers with a bare array of rows.
    async fn execute<B: Serialize>(
        &self,
        api: &str,
        org: &str,
        project: &str,
        body: &B,
    ) -> RillResult<QueryResult> {
        let endpoint = format!("organizations/{org}/projects/{project}/runtime/api/{api}");
        let payload = self
            .inner
            .request(Method::POST, &endpoint, Some(body))
            .await?;

        let context = format!("{api} query response");
        match payload {
            Value::Array(_) => {
                let data: Vec<Map<String, Value>> = decode(payload, &context)?;
                Ok(QueryResult { data })
            }
            other => Err(RillError::Decode {
                context,
                source: unexpected_shape(&other),
            }),
        }
    }
}

fn unexpected_shape(value: &Value) -> serde_json::Error {
    use serde::de::Error;
    serde_json::Error::custom(format!(
        "expected an array of rows, got {}",
        crate::query::json_type_name(value)
    ))
}
