//! Scheduled report models.
//!
//! A report resource splits into a `spec` (configuration) and a `state`
//! (execution history). Mutations go through [`ReportOptions`], which
//! serializes camelCase with nulls dropped, the shape the admin API
//! expects under its `options` key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Export file format for report deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    #[serde(rename = "EXPORT_FORMAT_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "EXPORT_FORMAT_CSV")]
    Csv,
    #[serde(rename = "EXPORT_FORMAT_XLSX")]
    Xlsx,
    #[serde(rename = "EXPORT_FORMAT_PARQUET")]
    Parquet,
}

/// Cron-style schedule attached to a report or alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub ref_update: Option<bool>,
    pub disable: Option<bool>,
    pub cron: Option<String>,
    pub ticker_seconds: Option<i64>,
    pub time_zone: Option<String>,
}

/// Delivery channel, e.g. `email` or `slack` with its properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Notifier {
    pub connector: Option<String>,
    pub properties: Option<Map<String, Value>>,
}

/// Report configuration as the runtime stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportSpec {
    pub display_name: Option<String>,
    pub trigger: Option<bool>,
    pub refresh_schedule: Option<Schedule>,
    pub timeout_seconds: Option<i64>,
    pub query_name: Option<String>,
    pub query_args_json: Option<String>,
    pub export_limit: Option<i64>,
    pub export_format: Option<ExportFormat>,
    pub export_include_header: Option<bool>,
    pub notifiers: Option<Vec<Notifier>>,
    pub annotations: Option<HashMap<String, String>>,
    pub watermark_inherit: Option<bool>,
    pub intervals_iso_duration: Option<String>,
    pub intervals_limit: Option<i64>,
    pub intervals_check_unclosed: Option<bool>,
}

/// One report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportExecution {
    pub adhoc: Option<bool>,
    pub error_message: Option<String>,
    pub report_time: Option<String>,
    pub started_on: Option<String>,
    pub finished_on: Option<String>,
}

/// Execution status and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportState {
    pub next_run_on: Option<String>,
    pub current_execution: Option<ReportExecution>,
    pub execution_history: Option<Vec<ReportExecution>>,
    pub execution_count: Option<i64>,
}

/// A complete report resource.
///
/// The runtime keeps the name in resource metadata rather than the
/// payload, so listings fill `name` in after decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Report {
    pub name: Option<String>,
    pub spec: Option<ReportSpec>,
    pub state: Option<ReportState>,
}

/// Options for creating or editing a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_args_json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_format: Option<ExportFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_include_header: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_recipients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_users: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_channels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_webhooks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_open_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_open_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_open_mode: Option<String>,
    /// Runtime filter expression, passed through opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateReportResponse {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct EditReportResponse {}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct DeleteReportResponse {}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct TriggerReportResponse {}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct UnsubscribeReportResponse {}
