//! Alert models.
//!
//! Alerts share the report resource layout (spec plus state) with a
//! resolver in place of an export, so [`Schedule`] and [`Notifier`]
//! come from the reports module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::reports::{Notifier, Schedule};

/// Alert configuration as the runtime stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertSpec {
    pub display_name: Option<String>,
    pub trigger: Option<bool>,
    pub refresh_schedule: Option<Schedule>,
    pub timeout_seconds: Option<i64>,
    /// e.g. `metrics_threshold`.
    pub resolver: Option<String>,
    pub resolver_properties: Option<Map<String, Value>>,
    pub query_name: Option<String>,
    pub query_args_json: Option<String>,
    pub metrics_view_name: Option<String>,
    pub renotify: Option<bool>,
    pub renotify_after_seconds: Option<i64>,
    pub notifiers: Option<Vec<Notifier>>,
    pub annotations: Option<HashMap<String, String>>,
    pub watermark_inherit: Option<bool>,
    pub intervals_iso_duration: Option<String>,
    pub intervals_limit: Option<i64>,
    pub intervals_check_unclosed: Option<bool>,
}

/// One alert evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertExecution {
    pub adhoc: Option<bool>,
    pub error_message: Option<String>,
    pub sent: Option<bool>,
    pub sent_time: Option<String>,
    pub result_time: Option<String>,
    pub execution_time: Option<String>,
    pub started_on: Option<String>,
    pub finished_on: Option<String>,
}

/// Evaluation status and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertState {
    pub next_run_on: Option<String>,
    pub current_execution: Option<AlertExecution>,
    pub execution_history: Option<Vec<AlertExecution>>,
    pub execution_count: Option<i64>,
}

/// A complete alert resource. `name` is filled in from resource
/// metadata after decoding, as with reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Alert {
    pub name: Option<String>,
    pub spec: Option<AlertSpec>,
    pub state: Option<AlertState>,
}

/// Options for creating or editing an alert.
///
/// Serializes camelCase with nulls dropped, the shape the admin API
/// expects under its `options` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_duration: Option<String>,
    /// e.g. `metrics_threshold`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver_properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_args_json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_view_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renotify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renotify_after_seconds: Option<i64>,
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
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateAlertResponse {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct EditAlertResponse {}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct DeleteAlertResponse {}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct UnsubscribeAlertResponse {}
