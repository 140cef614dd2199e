//! Typed views of the service's JSON payloads.
//!
//! The service speaks camelCase JSON, omits fields freely, and grows
//! new ones without notice. Every struct here follows suit: camelCase
//! renames, unknown fields ignored, `Option` wherever the service may
//! leave something out.

pub mod alerts;
pub mod identity;
pub mod orgs;
pub mod projects;
pub mod publicurls;
pub mod reports;
pub mod users;

pub use alerts::{
    Alert, AlertExecution, AlertOptions, AlertSpec, AlertState, CreateAlertResponse,
    DeleteAlertResponse, EditAlertResponse, UnsubscribeAlertResponse,
};
pub use identity::{Token, User};
pub use orgs::Org;
pub use projects::{Deployment, Project};
pub use publicurls::{CreatePublicUrlResponse, MagicAuthToken, PublicUrlOptions, ResourceName};
pub use reports::{
    CreateReportResponse, DeleteReportResponse, EditReportResponse, ExportFormat, Notifier,
    Report, ReportExecution, ReportOptions, ReportSpec, ReportState, Schedule,
    TriggerReportResponse, UnsubscribeReportResponse,
};
pub use users::{MemberUsergroup, OrganizationMemberUser, Usergroup};
