//! Namespaced API surfaces handed out by the client.
//!
//! Each resource is a lightweight handle over the client's shared
//! state. They are constructed through the accessors on
//! [`RillClient`](crate::client::RillClient), never directly.

pub mod alerts;
pub mod auth;
pub mod orgs;
pub mod projects;
pub mod publicurls;
pub mod query;
pub mod reports;
pub mod usergroups;
pub mod users;

pub use alerts::AlertsResource;
pub use auth::AuthResource;
pub use orgs::OrgsResource;
pub use projects::ProjectsResource;
pub use publicurls::PublicUrlsResource;
pub use query::QueryResource;
pub use reports::ReportsResource;
pub use usergroups::UsergroupsResource;
pub use users::UsersResource;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RillError, RillResult};

/// Decode a JSON payload, labelling failures with what was being read.
pub(crate) fn decode<T: DeserializeOwned>(value: Value, context: &str) -> RillResult<T> {
    serde_json::from_value(value).map_err(|source| RillError::Decode {
        context: context.to_string(),
        source,
    })
}

/// Decode an envelope's list field. A missing field is an empty list,
/// matching how the service trims empty arrays.
pub(crate) fn decode_list<T: DeserializeOwned>(
    mut value: Value,
    key: &str,
    context: &str,
) -> RillResult<Vec<T>> {
    match take_field(&mut value, key) {
        Value::Null => Ok(Vec::new()),
        field => decode(field, context),
    }
}

/// Decode an envelope's object field.
pub(crate) fn decode_object<T: DeserializeOwned>(
    mut value: Value,
    key: &str,
    context: &str,
) -> RillResult<T> {
    decode(take_field(&mut value, key), context)
}

/// Decode a response that may legitimately be empty.
pub(crate) fn decode_lenient<T: DeserializeOwned + Default>(
    value: Value,
    context: &str,
) -> RillResult<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    decode(value, context)
}

fn take_field(value: &mut Value, key: &str) -> Value {
    value.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}

/// `meta.name.kind` of a runtime resource.
pub(crate) fn resource_kind(resource: &Value) -> Option<&str> {
    resource.get("meta")?.get("name")?.get("kind")?.as_str()
}

/// `meta.name.name` of a runtime resource.
pub(crate) fn resource_name(resource: &Value) -> Option<&str> {
    resource.get("meta")?.get("name")?.get("name")?.as_str()
}
