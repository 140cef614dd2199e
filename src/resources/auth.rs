//! Current-user operations.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::error::RillResult;
use crate::models::{Token, User};

use super::{decode_list, decode_object};

/// Identity of the configured token.
#[derive(Clone)]
pub struct AuthResource {
    inner: Arc<ClientInner>,
}

impl AuthResource {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// The user this client authenticates as. Cached.
    pub async fn whoami(&self) -> RillResult<User> {
        let payload = self.inner.get_cached("users/current").await?;
        decode_object(payload, "user", "current user")
    }

    /// Personal access tokens of the current user. Cached.
    pub async fn list_tokens(&self) -> RillResult<Vec<Token>> {
        let payload = self.inner.get_cached("users/current/tokens").await?;
        decode_list(payload, "tokens", "token list")
    }
}
