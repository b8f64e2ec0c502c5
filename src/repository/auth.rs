//! Auth repository: login, signup and OAuth against the FoodHub API.
//!
//! ERROR HANDLING
//! ==============
//! Each call is a single attempt. Known statuses map to fixed messages per
//! operation, other failures embed the server's own message, and transport
//! errors become a generic network failure. A 2xx without a token is a
//! failure too, so callers can store `token` without re-checking it.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::ClientError;
use crate::net::types::{AuthResponse, LoginRequest, OAuthRequest, SignupRequest};
use crate::net::{ApiRequest, RawResponse, Transport};
use crate::session::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthOperation {
    Login,
    Signup,
    OAuth,
}

impl AuthOperation {
    fn path(self) -> &'static str {
        match self {
            Self::Login => "auth/login",
            Self::Signup => "auth/signup",
            Self::OAuth => "auth/oauth",
        }
    }

    /// Prefix for messages that embed a server detail.
    fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Signup",
            Self::OAuth => "OAuth login",
        }
    }

    fn fixed_message(self, status: u16) -> Option<&'static str> {
        match (self, status) {
            (Self::Login, 400) => Some("Invalid email or password"),
            (Self::Login, 401) => Some("Authentication failed"),
            (Self::Login, 404) => Some("Service not found"),
            (Self::Signup, 400) => Some("Invalid registration data"),
            (Self::Signup, 409) => Some("User already exists"),
            (Self::OAuth, 400) => Some("Invalid OAuth token"),
            (Self::OAuth, 401) => Some("OAuth authentication failed"),
            (_, 500) => Some("Server error"),
            _ => None,
        }
    }
}

pub struct AuthRepository {
    transport: Arc<dyn Transport>,
}

impl AuthRepository {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `POST /auth/login` with email and password.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] carrying the user-facing failure message.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        self.execute(AuthOperation::Login, &body).await
    }

    /// `POST /auth/signup`; `role` is sent as its API name.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] carrying the user-facing failure message.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<AuthResponse, ClientError> {
        let body = SignupRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            role: role.api_role().to_owned(),
        };
        self.execute(AuthOperation::Signup, &body).await
    }

    /// `POST /auth/oauth` exchanging a provider token (`google`, `facebook`).
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] carrying the user-facing failure message.
    pub async fn oauth_login(
        &self,
        provider: &str,
        provider_token: &str,
        role: UserRole,
    ) -> Result<AuthResponse, ClientError> {
        let body = OAuthRequest {
            provider: provider.to_owned(),
            token: provider_token.to_owned(),
            kind: role.api_role().to_owned(),
        };
        self.execute(AuthOperation::OAuth, &body).await
    }

    async fn execute<T: Serialize + Sync>(&self, op: AuthOperation, body: &T) -> Result<AuthResponse, ClientError> {
        let request = ApiRequest::post_json(op.path(), body)
            .map_err(|e| ClientError::Validation(format!("{} failed: {e}", op.label())))?;

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(operation = op.label(), error = %e, "auth request failed");
                return Err(ClientError::Network(format!("Network error: {e}")));
            }
        };

        let result = interpret_auth_response(op, &response);
        match &result {
            Ok(auth) => info!(operation = op.label(), has_user = auth.user.is_some(), "auth succeeded"),
            Err(e) => warn!(operation = op.label(), status = response.status, code = e.error_code(), "auth rejected"),
        }
        result
    }
}

pub(crate) fn interpret_auth_response(op: AuthOperation, response: &RawResponse) -> Result<AuthResponse, ClientError> {
    if !response.is_success() {
        let message = op
            .fixed_message(response.status)
            .map_or_else(|| format!("{} failed: {}", op.label(), response.server_message()), str::to_owned);
        return Err(ClientError::from_status(response.status, message));
    }

    if response.body.trim().is_empty() {
        return Err(ClientError::EmptyResponse(format!("{} failed: Empty response from server", op.label())));
    }

    let auth: AuthResponse = serde_json::from_str(&response.body)
        .map_err(|_| ClientError::EmptyResponse(format!("{} failed: Unexpected response from server", op.label())))?;

    if auth.token.trim().is_empty() {
        return Err(ClientError::EmptyResponse(format!("{} failed: No token received", op.label())));
    }
    Ok(auth)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
