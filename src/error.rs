//! Client error taxonomy.
//!
//! DESIGN
//! ======
//! Repositories never panic or raise past their boundary: every call returns
//! `Result<_, ClientError>`. The `Display` text of each variant is the final
//! user-facing message, so screens surface `err.to_string()` as-is.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Errors surfaced by the session, repositories and screens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Blank or malformed input, or a 4xx rejection of the request payload.
    #[error("{0}")]
    Validation(String),

    /// Missing credentials locally, or a 401/403 from the server.
    #[error("{0}")]
    Auth(String),

    /// The server answered 404.
    #[error("{0}")]
    NotFound(String),

    /// The server answered 5xx.
    #[error("{0}")]
    Server(String),

    /// The request never produced an HTTP response.
    #[error("{0}")]
    Network(String),

    /// A 2xx response without a usable body or token.
    #[error("{0}")]
    EmptyResponse(String),
}

impl ClientError {
    /// Classify a non-2xx HTTP status, attaching the user-facing message.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Auth(message),
            404 => Self::NotFound(message),
            500..=599 => Self::Server(message),
            _ => Self::Validation(message),
        }
    }

    /// Stable machine-readable code for logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Auth(_) => "E_AUTH",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::Server(_) => "E_SERVER",
            Self::Network(_) => "E_NETWORK",
            Self::EmptyResponse(_) => "E_EMPTY_RESPONSE",
        }
    }

    /// The user-facing message without the variant wrapper.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m)
            | Self::Auth(m)
            | Self::NotFound(m)
            | Self::Server(m)
            | Self::Network(m)
            | Self::EmptyResponse(m) => m,
        }
    }
}
