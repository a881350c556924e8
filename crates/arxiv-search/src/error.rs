//! Error types for the arXiv search client.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors surfaced by the search pipeline.
///
/// Per-entry validation failures are not part of this taxonomy: the parser
/// drops those entries and keeps going.
#[derive(thiserror::Error, Debug)]
pub enum ArxivError {
    /// Caller supplied invalid search parameters.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the parameters
        message: String,
    },

    /// Timeout, connection failure, 429 or 5xx after all attempts.
    #[error("Network error{}: {message}", status_suffix(.status))]
    Network {
        /// HTTP status of the last attempt, if one was received
        status: Option<u16>,
        /// Description of the last failure
        message: String,
    },

    /// 4xx response other than 429. Never retried.
    #[error("Client error (status {status}): {message}")]
    Client {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Response body was not a readable Atom feed.
    #[error("Failed to parse arXiv response: {message}")]
    Parsing {
        /// What went wrong
        message: String,
        /// Underlying XML error, when the document was not well-formed
        #[source]
        source: Option<roxmltree::Error>,
    },
}

#[allow(clippy::ref_option)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl ArxivError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create a network error, optionally tagged with an HTTP status.
    #[must_use]
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Network { status, message: message.into() }
    }

    /// Create a client error.
    #[must_use]
    pub fn client(status: u16, message: impl Into<String>) -> Self {
        Self::Client { status, message: message.into() }
    }

    /// Create a parsing error without an underlying XML cause.
    #[must_use]
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing { message: message.into(), source: None }
    }

    /// Returns true if the fetcher retries this kind of failure.
    ///
    /// Only network failures are retried, and only inside the fetcher.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// HTTP status attached to this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            Self::Client { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Convert to a message safe to show end users.
    ///
    /// Network and parsing details stay in the logs.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Validation { .. } => "There was a problem with your search query or parameters. \
                 Please check your input and try again."
                .to_string(),
            Self::Network { status, .. } => {
                let mut message = "Could not connect to the arXiv service. \
                     Please try again later."
                    .to_string();
                if let Some(status) = status {
                    message.push_str(&format!(" (Server responded with status: {status})"));
                }
                message
            }
            Self::Client { status, .. } => format!(
                "The arXiv service rejected the request. Please adjust your search. \
                 (Received API status: {status})"
            ),
            Self::Parsing { .. } => "There was an issue processing the data received from arXiv. \
                 Please try again later."
                .to_string(),
        }
    }
}

impl From<roxmltree::Error> for ArxivError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Parsing { message: "response is not well-formed XML".to_string(), source: Some(err) }
    }
}

/// Errors from the HTTP route layer.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Error from the search pipeline
    #[error("Search error: {0}")]
    Search(#[from] ArxivError),

    /// Request parameters were missing or malformed
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// Offending query parameter
        field: String,
        /// Validation error message
        message: String,
    },
}

impl ServerError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput { field: field.into(), message: message.into() }
    }

    /// HTTP status returned to the caller.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } | Self::Search(ArxivError::Validation { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Self::Search(ArxivError::Network { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Search(ArxivError::Client { .. } | ArxivError::Parsing { .. }) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Short machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::Search(ArxivError::Validation { .. }) => "validation",
            Self::Search(ArxivError::Network { .. }) => "network",
            Self::Search(ArxivError::Client { .. }) => "upstream_client",
            Self::Search(ArxivError::Parsing { .. }) => "parsing",
        }
    }

    /// Convert to a user-friendly error message.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Search(err) => err.to_user_message(),
            Self::InvalidInput { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Search request failed");
        } else {
            tracing::warn!(error = %self, kind = self.kind(), "Rejected search request");
        }

        let body = Json(serde_json::json!({
            "error": self.kind(),
            "message": self.to_user_message(),
        }));
        (status, body).into_response()
    }
}

/// Result type alias for search pipeline operations.
pub type ArxivResult<T> = Result<T, ArxivError>;

/// Result type alias for route handlers.
pub type ServerResult<T> = Result<T, ServerError>;
