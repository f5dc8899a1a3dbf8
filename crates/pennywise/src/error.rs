use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Error taxonomy of the client core.
///
/// `Network` is a transport failure (DNS, refused connection, broken body
/// stream). `Request` is a non-2xx response; its message comes from the
/// backend body's `error` field when present. `Validation` is raised before
/// any request is built. Auth-specific outcomes (invalid credentials,
/// existing account) arrive as `Request` with the backend's message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Request { status: StatusCode, message: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn request(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for 401/403 responses, i.e. the session is no longer accepted.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Request { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}
