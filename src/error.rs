//! Unified SDK error types.

use thiserror::Error;

/// Fallback shown when a failed fetch carries no usable message.
pub const FETCH_FAILED_FALLBACK: &str = "Fetch failed";

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// Human-readable message for the dashboard.
    ///
    /// Response bodies are passed through verbatim; a FastAPI-style
    /// `{"detail": "..."}` body is unwrapped to its detail string.
    pub fn user_message(&self) -> String {
        match self {
            SdkError::Http(e) => e.user_message(),
            SdkError::Validation(msg) | SdkError::Other(msg) if !msg.is_empty() => msg.clone(),
            SdkError::Serde(e) => e.to_string(),
            _ => FETCH_FAILED_FALLBACK.to_string(),
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    fn status(&self) -> Option<u16> {
        match self {
            HttpError::ServerError { status, .. } => Some(*status),
            HttpError::RateLimited { .. } => Some(429),
            HttpError::Unauthorized => Some(401),
            HttpError::NotFound(_) => Some(404),
            HttpError::BadRequest(_) => Some(400),
            _ => None,
        }
    }

    fn body(&self) -> Option<&str> {
        match self {
            HttpError::ServerError { body, .. }
            | HttpError::NotFound(body)
            | HttpError::BadRequest(body) => Some(body.as_str()),
            _ => None,
        }
    }

    /// Message shown to the user: the body text if any, else `HTTP <status>`.
    pub fn user_message(&self) -> String {
        if let Some(body) = self.body().map(str::trim).filter(|b| !b.is_empty()) {
            return detail_message(body).unwrap_or_else(|| body.to_string());
        }
        match self.status() {
            Some(status) => format!("HTTP {}", status),
            None => self.to_string(),
        }
    }
}

fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

/// Errors produced while applying poll results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The Gateway lookup failed. The message is ready for display.
    #[error("{0}")]
    FetchFailed(String),

    /// The result belongs to a session that has since been reconfigured.
    #[error("stale result from generation {generation} (current {current})")]
    StaleResult { generation: u64, current: u64 },
}

impl From<SdkError> for PollError {
    fn from(e: SdkError) -> Self {
        let msg = e.user_message();
        if msg.is_empty() {
            PollError::FetchFailed(FETCH_FAILED_FALLBACK.to_string())
        } else {
            PollError::FetchFailed(msg)
        }
    }
}
