//! Error types shared by the API client and the session store

use serde::Deserialize;

/// Failure of a single call to the backend REST API
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        /// Message extracted from the `detail` field of the error body
        detail: Option<String>,
    },

    /// The request never produced a response (offline, CORS, DNS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Browser APIs are not reachable (server-side rendering)
    #[error("API not available on the server")]
    Unavailable,
}

/// Error body returned by the backend: `{"detail": "..."}` or, for
/// request validation failures, `{"detail": [{"msg": "...", ...}]}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// Build an error from a non-success HTTP status and its raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| extract_detail(&b.detail));
        ApiError::Status { status, detail }
    }

    /// Whether the backend rejected the bearer credential
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }

    /// Message supplied by the backend, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// User-facing message: the backend's detail, or `fallback` when the
    /// backend said nothing useful
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail()
            .filter(|d| !d.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

fn extract_detail(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// Failure of a session store action
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A more recent session action finished first; this response was dropped
    #[error("Superseded by a more recent session action")]
    Superseded,
}
