//! Turning API failures into one user-facing message.
//!
//! The backend reports errors in a few shapes: `{"detail": "..."}`,
//! per-field lists such as `{"phone_number": ["This field is required."]}`,
//! `{"error": "..."}`, or a bare string. [`error_message`] reduces all of
//! them, plus transport failures, to a single line for a notice.

use crate::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when the request never reached the server.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Shown when nothing better can be derived.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// A non-2xx answer from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    /// Parsed JSON body, if any.
    pub data: Option<Value>,
    /// Fallback text when the body was not JSON.
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, data: Option<Value>) -> Self {
        Self {
            status,
            data,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The `detail` field, if present and non-empty.
    pub fn detail(&self) -> Option<String> {
        match self.data.as_ref()?.get("detail")? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Null | Value::Bool(false) => None,
            other => Some(other.to_string()),
        }
    }

    /// Field errors flattened in key order, `detail` excluded.
    pub fn field_errors(&self) -> Vec<String> {
        match &self.data {
            Some(Value::Object(map)) => map
                .iter()
                .filter(|(key, _)| key.as_str() != "detail")
                .flat_map(|(_, value)| flatten(value))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Best single message for the user.
    pub fn user_message(&self) -> String {
        if let Some(detail) = self.detail() {
            return detail;
        }
        let fields = self.field_errors();
        if !fields.is_empty() {
            return fields.join(", ");
        }
        if let Some(Value::String(s)) = &self.data {
            if !s.is_empty() {
                return s.clone();
            }
        }
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
    }

    /// Check if the server refused the credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.user_message())
    }
}

fn flatten(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().flat_map(flatten).collect(),
        Value::Object(map) => map.values().flat_map(flatten).collect(),
        Value::String(s) => vec![s.clone()],
        other => vec![other.to_string()],
    }
}

/// Message, status and every reported detail, for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub message: String,
    pub status: Option<u16>,
    pub details: Vec<String>,
}

/// One user-facing line for any request failure.
pub fn error_message(error: &FetchError) -> String {
    match error {
        FetchError::Network(_) | FetchError::Timeout => NETWORK_ERROR_MESSAGE.to_string(),
        FetchError::Api(api) => api.user_message(),
        other => {
            let text = other.to_string();
            if text.is_empty() {
                FALLBACK_ERROR_MESSAGE.to_string()
            } else {
                text
            }
        }
    }
}

/// Full breakdown of a failure.
pub fn error_details(error: &FetchError) -> ErrorDetails {
    let details = match error {
        FetchError::Api(ApiError {
            data: Some(Value::Object(map)),
            ..
        }) => map.values().flat_map(flatten).collect(),
        _ => Vec::new(),
    };
    ErrorDetails {
        message: error_message(error),
        status: error.status(),
        details,
    }
}

/// Check if the failure was 401 or 403.
pub fn is_auth_error(error: &FetchError) -> bool {
    error.api_error().map_or(false, ApiError::is_auth_error)
}

/// Check if the request never got an answer.
pub fn is_network_error(error: &FetchError) -> bool {
    matches!(error, FetchError::Network(_) | FetchError::Timeout)
}
