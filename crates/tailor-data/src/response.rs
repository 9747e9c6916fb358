//! HTTP response handling.

use crate::{ApiError, FetchError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with the given status.
    pub fn json_value(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        // Case-insensitive header lookup
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Convert to a Result, turning non-2xx answers into [`ApiError`].
    ///
    /// A JSON body is kept as the error data; anything else becomes a
    /// generic status message.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let data = serde_json::from_slice::<serde_json::Value>(&self.body).ok();
        let error = match data {
            Some(data) => ApiError::new(self.status, Some(data)),
            None => ApiError::new(self.status, None)
                .with_message(format!("HTTP error! status: {}", self.status)),
        };
        Err(FetchError::Api(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(301, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_json() {
        let resp = Response::json_value(201, &json!({"bill_number": "20260314-AB12"}));
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["bill_number"], "20260314-AB12");
        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_error_for_status_keeps_json_data() {
        let resp = make_response(400, br#"{"pcs": ["Ensure this value is greater than 0."]}"#);
        let err = resp.error_for_status().unwrap_err();
        let api = err.api_error().unwrap();
        assert_eq!(api.status, 400);
        assert_eq!(api.field_errors(), vec!["Ensure this value is greater than 0."]);
    }

    #[test]
    fn test_error_for_status_html_body() {
        let resp = make_response(502, b"<html>Bad Gateway</html>");
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(
            err.api_error().unwrap().message.as_deref(),
            Some("HTTP error! status: 502")
        );
    }

    #[test]
    fn test_error_for_status_success() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
    }
}
