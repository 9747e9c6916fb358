//! HTTP client for the tailoring storefront API.
//!
//! A [`FetchClient`] builds requests against a base URL and hands them to a
//! [`Transport`]. Under Spin the transport is [`SpinTransport`], natively it
//! is `ReqwestTransport`, and tests use [`MockTransport`]. Failures are normalized into one user-facing line by
//! [`error_message`].
//!
//! # Example
//!
//! ```rust,ignore
//! use tailor_data::{FetchClient, MockTransport};
//!
//! let client = FetchClient::new(MockTransport::new())
//!     .with_base_url("https://shop.example.com");
//!
//! let cart: serde_json::Value = client
//!     .get("api/products/cart/")
//!     .bearer_auth(token)
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod api_error;
mod error;
mod mock;
mod request;
mod response;
mod transport;

pub use api_error::{
    error_details, error_message, is_auth_error, is_network_error, ApiError, ErrorDetails,
    FALLBACK_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE,
};
pub use error::FetchError;
pub use mock::MockTransport;
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
#[cfg(target_arch = "wasm32")]
pub use transport::SpinTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;
pub use transport::Transport;

use std::collections::BTreeMap;

/// HTTP client for making outbound requests.
pub struct FetchClient<T> {
    transport: T,
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
}

impl<T: Transport> FetchClient<T> {
    /// Create a new HTTP client over a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: BTreeMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Put, url)
    }

    /// Create a PATCH request.
    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Patch, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        let url = self.resolve(url.into());
        let mut builder = RequestBuilder::new(method, url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }

    fn resolve(&self, url: String) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url;
        }
        match &self.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
            None => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a, T> {
    client: &'a FetchClient<T>,
    builder: RequestBuilder,
}

impl<T: Transport> ClientRequestBuilder<'_, T> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as JSON.
    pub fn json<B: serde::Serialize + ?Sized>(mut self, value: &B) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder.build();
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        match self.client.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(%method, %url, status = response.status, "received response");
                Ok(response)
            }
            Err(e) => {
                tracing::debug!(%method, %url, error = %e, "request failed");
                Err(e)
            }
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        error_message, ApiError, FetchClient, FetchError, Method, MockTransport, Response,
        Transport,
    };
}
