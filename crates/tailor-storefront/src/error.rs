//! Storefront error types.

use tailor_cache::CacheError;
use tailor_commerce::CommerceError;
use tailor_data::{error_message, FetchError};
use thiserror::Error;

/// Errors raised by storefront services.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// The API call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A domain rule was broken.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Local storage failed.
    #[error("Local storage error: {0}")]
    Cache(#[from] CacheError),

    /// The action needs a signed-in user.
    #[error("Please log in to continue.")]
    NotAuthenticated,

    /// The bill has to be saved before it can leave the shop.
    #[error("Please save the bill first before {0}.")]
    BillNotSaved(&'static str),

    /// Saving would replace a stored bill and nobody confirmed it.
    #[error("A bill is already saved for this booking. Confirm to overwrite it.")]
    OverwriteNotConfirmed,
}

impl StorefrontError {
    /// One line suitable for a notice.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Fetch(e) => error_message(e),
            other => other.to_string(),
        }
    }

    /// The `detail` the API answered with, if any.
    pub fn api_detail(&self) -> Option<String> {
        match self {
            StorefrontError::Fetch(e) => e.api_error().and_then(|api| api.detail()),
            _ => None,
        }
    }
}
