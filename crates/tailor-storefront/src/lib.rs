//! Storefront services for the tailoring shop.
//!
//! These compose the domain types from `tailor-commerce` with the HTTP client
//! from `tailor-data` and local storage from `tailor-cache`:
//!
//! - [`StorefrontApi`] - typed REST calls (cart, sales, bookings, bills)
//! - [`CartStore`] - the shopper's cart, local when signed out and remote
//!   when signed in, and cash-on-delivery checkout
//! - [`BillEditor`] - edit, save, email and share a booking's bill
//!
//! Outcomes the user should see come back as a [`Notice`].

mod api;
mod auth;
mod bill_editor;
mod cart_sync;
mod error;
mod notice;

pub use api::StorefrontApi;
pub use auth::AuthStatus;
pub use bill_editor::{BillDate, BillEditor, SharedSlip};
pub use cart_sync::{CartStore, CART_ITEMS_KEY, NO_PRODUCT_DETAIL, ORDER_PLACED};
pub use error::StorefrontError;
pub use notice::{Notice, NoticeLevel};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AuthStatus, BillEditor, CartStore, Notice, NoticeLevel, StorefrontApi, StorefrontError,
    };
}
