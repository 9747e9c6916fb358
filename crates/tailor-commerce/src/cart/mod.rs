//! Shopping cart module.
//!
//! Contains the cart line collection shared by the local (anonymous) and
//! remote (authenticated) carts, and pricing against catalog variants.

mod lines;
mod quote;

pub use lines::{CartChange, CartLine, CartLines};
pub use quote::{CartQuote, QuotedLine};
