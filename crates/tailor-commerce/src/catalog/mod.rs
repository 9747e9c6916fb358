//! Product catalog module.
//!
//! Only the variant is modelled here: it is the purchasable unit the cart
//! and stock checks work against.

mod variant;

pub use variant::{normalize_color_code, ProductVariant, LOW_STOCK_THRESHOLD};
