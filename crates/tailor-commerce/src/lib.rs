//! Domain types and rules for a tailoring storefront.
//!
//! - **Money & words**: rupee/paisa arithmetic and Indian-style
//!   number-to-words for printed slips
//! - **Catalog & cart**: product variants, cart lines and their remote
//!   change plans, pricing
//! - **Checkout**: cash-on-delivery orders, stock reservation and order
//!   status groups
//! - **Bill**: the ten-row order slip with derived totals and its stored shape
//! - **Booking**: measurement appointments, the status pipeline and the
//!   back-office desk
//!
//! # Example
//!
//! ```
//! use tailor_commerce::prelude::*;
//!
//! let mut bill = BillData::new();
//! bill.set_qty(1, Some(2.0)).unwrap();
//! bill.set_rate(1, Some(Money::from_parts(4500, 0, Currency::NPR))).unwrap();
//! bill.set_advance(Some(Money::from_parts(3000, 0, Currency::NPR))).unwrap();
//!
//! assert_eq!(bill.total.display(), "Rs. 9000.00");
//! assert_eq!(bill.balance.display(), "Rs. 6000.00");
//! assert_eq!(bill.amount_in_words, "Rupees Nine Thousand Only");
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod words;

pub mod bill;
pub mod booking;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::words::{amount_to_words, money_to_words, number_to_words};

    // Catalog
    pub use crate::catalog::ProductVariant;

    // Cart
    pub use crate::cart::{CartChange, CartLine, CartLines, CartQuote, QuotedLine};

    // Checkout
    pub use crate::checkout::{NewOrder, Order, OrderGroup, OrderItem, OrderLine, OrderStatus};

    // Bill
    pub use crate::bill::{BillData, BillItem, OrderSlip, ShopInfo};

    // Booking
    pub use crate::booking::{
        Booking, BookingDesk, BookingFilter, BookingNotice, BookingStats, BookingStatus, Garment,
        MeasurementCell, MeasurementGrid, MeasurementOutcome, MeasurementType, MeasurementUpdate,
        NewBooking,
    };
}
