//! Order slip bills.
//!
//! A bill is ten rows of description, quantity, rate and amount with a
//! total, an advance and the balance due, all in rupees and paisa. Totals are
//! transcribed into words for the printed slip.

mod data;
mod item;
mod slip;
pub mod wire;

use crate::money::Currency;

pub use data::BillData;
pub use item::{default_items, BillItem, DEFAULT_DESCRIPTIONS};
pub use slip::{whatsapp_phone, OrderSlip, ShopInfo, COUNTRY_CODE};

/// Bills are written in rupees.
pub const BILL_CURRENCY: Currency = Currency::NPR;
