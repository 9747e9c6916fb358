//! Order slip rows.

use crate::bill::BILL_CURRENCY;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Descriptions printed on a fresh slip. Rows 8-10 are left blank for
/// anything else the customer orders.
pub const DEFAULT_DESCRIPTIONS: [&str; 10] = [
    "Coat",
    "Shirt",
    "Pant",
    "Tie",
    "Safari",
    "W. Coat",
    "Daura Suruwal",
    "",
    "",
    "",
];

/// One row of the order slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "crate::bill::wire::BillItemWire", into = "crate::bill::wire::BillItemWire")]
pub struct BillItem {
    /// Serial number, 1-based.
    pub sn: u8,
    pub description: String,
    /// Quantity; fractional quantities (e.g. metres of cloth) are allowed.
    pub qty: Option<f64>,
    /// Rate per unit.
    pub rate: Option<Money>,
    /// Line amount, derived from qty and rate unless set by hand.
    pub amount: Option<Money>,
}

impl BillItem {
    /// An empty row.
    pub fn new(sn: u8, description: impl Into<String>) -> Self {
        Self {
            sn,
            description: description.into(),
            qty: None,
            rate: None,
            amount: None,
        }
    }

    /// Set the quantity and re-derive the amount.
    pub fn set_qty(&mut self, qty: Option<f64>) {
        self.qty = qty.filter(|q| q.is_finite());
        self.derive_amount();
    }

    /// Set the rate and re-derive the amount.
    pub fn set_rate(&mut self, rate: Option<Money>) {
        self.rate = rate;
        self.derive_amount();
    }

    /// Override the amount by hand.
    pub fn set_amount(&mut self, amount: Option<Money>) {
        self.amount = amount;
    }

    /// Check if the row carries anything besides its description.
    pub fn is_filled(&self) -> bool {
        self.qty.is_some() || self.rate.is_some() || self.amount.is_some()
    }

    /// Amount, or zero for an empty row.
    pub fn amount_or_zero(&self) -> Money {
        self.amount.unwrap_or_else(|| Money::zero(BILL_CURRENCY))
    }

    // Both present: qty * rate. Both missing or zero: cleared. Otherwise the
    // amount is left as it was so a hand-entered figure survives.
    fn derive_amount(&mut self) {
        let qty = self.qty.unwrap_or(0.0);
        let rate = self.rate.unwrap_or_else(|| Money::zero(BILL_CURRENCY));
        if qty != 0.0 && !rate.is_zero() {
            self.amount = Some(rate.multiply_decimal(qty));
        } else if qty == 0.0 && rate.is_zero() {
            self.amount = None;
        }
    }
}

/// The ten rows of a fresh slip.
pub fn default_items() -> Vec<BillItem> {
    DEFAULT_DESCRIPTIONS
        .iter()
        .zip(1u8..)
        .map(|(description, sn)| BillItem::new(sn, *description))
        .collect()
}
