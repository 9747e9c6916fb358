//! The bill attached to a booking.

use crate::bill::item::{default_items, BillItem};
use crate::bill::BILL_CURRENCY;
use crate::booking::Booking;
use crate::error::CommerceError;
use crate::money::Money;
use crate::words::money_to_words;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rows, totals and dates of an order slip.
///
/// Totals are derived: call [`BillData::recompute`] after editing rows or the
/// advance (the `set_*` helpers do this for you).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "crate::bill::wire::BillDataWire", into = "crate::bill::wire::BillDataWire")]
pub struct BillData {
    pub items: Vec<BillItem>,
    /// Sum of row amounts.
    pub total: Money,
    /// Paid up front.
    pub advance: Option<Money>,
    /// `total - advance`, never below zero.
    pub balance: Money,
    pub amount_in_words: String,
    pub date_ordered: Option<NaiveDate>,
    pub date_delivery: Option<NaiveDate>,
}

impl Default for BillData {
    fn default() -> Self {
        Self::new()
    }
}

impl BillData {
    /// A blank slip with the default rows.
    pub fn new() -> Self {
        Self {
            items: default_items(),
            total: Money::zero(BILL_CURRENCY),
            advance: None,
            balance: Money::zero(BILL_CURRENCY),
            amount_in_words: String::new(),
            date_ordered: None,
            date_delivery: None,
        }
    }

    /// A blank slip dated from the booking's appointment and delivery dates.
    pub fn for_booking(booking: &Booking) -> Self {
        Self {
            date_ordered: Some(booking.preferred_date),
            date_delivery: booking.delivery_date,
            ..Self::new()
        }
    }

    /// The bill to edit for `booking`: its saved bill, or a fresh one
    /// dated from the booking. Totals are recomputed so stale saved
    /// figures never reach the editor.
    pub fn open_for(booking: &Booking) -> Result<Self, CommerceError> {
        let mut bill = booking
            .bill_data
            .clone()
            .unwrap_or_else(|| Self::for_booking(booking));
        bill.recompute()?;
        Ok(bill)
    }

    /// Overlay saved rows onto the current rows by serial number. Saved rows
    /// with no matching serial number are ignored.
    pub fn merge_saved(&mut self, saved: impl IntoIterator<Item = BillItem>) {
        for row in saved {
            if let Some(slot) = self.items.iter_mut().find(|i| i.sn == row.sn) {
                *slot = row;
            }
        }
    }

    /// Look up a row.
    pub fn item(&self, sn: u8) -> Result<&BillItem, CommerceError> {
        self.items
            .iter()
            .find(|i| i.sn == sn)
            .ok_or(CommerceError::BillRowNotFound(sn))
    }

    fn item_mut(&mut self, sn: u8) -> Result<&mut BillItem, CommerceError> {
        self.items
            .iter_mut()
            .find(|i| i.sn == sn)
            .ok_or(CommerceError::BillRowNotFound(sn))
    }

    pub fn set_description(&mut self, sn: u8, description: &str) -> Result<(), CommerceError> {
        self.item_mut(sn)?.description = description.to_string();
        Ok(())
    }

    pub fn set_qty(&mut self, sn: u8, qty: Option<f64>) -> Result<(), CommerceError> {
        if qty.is_some_and(|q| q < 0.0) {
            return Err(CommerceError::ValidationError(
                "qty must not be negative".to_string(),
            ));
        }
        self.item_mut(sn)?.set_qty(qty);
        self.recompute()
    }

    pub fn set_rate(&mut self, sn: u8, rate: Option<Money>) -> Result<(), CommerceError> {
        ensure_non_negative("rate", rate)?;
        self.item_mut(sn)?.set_rate(rate);
        self.recompute()
    }

    pub fn set_amount(&mut self, sn: u8, amount: Option<Money>) -> Result<(), CommerceError> {
        ensure_non_negative("amount", amount)?;
        self.item_mut(sn)?.set_amount(amount);
        self.recompute()
    }

    pub fn set_advance(&mut self, advance: Option<Money>) -> Result<(), CommerceError> {
        ensure_non_negative("advance", advance)?;
        self.advance = advance;
        self.recompute()
    }

    /// Re-derive total, balance and the amount in words from the rows.
    pub fn recompute(&mut self) -> Result<(), CommerceError> {
        let total = Money::try_sum(
            self.items.iter().filter_map(|i| i.amount.as_ref()),
            BILL_CURRENCY,
        )
        .ok_or(CommerceError::Overflow)?
        .clamp_non_negative();
        let advance = self.advance.unwrap_or_else(|| Money::zero(BILL_CURRENCY));
        let balance = total
            .try_subtract(&advance)
            .ok_or(CommerceError::Overflow)?
            .clamp_non_negative();

        self.total = total;
        self.balance = balance;
        self.amount_in_words = if total.is_positive() {
            money_to_words(&total)
        } else {
            String::new()
        };
        Ok(())
    }

    /// Rows with something entered.
    pub fn filled_items(&self) -> impl Iterator<Item = &BillItem> {
        self.items.iter().filter(|i| i.is_filled())
    }
}

fn ensure_non_negative(field: &str, value: Option<Money>) -> Result<(), CommerceError> {
    match value {
        Some(m) if m.is_negative() => Err(CommerceError::ValidationError(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}
