//! Stored JSON shape of a bill.
//!
//! Bills are kept as a blob on the booking record with one string per form
//! field: `"1500"` rupees, `"50"` paisa, `""` for nothing entered. Reading is
//! lenient: numbers are accepted in place of strings and anything that does
//! not parse is treated as empty.

use crate::bill::item::BillItem;
use crate::bill::{BillData, BILL_CURRENCY};
use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored shape of one bill row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillItemWire {
    #[serde(default)]
    pub sn: u8,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub qty: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rate: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount_rs: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount_ps: String,
}

/// Stored shape of a whole bill.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillDataWire {
    #[serde(default)]
    pub items: Vec<BillItemWire>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_rs: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_ps: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub advance_rs: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub advance_ps: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub balance_rs: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub balance_ps: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount_in_words: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_ordered: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_delivery: String,
}

impl From<BillItemWire> for BillItem {
    fn from(wire: BillItemWire) -> Self {
        Self {
            sn: wire.sn,
            description: wire.description,
            qty: parse_qty(&wire.qty),
            rate: Money::parse(&wire.rate, BILL_CURRENCY).filter(|r| !r.is_negative()),
            amount: parse_parts(&wire.amount_rs, &wire.amount_ps),
        }
    }
}

impl From<BillItem> for BillItemWire {
    fn from(item: BillItem) -> Self {
        let (amount_rs, amount_ps) = split_parts(item.amount);
        Self {
            sn: item.sn,
            description: item.description,
            qty: item.qty.map(|q| q.to_string()).unwrap_or_default(),
            rate: item.rate.map(format_rate).unwrap_or_default(),
            amount_rs,
            amount_ps,
        }
    }
}

impl From<BillDataWire> for BillData {
    fn from(wire: BillDataWire) -> Self {
        let mut bill = BillData::new();
        bill.merge_saved(wire.items.into_iter().map(BillItem::from));
        bill.total = parse_parts(&wire.total_rs, &wire.total_ps)
            .unwrap_or_else(|| Money::zero(BILL_CURRENCY));
        bill.advance = parse_parts(&wire.advance_rs, &wire.advance_ps);
        bill.balance = parse_parts(&wire.balance_rs, &wire.balance_ps)
            .unwrap_or_else(|| Money::zero(BILL_CURRENCY));
        bill.amount_in_words = wire.amount_in_words;
        bill.date_ordered = parse_date(&wire.date_ordered);
        bill.date_delivery = parse_date(&wire.date_delivery);
        bill
    }
}

impl From<BillData> for BillDataWire {
    fn from(bill: BillData) -> Self {
        let (total_rs, total_ps) = if bill.total.is_zero() {
            (String::new(), String::new())
        } else {
            split_parts(Some(bill.total))
        };
        let (advance_rs, advance_ps) = split_parts(bill.advance.filter(|a| !a.is_zero()));
        Self {
            items: bill.items.into_iter().map(BillItemWire::from).collect(),
            total_rs,
            total_ps,
            advance_rs,
            advance_ps,
            balance_rs: bill.balance.rupees().to_string(),
            balance_ps: bill.balance.paisa().to_string(),
            amount_in_words: bill.amount_in_words,
            date_ordered: format_date(bill.date_ordered),
            date_delivery: format_date(bill.date_delivery),
        }
    }
}

/// Read a rupee column and a paisa column. Paisa of 100 or more carry over.
///
/// Bill figures are never negative; a signed column reads as empty.
pub fn parse_parts(rupees: &str, paisa: &str) -> Option<Money> {
    if rupees.trim().starts_with('-') || paisa.trim().starts_with('-') {
        return None;
    }
    let rs = Money::parse(rupees, BILL_CURRENCY);
    let ps = paisa.trim().parse::<i64>().ok();
    if rs.is_none() && ps.is_none() {
        return None;
    }
    let base = rs.unwrap_or_else(|| Money::zero(BILL_CURRENCY));
    Some(Money::new(
        base.amount_paisa.saturating_add(ps.unwrap_or(0)),
        BILL_CURRENCY,
    ))
}

/// Split into the rupee and paisa columns; paisa is left blank when zero.
pub fn split_parts(amount: Option<Money>) -> (String, String) {
    match amount {
        Some(m) => {
            let ps = if m.paisa() > 0 {
                m.paisa().to_string()
            } else {
                String::new()
            };
            (m.rupees().to_string(), ps)
        }
        None => (String::new(), String::new()),
    }
}

fn parse_qty(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|q| q.is_finite())
}

fn format_rate(rate: Money) -> String {
    if rate.paisa() == 0 {
        rate.rupees().to_string()
    } else {
        rate.display_amount()
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// `#[serde(with)]` helper for the optional bill on a booking.
///
/// The record stores `{}` when no bill has been saved.
pub mod stored {
    use crate::bill::BillData;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bill: &Option<BillData>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bill {
            Some(bill) => bill.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BillData>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let empty = match &value {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if empty {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
