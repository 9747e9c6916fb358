//! Printable order slip and the messages used to share it.

use crate::bill::item::BillItem;
use crate::bill::BillData;
use crate::booking::Booking;
use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Country code added to local phone numbers for WhatsApp links.
pub const COUNTRY_CODE: &str = "977";

const SLIP_DATE_FORMAT: &str = "%b %d, %Y";

/// Shop details printed in the slip header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopInfo {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

impl Default for ShopInfo {
    fn default() -> Self {
        Self {
            name: "Alphasuits".to_string(),
            address: String::new(),
            phone: String::new(),
        }
    }
}

/// A booking's bill, ready to print or share.
#[derive(Debug, Clone, Copy)]
pub struct OrderSlip<'a> {
    pub booking: &'a Booking,
    pub bill: &'a BillData,
    pub shop: &'a ShopInfo,
}

impl<'a> OrderSlip<'a> {
    pub fn new(booking: &'a Booking, bill: &'a BillData, shop: &'a ShopInfo) -> Self {
        Self {
            booking,
            bill,
            shop,
        }
    }

    /// Document title, e.g. `Order Slip - Bill #20260314-AB12`.
    pub fn title(&self) -> String {
        format!(
            "Order Slip - Bill #{}",
            self.booking.bill_number.as_deref().unwrap_or("")
        )
    }

    /// Image file name used when the slip is downloaded or shared.
    pub fn share_file_name(&self) -> String {
        format!("OrderSlip_{}.png", self.booking.slip_reference())
    }

    /// Caption attached to a shared slip.
    pub fn share_text(&self) -> String {
        let number = self
            .booking
            .bill_number
            .as_deref()
            .map(|n| format!(" #{n}"))
            .unwrap_or_default();
        format!(
            "{} Order Slip{} for {}",
            self.shop.name, number, self.booking.name
        )
    }

    /// Plain-text WhatsApp summary of the slip.
    pub fn whatsapp_message(&self) -> String {
        let mut message = format!("*{} - ORDER SLIP*", self.shop.name.to_uppercase());
        if let Some(number) = &self.booking.bill_number {
            message.push_str(&format!("\nBill No: {number}"));
        }
        message.push_str(&format!(
            "\nName: {}\nTotal: Rs.{}\nBalance: Rs.{}\n\n_Please find the bill image downloaded on your device._",
            self.booking.name,
            self.bill.total.rupees(),
            self.bill.balance.rupees(),
        ));
        message
    }

    /// `wa.me` link that opens a chat with the customer, message prefilled.
    pub fn whatsapp_link(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            whatsapp_phone(&self.booking.phone_number),
            encode_uri_component(&self.whatsapp_message())
        )
    }

    /// Standalone HTML document for printing.
    pub fn render_html(&self) -> String {
        let rows: String = self.bill.items.iter().map(render_row).collect();
        let words = if self.bill.amount_in_words.is_empty() {
            String::new()
        } else {
            format!(
                r#"<p class="words">{}</p>"#,
                html_escape(&self.bill.amount_in_words)
            )
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
<div class="order-slip">
    <header>
        <h1>{shop}</h1>
        <p class="shop-contact">{address} {phone}</p>
        <p class="bill-no">Bill No: {bill_no}</p>
    </header>
    <section class="customer">
        <p>Name: {name}</p>
        <p>Phone: {customer_phone}</p>
        <p>Address: {location}</p>
    </section>
    <table class="items">
        <thead>
            <tr><th>S.N.</th><th>Description</th><th>Qty</th><th>Rate</th><th>Rs.</th><th>Ps.</th></tr>
        </thead>
        <tbody>
{rows}        </tbody>
        <tfoot>
{total}{advance}{balance}        </tfoot>
    </table>
    {words}
    <footer>
        <p>Date Ordered: {ordered}</p>
        <p>Date of Delivery: {delivery}</p>
    </footer>
</div>
</body>
</html>"#,
            title = html_escape(&self.title()),
            shop = html_escape(&self.shop.name),
            address = html_escape(&self.shop.address),
            phone = html_escape(&self.shop.phone),
            bill_no = html_escape(self.booking.bill_number.as_deref().unwrap_or("")),
            name = html_escape(&self.booking.name),
            customer_phone = html_escape(&self.booking.phone_number),
            location = html_escape(&self.booking.location),
            rows = rows,
            total = render_total("Total", Some(self.bill.total)),
            advance = render_total("Advance", self.bill.advance),
            balance = render_total("Balance", Some(self.bill.balance)),
            words = words,
            ordered = format_slip_date(self.bill.date_ordered),
            delivery = format_slip_date(self.bill.date_delivery),
        )
    }
}

fn render_row(item: &BillItem) -> String {
    let (rs, ps) = money_columns(item.amount);
    format!(
        "            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        item.sn,
        html_escape(&item.description),
        item.qty.map(|q| q.to_string()).unwrap_or_default(),
        item.rate.map(|r| r.display_amount()).unwrap_or_default(),
        rs,
        ps,
    )
}

fn render_total(label: &str, amount: Option<Money>) -> String {
    let (rs, ps) = money_columns(amount.filter(|m| !m.is_zero()));
    format!(
        "            <tr><td colspan=\"4\">{label}</td><td>{rs}</td><td>{ps}</td></tr>\n"
    )
}

fn money_columns(amount: Option<Money>) -> (String, String) {
    match amount {
        Some(m) => (m.rupees().to_string(), format!("{:02}", m.paisa())),
        None => (String::new(), String::new()),
    }
}

fn format_slip_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(SLIP_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Digits of a phone number with the country code in front.
pub fn whatsapp_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.starts_with(COUNTRY_CODE) {
        digits
    } else {
        format!("{COUNTRY_CODE}{digits}")
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
fn encode_uri_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '('
            | ')' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}
