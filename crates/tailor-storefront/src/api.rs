//! REST bindings for the storefront backend.

use crate::StorefrontError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tailor_commerce::bill::BillData;
use tailor_commerce::booking::{Booking, BookingStatus, MeasurementUpdate, NewBooking};
use tailor_commerce::cart::{CartLine, CartLines};
use tailor_commerce::catalog::ProductVariant;
use tailor_commerce::checkout::{NewOrder, Order, OrderGroup};
use tailor_commerce::money::{self, Money};
use tailor_commerce::{BookingId, ProductId, VariantId};
use tailor_data::{FetchClient, Response, Transport};

/// Typed calls against the backend. Every call but booking creation needs a
/// bearer token.
pub struct StorefrontApi<T> {
    client: FetchClient<T>,
}

#[derive(Serialize)]
struct CartPost {
    items: [CartPostItem; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartPostItem {
    id: ProductId,
    variant_id: VariantId,
    pcs: i64,
}

#[derive(Serialize)]
struct StatusPatch {
    status: BookingStatus,
}

#[derive(Serialize)]
struct BillPatch<'a> {
    bill_data: &'a BillData,
}

#[derive(Deserialize)]
struct BillNumber {
    bill_number: String,
}

/// Variant as the product endpoints return it, with decimal prices.
#[derive(Deserialize)]
struct VariantRow {
    id: VariantId,
    product: ProductId,
    #[serde(default)]
    color_code: Option<String>,
    #[serde(default)]
    color_name: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(with = "money::decimal")]
    price: Money,
    #[serde(default)]
    discount: Option<f64>,
    #[serde(default)]
    stock: u32,
}

impl From<VariantRow> for ProductVariant {
    fn from(row: VariantRow) -> Self {
        let mut variant = ProductVariant::new(row.id, row.product, row.price, row.stock);
        variant.color_code = row.color_code;
        variant.color_name = row.color_name;
        variant.size = row.size;
        variant.discount = row.discount.map(|d| d.round().clamp(0.0, 100.0) as u8);
        variant
    }
}

/// Order listings come paginated; older routes answer with a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum OrderPage {
    Paged { results: Vec<Order> },
    Bare(Vec<Order>),
}

fn decode<R: DeserializeOwned>(response: Response) -> Result<R, StorefrontError> {
    Ok(response.error_for_status()?.json()?)
}

fn accept(response: Response) -> Result<(), StorefrontError> {
    response.error_for_status()?;
    Ok(())
}

/// Percent-encode a query value, keeping RFC 3986 unreserved bytes.
fn encode_query_value(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                char::from(b).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// `api/sales/sales/`, or the status route for a group, plus the search.
fn orders_path(group: Option<OrderGroup>, search: Option<&str>) -> String {
    let mut path = match group {
        Some(group) => format!("api/sales/sales/status/{}/", group.as_str()),
        None => "api/sales/sales/".to_string(),
    };
    if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
        path.push_str("?search=");
        path.push_str(&encode_query_value(search));
    }
    path
}

impl<T: Transport> StorefrontApi<T> {
    pub fn new(client: FetchClient<T>) -> Self {
        Self { client }
    }

    /// Client over `transport` rooted at `base_url`.
    pub fn with_base_url(transport: T, base_url: impl Into<String>) -> Self {
        Self::new(FetchClient::new(transport).with_base_url(base_url))
    }

    pub fn client(&self) -> &FetchClient<T> {
        &self.client
    }

    // Cart

    /// The signed-in user's cart.
    pub async fn cart(&self, token: &str) -> Result<CartLines, StorefrontError> {
        let response = self
            .client
            .get("api/products/cart/")
            .bearer_auth(token)
            .send()
            .await?;
        decode(response)
    }

    /// Add a new line with one piece.
    pub async fn add_to_cart(
        &self,
        token: &str,
        product: ProductId,
        variant: VariantId,
    ) -> Result<(), StorefrontError> {
        let body = CartPost {
            items: [CartPostItem {
                id: product,
                variant_id: variant,
                pcs: 1,
            }],
        };
        let response = self
            .client
            .post("api/products/cart/")
            .bearer_auth(token)
            .json(&body)?
            .send()
            .await?;
        accept(response)
    }

    /// Set an existing line's piece count.
    pub async fn update_cart_line(&self, token: &str, line: &CartLine) -> Result<(), StorefrontError> {
        let body = CartLine::new(line.product, line.variant, line.pcs);
        let response = self
            .client
            .patch(format!("api/products/cart/{}/", line.product))
            .bearer_auth(token)
            .json(&body)?
            .send()
            .await?;
        accept(response)
    }

    pub async fn remove_from_cart(
        &self,
        token: &str,
        product: ProductId,
        variant: VariantId,
    ) -> Result<(), StorefrontError> {
        let response = self
            .client
            .delete(format!("api/products/cart/{}/variant/{}/", product, variant))
            .bearer_auth(token)
            .send()
            .await?;
        accept(response)
    }

    pub async fn clear_cart(&self, token: &str) -> Result<(), StorefrontError> {
        let response = self
            .client
            .delete("api/products/clearcart/")
            .bearer_auth(token)
            .send()
            .await?;
        accept(response)
    }

    // Bookings

    /// Book an appointment. Anyone may book; a token is sent when present.
    pub async fn create_booking(
        &self,
        token: Option<&str>,
        booking: &NewBooking,
    ) -> Result<Booking, StorefrontError> {
        let mut request = self.client.post("api/booking/bookings/").json(booking)?;
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        decode(request.send().await?)
    }

    pub async fn update_booking_status(
        &self,
        token: &str,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, StorefrontError> {
        let response = self
            .client
            .patch(format!("api/booking/bookings/{}/update_status/", id))
            .bearer_auth(token)
            .json(&StatusPatch { status })?
            .send()
            .await?;
        decode(response)
    }

    pub async fn update_measurements(
        &self,
        token: &str,
        id: BookingId,
        update: &MeasurementUpdate,
    ) -> Result<Booking, StorefrontError> {
        update.validate()?;
        let response = self
            .client
            .patch(format!("api/booking/bookings/{}/update_measurements/", id))
            .bearer_auth(token)
            .json(update)?
            .send()
            .await?;
        decode(response)
    }

    /// Store the bill on the booking record.
    pub async fn save_bill(
        &self,
        token: &str,
        id: BookingId,
        bill: &BillData,
    ) -> Result<Booking, StorefrontError> {
        let response = self
            .client
            .patch(format!("api/booking/bookings/{}/", id))
            .bearer_auth(token)
            .json(&BillPatch { bill_data: bill })?
            .send()
            .await?;
        decode(response)
    }

    pub async fn send_bill_email(&self, token: &str, id: BookingId) -> Result<(), StorefrontError> {
        let response = self
            .client
            .post(format!("api/booking/bookings/{}/send_bill_email/", id))
            .bearer_auth(token)
            .send()
            .await?;
        accept(response)
    }

    /// Ask the backend for an unused `YYYYMMDD-XXXX` bill number.
    pub async fn generate_bill_number(&self, token: &str) -> Result<String, StorefrontError> {
        let response = self
            .client
            .get("api/booking/generate-bill/")
            .bearer_auth(token)
            .send()
            .await?;
        let BillNumber { bill_number } = decode(response)?;
        Ok(bill_number)
    }

    // Catalog

    /// One product variant with its current stock.
    pub async fn variant(&self, id: VariantId) -> Result<ProductVariant, StorefrontError> {
        let response = self
            .client
            .get(format!("api/products/product-variants/{}/", id))
            .send()
            .await?;
        let row: VariantRow = decode(response)?;
        Ok(row.into())
    }

    // Sales

    /// Place a cash-on-delivery order. The backend takes the pieces out of
    /// stock and fails the whole order if any variant runs short.
    pub async fn place_order(&self, token: &str, order: &NewOrder) -> Result<(), StorefrontError> {
        let response = self
            .client
            .post("api/sales/sales/")
            .bearer_auth(token)
            .json(order)?
            .send()
            .await?;
        accept(response)
    }

    /// The user's orders, newest first. `None` lists every status.
    pub async fn orders(
        &self,
        token: &str,
        group: Option<OrderGroup>,
        search: Option<&str>,
    ) -> Result<Vec<Order>, StorefrontError> {
        let response = self
            .client
            .get(orders_path(group, search))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(match decode(response)? {
            OrderPage::Paged { results } => results,
            OrderPage::Bare(orders) => orders,
        })
    }

    /// One order by its transaction uid.
    pub async fn order(&self, token: &str, transactionuid: &str) -> Result<Order, StorefrontError> {
        let response = self
            .client
            .get(format!(
                "api/sales/sales/transaction/{}/",
                encode_query_value(transactionuid.trim())
            ))
            .bearer_auth(token)
            .send()
            .await?;
        decode(response)
    }
}
