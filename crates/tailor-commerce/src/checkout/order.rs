//! Order types.

use crate::cart::CartQuote;
use crate::checkout::{OrderGroup, OrderStatus};
use crate::error::CommerceError;
use crate::ids::{AddressId, OrderId, ProductId, VariantId};
use crate::money::{self, Currency, Money};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The only payment method the shop takes.
pub const CASH_ON_DELIVERY: &str = "Cash On Delivery";

/// One product line of an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductId,
    pub variant: VariantId,
    pub pcs: i64,
}

/// Body of `POST api/sales/sales/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub products: Vec<OrderItem>,
    #[serde(with = "money::decimal")]
    pub sub_total: Money,
    #[serde(with = "money::decimal")]
    pub discount: Money,
    /// Amount due: `sub_total - discount`.
    #[serde(with = "money::decimal")]
    pub total_amt: Money,
    /// Client-chosen UUID the order is looked up by.
    pub transactionuid: String,
    /// Delivery address id.
    pub shipping: AddressId,
    pub payment_method: String,
}

impl NewOrder {
    /// Build the order request for a priced cart.
    ///
    /// The discount must not be negative and must stay below the subtotal.
    pub fn from_quote(
        quote: &CartQuote,
        shipping: AddressId,
        discount: Option<Money>,
        rng: &mut impl Rng,
    ) -> Result<Self, CommerceError> {
        if quote.lines.is_empty() {
            return Err(CommerceError::ValidationError("Cart is empty.".to_string()));
        }

        let currency = quote.subtotal.currency;
        let discount = discount.unwrap_or_else(|| Money::zero(currency));
        if discount.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: discount.currency.code().to_string(),
            });
        }
        if discount.is_negative() {
            return Err(CommerceError::ValidationError(
                "discount must not be negative".to_string(),
            ));
        }
        if discount.is_positive() && discount.amount_paisa >= quote.subtotal.amount_paisa {
            return Err(CommerceError::ValidationError(
                "discount must be less than the subtotal".to_string(),
            ));
        }
        let total_amt = quote
            .subtotal
            .try_subtract(&discount)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            products: quote
                .lines
                .iter()
                .map(|l| OrderItem {
                    product: l.product,
                    variant: l.variant,
                    pcs: l.pcs,
                })
                .collect(),
            sub_total: quote.subtotal,
            discount,
            total_amt,
            transactionuid: transaction_uid(rng),
            shipping,
            payment_method: CASH_ON_DELIVERY.to_string(),
        })
    }

    /// Total pieces across all lines.
    pub fn total_pieces(&self) -> i64 {
        self.products.iter().map(|i| i.pcs).sum()
    }
}

/// A random version 4 UUID in its hyphenated lowercase form.
pub fn transaction_uid(rng: &mut impl Rng) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

/// A sold line: list price at sale time and the line total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: ProductId,
    pub variant: VariantId,
    #[serde(alias = "qty")]
    pub pcs: i64,
    #[serde(with = "money::decimal")]
    pub price: Money,
    #[serde(with = "money::decimal")]
    pub total: Money,
}

/// A placed order as the sales endpoints return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub transactionuid: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(with = "money::decimal")]
    pub sub_total: Money,
    #[serde(default, with = "money::decimal::option")]
    pub discount: Option<Money>,
    #[serde(with = "money::decimal")]
    pub total_amt: Money,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub products: Vec<OrderLine>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Order {
    /// Whether the order shows under `group`; `None` is the "all" tab.
    pub fn in_group(&self, group: Option<OrderGroup>) -> bool {
        group.map_or(true, |g| g.contains(self.status))
    }

    /// Sum of the sold lines.
    pub fn lines_total(&self) -> Option<Money> {
        Money::try_sum(self.products.iter().map(|l| &l.total), Currency::NPR)
    }
}

/// Orders under `group`, keeping their order.
pub fn orders_in_group(orders: &[Order], group: Option<OrderGroup>) -> Vec<&Order> {
    orders.iter().filter(|o| o.in_group(group)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLines;
    use crate::catalog::ProductVariant;
    use rand::rngs::mock::StepRng;

    fn rupees(r: i64) -> Money {
        Money::from_parts(r, 0, Currency::NPR)
    }

    fn quote() -> CartQuote {
        let variants = vec![
            ProductVariant::new(VariantId::new(11), ProductId::new(1), rupees(8000), 4),
            ProductVariant::new(VariantId::new(21), ProductId::new(2), rupees(1500), 9),
        ];
        let mut lines = CartLines::new();
        lines.set_pcs(ProductId::new(1), VariantId::new(11), 2);
        lines.set_pcs(ProductId::new(2), VariantId::new(21), 1);
        CartQuote::price(&lines, &variants, Currency::NPR).unwrap()
    }

    fn order(id: u64, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            transactionuid: format!("uid-{id}"),
            status,
            sub_total: rupees(100),
            discount: None,
            total_amt: rupees(100),
            payment_method: Some(CASH_ON_DELIVERY.to_string()),
            products: Vec::new(),
            created: None,
        }
    }

    #[test]
    fn test_order_from_quote() {
        let mut rng = StepRng::new(7, 13);
        let order =
            NewOrder::from_quote(&quote(), AddressId::new(3), Some(rupees(500)), &mut rng).unwrap();

        assert_eq!(order.sub_total, rupees(17500));
        assert_eq!(order.total_amt, rupees(17000));
        assert_eq!(order.total_pieces(), 3);
        assert_eq!(order.payment_method, "Cash On Delivery");
        assert_eq!(
            order.products[0],
            OrderItem {
                product: ProductId::new(1),
                variant: VariantId::new(11),
                pcs: 2
            }
        );
    }

    #[test]
    fn test_order_wire_shape() {
        let mut rng = StepRng::new(0, 1);
        let order = NewOrder::from_quote(&quote(), AddressId::new(3), None, &mut rng).unwrap();
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["sub_total"], 17500.0);
        assert_eq!(json["discount"], 0.0);
        assert_eq!(json["total_amt"], 17500.0);
        assert_eq!(json["shipping"], 3);
        assert_eq!(json["products"][1]["variant"], 21);
    }

    #[test]
    fn test_order_rejects_bad_discount() {
        let mut rng = StepRng::new(0, 1);
        let negative = NewOrder::from_quote(&quote(), AddressId::new(3), Some(rupees(-1)), &mut rng);
        assert!(matches!(negative, Err(CommerceError::ValidationError(_))));

        let whole = NewOrder::from_quote(&quote(), AddressId::new(3), Some(rupees(17500)), &mut rng);
        assert!(matches!(whole, Err(CommerceError::ValidationError(_))));
    }

    #[test]
    fn test_order_rejects_empty_cart() {
        let empty = CartQuote::price(&CartLines::new(), &[], Currency::NPR).unwrap();
        let err = NewOrder::from_quote(&empty, AddressId::new(3), None, &mut StepRng::new(0, 1))
            .unwrap_err();
        assert_eq!(err, CommerceError::ValidationError("Cart is empty.".to_string()));
    }

    #[test]
    fn test_transaction_uid_is_v4() {
        let uid = transaction_uid(&mut StepRng::new(u64::MAX, 0));
        assert_eq!(uid, "ffffffff-ffff-4fff-bfff-ffffffffffff");

        let uid = transaction_uid(&mut rand::thread_rng());
        let groups: Vec<_> = uid.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
        assert_eq!(&uid[14..15], "4");
    }

    #[test]
    fn test_orders_in_group() {
        let orders = vec![
            order(1, OrderStatus::Pending),
            order(2, OrderStatus::Packed),
            order(3, OrderStatus::Verified),
            order(4, OrderStatus::Unpaid),
        ];

        let shipping: Vec<_> = orders_in_group(&orders, Some(OrderGroup::OnShipping))
            .iter()
            .map(|o| o.id.get())
            .collect();
        assert_eq!(shipping, vec![1, 3]);
        assert_eq!(orders_in_group(&orders, None).len(), 4);
        assert!(orders_in_group(&orders, Some(OrderGroup::Delivered)).is_empty());
    }

    #[test]
    fn test_order_reads_backend_decimals() {
        let json = r#"{
            "id": 9,
            "transactionuid": "abc",
            "status": "packed",
            "sub_total": "17500.00",
            "discount": null,
            "total_amt": "17500.00",
            "products": [
                {"product": 1, "variant": 11, "qty": 2, "price": "8000.00", "total": "16000.00"},
                {"product": 2, "variant": 21, "qty": 1, "price": "1500.00", "total": "1500.00"}
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status.group(), OrderGroup::Arrived);
        assert_eq!(order.discount, None);
        assert_eq!(order.products[0].pcs, 2);
        assert_eq!(order.lines_total(), Some(order.sub_total));
    }
}
