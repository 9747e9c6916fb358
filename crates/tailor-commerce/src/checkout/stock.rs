//! Stock reservation when an order is placed.

use crate::catalog::ProductVariant;
use crate::checkout::{OrderItem, OrderLine};
use crate::error::CommerceError;
use crate::ids::VariantId;
use std::collections::BTreeMap;

/// Take the ordered pieces out of `variants` and return the sold lines.
///
/// Every line is checked before any stock moves, so a failed order leaves
/// `variants` untouched. Pieces for the same variant on several lines are
/// checked against its stock together. Sold lines carry the list price.
pub fn reserve_stock(
    items: &[OrderItem],
    variants: &mut [ProductVariant],
) -> Result<Vec<OrderLine>, CommerceError> {
    let mut wanted: BTreeMap<VariantId, i64> = BTreeMap::new();
    for item in items {
        if item.pcs <= 0 {
            return Err(CommerceError::InvalidQuantity(item.pcs));
        }
        let variant = variants
            .iter()
            .find(|v| v.id == item.variant && v.product == item.product)
            .ok_or_else(|| CommerceError::VariantNotFound(item.variant.to_string()))?;

        let total = wanted.entry(variant.id).or_insert(0);
        *total = total.checked_add(item.pcs).ok_or(CommerceError::Overflow)?;
        if *total > i64::from(variant.stock) {
            return Err(CommerceError::InsufficientStock {
                variant_id: variant.id.to_string(),
                requested: *total,
                available: i64::from(variant.stock),
            });
        }
    }

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let Some(variant) = variants.iter_mut().find(|v| v.id == item.variant) else {
            continue;
        };
        // Bounded by the stock check above.
        variant.stock -= item.pcs as u32;
        let total = variant
            .price
            .try_multiply(item.pcs)
            .ok_or(CommerceError::Overflow)?;
        lines.push(OrderLine {
            product: item.product,
            variant: item.variant,
            pcs: item.pcs,
            price: variant.price,
            total,
        });
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};

    fn catalog() -> Vec<ProductVariant> {
        vec![
            ProductVariant::new(
                VariantId::new(11),
                ProductId::new(1),
                Money::from_parts(8000, 0, Currency::NPR),
                3,
            )
            .with_discount(10),
            ProductVariant::new(
                VariantId::new(21),
                ProductId::new(2),
                Money::from_parts(1500, 0, Currency::NPR),
                1,
            ),
        ]
    }

    fn item(product: u64, variant: u64, pcs: i64) -> OrderItem {
        OrderItem {
            product: ProductId::new(product),
            variant: VariantId::new(variant),
            pcs,
        }
    }

    #[test]
    fn test_reserve_decrements_stock() {
        let mut variants = catalog();
        let lines = reserve_stock(&[item(1, 11, 2), item(2, 21, 1)], &mut variants).unwrap();

        assert_eq!(variants[0].stock, 1);
        assert_eq!(variants[1].stock, 0);
        // List price, not the discounted one.
        assert_eq!(lines[0].price, Money::from_parts(8000, 0, Currency::NPR));
        assert_eq!(lines[0].total, Money::from_parts(16000, 0, Currency::NPR));
    }

    #[test]
    fn test_failed_reserve_moves_nothing() {
        let mut variants = catalog();
        let err = reserve_stock(&[item(1, 11, 1), item(2, 21, 2)], &mut variants).unwrap_err();

        assert_eq!(
            err,
            CommerceError::InsufficientStock {
                variant_id: "21".to_string(),
                requested: 2,
                available: 1,
            }
        );
        assert_eq!(variants, catalog());
    }

    #[test]
    fn test_repeated_variant_counts_together() {
        let mut variants = catalog();
        let err = reserve_stock(&[item(1, 11, 2), item(1, 11, 2)], &mut variants).unwrap_err();
        assert!(matches!(err, CommerceError::InsufficientStock { requested: 4, .. }));
        assert_eq!(variants[0].stock, 3);
    }

    #[test]
    fn test_reserve_rejects_unknown_and_empty_lines() {
        let mut variants = catalog();
        assert_eq!(
            reserve_stock(&[item(2, 11, 1)], &mut variants).unwrap_err(),
            CommerceError::VariantNotFound("11".to_string())
        );
        assert_eq!(
            reserve_stock(&[item(1, 11, 0)], &mut variants).unwrap_err(),
            CommerceError::InvalidQuantity(0)
        );
    }
}
