//! Cart pricing against catalog variants.

use crate::cart::CartLines;
use crate::catalog::ProductVariant;
use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotedLine {
    /// Product ID.
    pub product: ProductId,
    /// Variant ID.
    pub variant: VariantId,
    /// Pieces.
    pub pcs: i64,
    /// Price per piece after discount.
    pub unit_price: Money,
    /// `unit_price * pcs`.
    pub total: Money,
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartQuote {
    /// Per-line pricing, in cart order.
    pub lines: Vec<QuotedLine>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Total pieces.
    pub total_pieces: i64,
}

impl CartQuote {
    /// Price every line against `variants`.
    ///
    /// Fails if a variant is unknown, belongs to another product, lacks the
    /// stock for the requested pieces, or if the sum overflows.
    pub fn price(
        lines: &CartLines,
        variants: &[ProductVariant],
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let mut quoted = Vec::with_capacity(lines.len());

        for line in lines.iter() {
            let variant = variants
                .iter()
                .find(|v| v.id == line.variant && v.product == line.product)
                .ok_or_else(|| CommerceError::VariantNotFound(line.variant.to_string()))?;

            if !variant.can_fulfill(line.pcs) {
                return Err(CommerceError::InsufficientStock {
                    variant_id: variant.id.to_string(),
                    requested: line.pcs,
                    available: i64::from(variant.stock),
                });
            }

            let unit_price = variant.effective_price();
            if unit_price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: unit_price.currency.code().to_string(),
                });
            }
            let total = unit_price
                .try_multiply(line.pcs)
                .ok_or(CommerceError::Overflow)?;

            quoted.push(QuotedLine {
                product: line.product,
                variant: line.variant,
                pcs: line.pcs,
                unit_price,
                total,
            });
        }

        let subtotal =
            Money::try_sum(quoted.iter().map(|l| &l.total), currency).ok_or(CommerceError::Overflow)?;

        Ok(Self {
            lines: quoted,
            subtotal,
            total_pieces: lines.total_pieces(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<ProductVariant> {
        vec![
            ProductVariant::new(
                VariantId::new(11),
                ProductId::new(1),
                Money::from_parts(1000, 0, Currency::NPR),
                10,
            )
            .with_size("M"),
            ProductVariant::new(
                VariantId::new(21),
                ProductId::new(2),
                Money::from_parts(2000, 0, Currency::NPR),
                1,
            )
            .with_size("L")
            .with_discount(10),
        ]
    }

    #[test]
    fn test_quote_subtotal() {
        let mut lines = CartLines::new();
        lines.increment(ProductId::new(1), VariantId::new(11));
        lines.increment(ProductId::new(1), VariantId::new(11));
        lines.increment(ProductId::new(2), VariantId::new(21));

        let quote = CartQuote::price(&lines, &catalog(), Currency::NPR).unwrap();
        assert_eq!(quote.total_pieces, 3);
        // 2 * 1000 + 1 * 1800
        assert_eq!(quote.subtotal, Money::from_parts(3800, 0, Currency::NPR));
        assert_eq!(quote.lines[1].unit_price, Money::from_parts(1800, 0, Currency::NPR));
    }

    #[test]
    fn test_quote_rejects_over_stock() {
        let mut lines = CartLines::new();
        lines.set_pcs(ProductId::new(2), VariantId::new(21), 2);
        let err = CartQuote::price(&lines, &catalog(), Currency::NPR).unwrap_err();
        assert!(matches!(err, CommerceError::InsufficientStock { available: 1, .. }));
    }

    #[test]
    fn test_quote_rejects_unknown_variant() {
        let mut lines = CartLines::new();
        lines.increment(ProductId::new(1), VariantId::new(99));
        let err = CartQuote::price(&lines, &catalog(), Currency::NPR).unwrap_err();
        assert_eq!(err, CommerceError::VariantNotFound("99".to_string()));
    }

    #[test]
    fn test_quote_empty_cart() {
        let quote = CartQuote::price(&CartLines::new(), &catalog(), Currency::NPR).unwrap();
        assert!(quote.subtotal.is_zero());
        assert!(quote.lines.is_empty());
    }
}
