//! Product variant type.

use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Variants with fewer pieces than this are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A purchasable size/color combination of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductVariant {
    /// Variant identifier.
    pub id: VariantId,
    /// Owning product.
    pub product: ProductId,
    /// Hex color code (`#RRGGBB`).
    pub color_code: Option<String>,
    /// Human color name.
    pub color_name: Option<String>,
    /// Size label (e.g., "40R").
    pub size: Option<String>,
    /// List price.
    pub price: Money,
    /// Percentage discount, 0 to 100.
    pub discount: Option<u8>,
    /// Pieces in stock.
    pub stock: u32,
}

impl ProductVariant {
    /// Create a variant with no color, size or discount set.
    pub fn new(id: VariantId, product: ProductId, price: Money, stock: u32) -> Self {
        Self {
            id,
            product,
            color_code: None,
            color_name: None,
            size: None,
            price,
            discount: None,
            stock,
        }
    }

    /// Set the size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the color code and name.
    pub fn with_color(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.color_code = Some(code.into());
        self.color_name = Some(name.into());
        self
    }

    /// Set the percentage discount.
    pub fn with_discount(mut self, percent: u8) -> Self {
        self.discount = Some(percent);
        self
    }

    /// Normalize and validate the variant in place.
    ///
    /// Blank strings become `None`, the color code is normalized to
    /// `#RRGGBB` and the color name is trimmed.
    pub fn validate(&mut self) -> Result<(), CommerceError> {
        self.color_code = self
            .color_code
            .take()
            .filter(|c| !c.trim().is_empty())
            .map(|c| normalize_color_code(&c));
        self.size = self.size.take().filter(|s| !s.trim().is_empty());
        self.color_name = self
            .color_name
            .take()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        if self.color_code.is_none() && self.size.is_none() {
            return Err(CommerceError::ValidationError(
                "Provide a color_code or a size for the variant.".to_string(),
            ));
        }

        if let Some(code) = &self.color_code {
            if !is_hex_color(code) {
                return Err(CommerceError::ValidationError(
                    "Invalid color code. Use #RRGGBB.".to_string(),
                ));
            }
        }

        if self.price.is_negative() {
            return Err(CommerceError::ValidationError(
                "Price cannot be negative.".to_string(),
            ));
        }

        if let Some(discount) = self.discount {
            if discount > 100 {
                return Err(CommerceError::ValidationError(format!(
                    "Discount must be between 0 and 100, got {discount}"
                )));
            }
        }

        Ok(())
    }

    /// Price after the percentage discount.
    pub fn effective_price(&self) -> Money {
        match self.discount {
            Some(percent) if percent > 0 => {
                let off = self.price.percentage(f64::from(percent));
                self.price.try_subtract(&off).unwrap_or(self.price)
            }
            _ => self.price,
        }
    }

    /// Check if this variant can cover `pcs` pieces.
    pub fn can_fulfill(&self, pcs: i64) -> bool {
        pcs > 0 && pcs <= i64::from(self.stock)
    }

    /// Check if stock is running low.
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Build a display title like "Navy / 40R".
    pub fn title(&self) -> String {
        match (&self.color_name, &self.size) {
            (Some(color), Some(size)) => format!("{color} / {size}"),
            (Some(color), None) => color.clone(),
            (None, Some(size)) => size.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Normalize a color code: trim, uppercase and ensure a leading `#`.
pub fn normalize_color_code(value: &str) -> String {
    let value = value.trim().to_uppercase();
    if value.starts_with('#') {
        value
    } else {
        format!("#{value}")
    }
}

fn is_hex_color(code: &str) -> bool {
    code.len() == 7
        && code.starts_with('#')
        && code[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}
