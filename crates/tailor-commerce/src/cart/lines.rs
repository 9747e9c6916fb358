//! Cart lines and piece-count mutations.

use crate::ids::{ProductId, UserId, VariantId};
use serde::{Deserialize, Serialize};

/// One product variant in the cart.
///
/// This is also the wire shape of both the locally stored cart and the
/// server's cart listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Owning user, present on server-side lines only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserId>,
    /// Product ID.
    pub product: ProductId,
    /// Variant ID.
    pub variant: VariantId,
    /// Number of pieces.
    #[serde(default)]
    pub pcs: i64,
}

impl CartLine {
    /// Create a line with the given piece count.
    pub fn new(product: ProductId, variant: VariantId, pcs: i64) -> Self {
        Self {
            user: None,
            product,
            variant,
            pcs,
        }
    }

    /// Check if this line refers to the given product variant.
    pub fn matches(&self, product: ProductId, variant: VariantId) -> bool {
        self.product == product && self.variant == variant
    }
}

/// A remote mutation needed to apply an increment or decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// Add a new line with one piece.
    Create { product: ProductId, variant: VariantId },
    /// Set an existing line to `pcs` pieces.
    Update {
        product: ProductId,
        variant: VariantId,
        pcs: i64,
    },
    /// Remove the line.
    Delete { product: ProductId, variant: VariantId },
}

/// Ordered collection of cart lines.
///
/// Lines always carry at least one piece: anything that would drop a line
/// to zero removes it instead, and stored lines without pieces are dropped
/// on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<CartLine>")]
pub struct CartLines(Vec<CartLine>);

impl CartLines {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from raw lines, dropping any without a positive piece count.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        Self(lines.into_iter().filter(|l| l.pcs > 0).collect())
    }

    /// Add one piece, creating the line if needed. Returns the new count.
    pub fn increment(&mut self, product: ProductId, variant: VariantId) -> i64 {
        match self.position(product, variant) {
            Some(idx) => {
                let line = &mut self.0[idx];
                line.pcs = line.pcs.saturating_add(1);
                line.pcs
            }
            None => {
                self.0.push(CartLine::new(product, variant, 1));
                1
            }
        }
    }

    /// Remove one piece, dropping the line at zero.
    ///
    /// Returns the remaining count, or `None` if the line was not in the cart.
    pub fn decrement(&mut self, product: ProductId, variant: VariantId) -> Option<i64> {
        let idx = self.position(product, variant)?;
        let remaining = self.0[idx].pcs - 1;
        if remaining <= 0 {
            self.0.remove(idx);
            Some(0)
        } else {
            self.0[idx].pcs = remaining;
            Some(remaining)
        }
    }

    /// Set a line's piece count; zero or less removes it.
    pub fn set_pcs(&mut self, product: ProductId, variant: VariantId, pcs: i64) {
        if pcs <= 0 {
            self.remove(product, variant);
            return;
        }
        match self.position(product, variant) {
            Some(idx) => self.0[idx].pcs = pcs,
            None => self.0.push(CartLine::new(product, variant, pcs)),
        }
    }

    /// Remove a line. Returns whether it was present.
    pub fn remove(&mut self, product: ProductId, variant: VariantId) -> bool {
        let len_before = self.0.len();
        self.0.retain(|l| !l.matches(product, variant));
        self.0.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Plan the remote change for an increment without applying it.
    pub fn plan_increment(&self, product: ProductId, variant: VariantId) -> CartChange {
        match self.find(product, variant) {
            Some(line) => CartChange::Update {
                product,
                variant,
                pcs: line.pcs.saturating_add(1),
            },
            None => CartChange::Create { product, variant },
        }
    }

    /// Plan the remote change for a decrement without applying it.
    ///
    /// Returns `None` when the line is not in the cart.
    pub fn plan_decrement(&self, product: ProductId, variant: VariantId) -> Option<CartChange> {
        let line = self.find(product, variant)?;
        let remaining = line.pcs - 1;
        Some(if remaining <= 0 {
            CartChange::Delete { product, variant }
        } else {
            CartChange::Update {
                product,
                variant,
                pcs: remaining,
            }
        })
    }

    /// Find a line.
    pub fn find(&self, product: ProductId, variant: VariantId) -> Option<&CartLine> {
        self.0.iter().find(|l| l.matches(product, variant))
    }

    /// Sum of all piece counts.
    pub fn total_pieces(&self) -> i64 {
        self.0.iter().map(|l| l.pcs.max(0)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.0.iter()
    }

    /// Borrow the lines as a slice.
    pub fn as_slice(&self) -> &[CartLine] {
        &self.0
    }

    /// Lines without the server-only `user` field, as stored locally.
    pub fn to_local(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|l| CartLine::new(l.product, l.variant, l.pcs))
                .collect(),
        )
    }

    fn position(&self, product: ProductId, variant: VariantId) -> Option<usize> {
        self.0.iter().position(|l| l.matches(product, variant))
    }
}

impl From<Vec<CartLine>> for CartLines {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl FromIterator<CartLine> for CartLines {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: ProductId = ProductId::new(1);
    const V: VariantId = VariantId::new(11);
    const V2: VariantId = VariantId::new(12);

    #[test]
    fn test_increment_creates_then_grows() {
        let mut cart = CartLines::new();
        assert_eq!(cart.increment(P, V), 1);
        assert_eq!(cart.increment(P, V), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_pieces(), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = CartLines::new();
        cart.increment(P, V);
        cart.increment(P, V2);
        assert_eq!(cart.decrement(P, V), Some(0));
        assert!(cart.find(P, V).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_decrement_missing_line_is_noop() {
        let mut cart = CartLines::new();
        assert_eq!(cart.decrement(P, V), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_counts_never_go_negative() {
        let mut cart = CartLines::new();
        cart.increment(P, V);
        for _ in 0..5 {
            cart.decrement(P, V);
        }
        assert_eq!(cart.total_pieces(), 0);
        assert!(cart.iter().all(|l| l.pcs > 0));
    }

    #[test]
    fn test_from_lines_drops_non_positive() {
        let cart = CartLines::from_lines(vec![
            CartLine::new(P, V, 0),
            CartLine::new(P, V2, -3),
            CartLine::new(ProductId::new(2), VariantId::new(21), 2),
        ]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_pieces(), 2);
    }

    #[test]
    fn test_set_pcs() {
        let mut cart = CartLines::new();
        cart.set_pcs(P, V, 4);
        assert_eq!(cart.find(P, V).unwrap().pcs, 4);
        cart.set_pcs(P, V, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_plan_increment() {
        let mut cart = CartLines::new();
        assert_eq!(
            cart.plan_increment(P, V),
            CartChange::Create {
                product: P,
                variant: V
            }
        );
        cart.increment(P, V);
        assert_eq!(
            cart.plan_increment(P, V),
            CartChange::Update {
                product: P,
                variant: V,
                pcs: 2
            }
        );
        // Planning does not mutate.
        assert_eq!(cart.total_pieces(), 1);
    }

    #[test]
    fn test_plan_decrement() {
        let mut cart = CartLines::new();
        assert_eq!(cart.plan_decrement(P, V), None);
        cart.increment(P, V);
        assert_eq!(
            cart.plan_decrement(P, V),
            Some(CartChange::Delete {
                product: P,
                variant: V
            })
        );
        cart.increment(P, V);
        assert_eq!(
            cart.plan_decrement(P, V),
            Some(CartChange::Update {
                product: P,
                variant: V,
                pcs: 1
            })
        );
    }

    #[test]
    fn test_wire_shape() {
        let mut cart = CartLines::new();
        cart.increment(P, V);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"product":1,"variant":11,"pcs":1}]"#);

        let server: CartLines =
            serde_json::from_str(r#"[{"user":5,"product":1,"variant":11,"pcs":3}]"#).unwrap();
        assert_eq!(server.as_slice()[0].user, Some(UserId::new(5)));
        assert_eq!(server.to_local().as_slice()[0].user, None);
    }

    #[test]
    fn test_deserialize_drops_empty_lines() {
        let cart: CartLines =
            serde_json::from_str(r#"[{"product":1,"variant":11},{"product":1,"variant":12,"pcs":2}]"#)
                .unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_pieces(), 2);
    }
}
