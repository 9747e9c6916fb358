//! Newtype IDs for type-safe identifiers.
//!
//! The backend hands out integer primary keys. Wrapping them keeps a
//! `ProductId` from being passed where a `VariantId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate integer newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A backend primary key.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create a new ID from a raw key.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw key.
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(VariantId);
define_id!(BookingId);
define_id!(UserId);
define_id!(OrderId);
define_id!(AddressId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(12);
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn test_id_from_str() {
        let id: VariantId = " 42 ".parse().unwrap();
        assert_eq!(id, VariantId::new(42));
        assert!("abc".parse::<VariantId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&BookingId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: BookingId = serde_json::from_str("7").unwrap();
        assert_eq!(back, BookingId::new(7));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", UserId::new(3)), "3");
    }
}
