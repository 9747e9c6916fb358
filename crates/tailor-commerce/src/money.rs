//! Money type for representing rupee amounts.
//!
//! Uses paisa-based integer representation to avoid floating-point
//! precision issues. Bills split amounts into a rupee column and a paisa
//! column, so the type exposes both halves directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Paisa per rupee.
pub const PAISA_PER_RUPEE: i64 = 100;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Nepalese rupee.
    #[default]
    NPR,
    /// Indian rupee.
    INR,
    /// US dollar.
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "NPR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::NPR => "NPR",
            Currency::INR => "INR",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "Rs.").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::NPR => "Rs.",
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "NPR" => Some(Currency::NPR),
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in paisa (1/100 of a rupee).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in paisa.
    pub amount_paisa: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from paisa.
    pub fn new(amount_paisa: i64, currency: Currency) -> Self {
        Self {
            amount_paisa,
            currency,
        }
    }

    /// Create a Money value from a rupee column and a paisa column.
    ///
    /// Paisa of 100 or more roll over into rupees.
    ///
    /// ```
    /// use tailor_commerce::money::{Money, Currency};
    /// let m = Money::from_parts(10, 150, Currency::NPR);
    /// assert_eq!((m.rupees(), m.paisa()), (11, 50));
    /// ```
    pub fn from_parts(rupees: i64, paisa: i64, currency: Currency) -> Self {
        let amount = rupees
            .saturating_mul(PAISA_PER_RUPEE)
            .saturating_add(paisa);
        Self::new(amount, currency)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest paisa.
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_paisa = (amount * PAISA_PER_RUPEE as f64).round() as i64;
        Self::new(amount_paisa, currency)
    }

    /// Parse a decimal string such as `"1500"`, `"12.5"` or `"-3.75"`.
    ///
    /// Digits past the second decimal place are rounded half up.
    /// Returns `None` for empty or non-numeric input.
    pub fn parse(input: &str, currency: Currency) -> Option<Self> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let rupees: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut frac_digits = frac.chars().filter_map(|c| c.to_digit(10)).map(i64::from);
        let tens = frac_digits.next().unwrap_or(0);
        let ones = frac_digits.next().unwrap_or(0);
        let round_up = frac_digits.next().map(|d| d >= 5).unwrap_or(false);

        let mut paisa = tens * 10 + ones;
        if round_up {
            paisa += 1;
        }
        let amount = rupees
            .checked_mul(PAISA_PER_RUPEE)?
            .checked_add(paisa)?;
        Some(Self::new(if negative { -amount } else { amount }, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Whole rupees, truncated toward zero.
    pub fn rupees(&self) -> i64 {
        self.amount_paisa / PAISA_PER_RUPEE
    }

    /// Paisa remainder, always in `0..100`.
    pub fn paisa(&self) -> i64 {
        (self.amount_paisa % PAISA_PER_RUPEE).abs()
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_paisa == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_paisa > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_paisa < 0
    }

    /// Floor the amount at zero.
    pub fn clamp_non_negative(&self) -> Self {
        Self::new(self.amount_paisa.max(0), self.currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_paisa as f64 / PAISA_PER_RUPEE as f64
    }

    /// Format as a display string (e.g., "Rs. 1500.50").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let separator = if self.currency == Currency::NPR { " " } else { "" };
        format!(
            "{sign}{}{separator}{}.{:02}",
            self.currency.symbol(),
            self.rupees().abs(),
            self.paisa()
        )
    }

    /// Format without symbol (e.g., "1500.50").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{sign}{}.{:02}", self.rupees().abs(), self.paisa())
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_paisa
            .checked_add(other.amount_paisa)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_paisa
            .checked_sub(other.amount_paisa)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a whole factor, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_paisa
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a decimal factor (e.g., a fractional quantity), rounding to the paisa.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_paisa as f64 * factor).round() as i64;
        Money::new(new_amount, self.currency)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        self.multiply_decimal(percent / 100.0)
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter for backend decimal fields such as `"8000.00"` or `8000.5`.
///
/// Writes a JSON number in rupees and reads either a number or a decimal
/// string. Amounts are taken to be in NPR.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use tailor_commerce::money::{self, Money};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "money::decimal")]
///     price: Money,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"price": "8000.50"}"#).unwrap();
/// assert_eq!(row.price.amount_paisa, 800050);
/// assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"price":8000.5}"#);
/// ```
pub mod decimal {
    use super::{Currency, Money};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        match Decimal::deserialize(deserializer)? {
            Decimal::Number(n) => Ok(Money::from_decimal(n, Currency::NPR)),
            Decimal::Text(s) => Money::parse(&s, Currency::NPR)
                .ok_or_else(|| de::Error::custom(format!("invalid decimal amount: {s:?}"))),
        }
    }

    /// Nullable variant of the adapter.
    pub mod option {
        use super::Money;
        use serde::{Deserialize, Deserializer, Serializer};

        #[derive(Deserialize)]
        struct Wrapped(#[serde(with = "super")] Money);

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => super::serialize(m, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(m)| m))
        }
    }
}
