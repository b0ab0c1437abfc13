use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use crate::models::cart::CartError;

pub const DEFAULT_TAX_RATE_BPS: u32 = 800;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Largest accepted unit price: 1,000,000.00.
pub const MAX_PRICE_CENTS: u64 = 100_000_000;

const BPS_PER_UNIT: u128 = 10_000;

lazy_static! {
    static ref PRICE_REGEX: Regex = Regex::new(r"^([0-9]+)(?:\.([0-9]{1,2}))?$").unwrap();
}

/// Non-negative currency amount held as whole cents.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Parse a display price such as `"$8.00"` or `"3.5"`.
    ///
    /// The currency symbol is optional, surrounding whitespace is ignored and
    /// at most two fraction digits are accepted. Prices above
    /// `MAX_PRICE_CENTS` are rejected.
    pub fn parse_price_text(text: &str, currency_symbol: &str) -> Result<Self, CartError> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix(currency_symbol)
            .unwrap_or(trimmed)
            .trim();

        let captures = PRICE_REGEX
            .captures(digits)
            .ok_or_else(|| CartError::invalid(format!("'{}' is not a valid price", text)))?;

        let out_of_range = || CartError::invalid(format!("'{}' is out of range", text));

        let units: u64 = captures[1].parse().map_err(|_| out_of_range())?;
        let fraction: u64 = match captures.get(2).map(|m| m.as_str()) {
            Some(f) => {
                let value: u64 = f.parse().map_err(|_| out_of_range())?;
                if f.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
            None => 0,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .filter(|cents| *cents <= MAX_PRICE_CENTS)
            .map(Money)
            .ok_or_else(out_of_range)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money(self.0 * u64::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// Tax rate and currency symbol applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// Tax rate in basis points (800 = 8%).
    pub tax_rate_bps: u32,
    pub currency_symbol: String,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Pricing {
    pub fn new(tax_rate_bps: u32, currency_symbol: impl Into<String>) -> Self {
        Self {
            tax_rate_bps,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Tax on `subtotal`, rounded to the nearest cent with halves rounded up.
    pub fn tax_on(&self, subtotal: Money) -> Money {
        let scaled = u128::from(subtotal.cents()) * u128::from(self.tax_rate_bps);
        let cents = (scaled + BPS_PER_UNIT / 2) / BPS_PER_UNIT;
        Money(u64::try_from(cents).unwrap_or(u64::MAX))
    }

    pub fn format(&self, amount: Money) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }

    pub fn parse(&self, text: &str) -> Result<Money, CartError> {
        Money::parse_price_text(text, &self.currency_symbol)
    }
}
