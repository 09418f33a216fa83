//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! currency formatter seam used to display totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Base price 10.10 + option 0.20 in floating point:                      │
//! │    10.1 + 0.2 = 10.299999999999999  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1010 cents + 20 cents = 1030 cents  ✅                               │
//! │                                                                         │
//! │  Discount options are just negative cents: 1000 + 200 - 100 = 1100     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::{CurrencyFormat, CurrencyFormatter, Money};
//!
//! let base = Money::from_cents(1000);                 // $10.00
//! let total = base + Money::from_cents(200) - Money::from_cents(100);
//! assert_eq!(total.cents(), 1100);
//!
//! let format = CurrencyFormat::default();
//! assert_eq!(format.format(total), "$11.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discount options
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare integer**: `{"price": 1050}` is $10.50
///
/// ## Where Money Flows
/// ```text
/// Product.price ──┬──► DraftCartItem total ──► Drawer footer "Total"
///                 │
/// Option.price ───┘    (base + Σ options) × quantity
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value, saturating at `i64::MAX` cents.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies by a quantity, `None` on overflow.
    #[inline]
    pub const fn checked_mul(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, saturating on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1100);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 3300);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Operators saturate instead of wrapping. Catalog prices are bounded by
// `MAX_PRICE_CENTS`, so saturation only shows up with unvalidated input.

/// Display uses the default currency format (`$1,234.56`).
///
/// ## Note
/// This is for logs and debugging. Display paths take a
/// [`CurrencyFormatter`] so the store can configure symbol and separators.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CurrencyFormat::default().format_amount(*self))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// Formats a monetary amount for display.
///
/// The storefront treats formatting as an external, side-effect-free
/// collaborator: `format(amount) -> String`. Any `Fn(Money) -> String`
/// closure is a formatter, which keeps tests and alternative locales cheap.
pub trait CurrencyFormatter {
    /// Formats `amount` as a display string.
    fn format(&self, amount: Money) -> String;
}

impl<F> CurrencyFormatter for F
where
    F: Fn(Money) -> String,
{
    fn format(&self, amount: Money) -> String {
        self(amount)
    }
}

/// Configurable currency format.
///
/// ## Examples
/// ```text
/// symbol "$", '.', Some(',')        1234567 cents ──► "$12,345.67"
/// symbol "$ ", ',', Some('.')       1234567 cents ──► "$ 12.345,67"
/// symbol "€", ',', None             -550 cents    ──► "-€5,50"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Prefix placed before the amount (may include a trailing space).
    pub symbol: String,

    /// Separator between major and minor units.
    pub decimal_separator: char,

    /// Separator between thousands groups, `None` disables grouping.
    pub thousands_separator: Option<char>,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            decimal_separator: '.',
            thousands_separator: Some(','),
        }
    }
}

impl CurrencyFormat {
    /// Formats an amount using this format.
    pub fn format_amount(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let major = amount.dollars().unsigned_abs().to_string();

        let grouped = match self.thousands_separator {
            Some(sep) => group_thousands(&major, sep),
            None => major,
        };

        format!(
            "{}{}{}{}{:02}",
            sign,
            self.symbol,
            grouped,
            self.decimal_separator,
            amount.cents_part()
        )
    }
}

impl CurrencyFormatter for CurrencyFormat {
    fn format(&self, amount: Money) -> String {
        self.format_amount(amount)
    }
}

/// Inserts `sep` every three digits counting from the right.
fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
