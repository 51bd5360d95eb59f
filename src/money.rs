//! Fixed-point monetary values in integer centavos
//!
//! Every stored amount and every arithmetic step stays in the integer
//! domain; floating point never enters a stored value. Decimal input is
//! converted exactly once at the boundary, truncating fractional centavos.

use std::fmt;
use std::ops::Add;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::{OperationError, Result};

/// Monetary value in integer minor units (centavos).
///
/// Non-negative by construction when built through [`Money::from_decimal`].
/// Signed profit/loss arithmetic happens on raw centavo counts in the tax
/// calculator and only clamped, non-negative values come back into `Money`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Build from a decimal amount in currency units, truncating to centavos.
    ///
    /// `100.567` becomes `10056` centavos; fractional centavos are discarded,
    /// never rounded. Negative amounts are rejected with `InvalidAmount`.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(OperationError::InvalidAmount);
        }
        (value * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .map(Money)
            .ok_or(OperationError::InvalidAmount)
    }

    /// Build directly from a centavo count.
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    pub const fn centavos(self) -> i64 {
        self.0
    }

    /// Unit amount times a share count.
    pub fn times(self, quantity: u64) -> Money {
        Money((i128::from(self.0) * i128::from(quantity)) as i64)
    }

    /// Difference clamped at zero. Used for loss-pool draws, where the
    /// result must never go negative.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl fmt::Display for Money {
    /// Renders with exactly two fraction digits, e.g. `10000.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    /// Serializes as a decimal string with two fraction digits, matching the
    /// output wire format.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_decimal_truncates_fractional_centavos() {
        assert_eq!(Money::from_decimal(dec!(100.567)).unwrap().centavos(), 10056);
        assert_eq!(Money::from_decimal(dec!(0.999)).unwrap().centavos(), 99);
        assert_eq!(Money::from_decimal(dec!(10.00)).unwrap().centavos(), 1000);
        assert_eq!(Money::from_decimal(dec!(0)).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_from_decimal_rejects_negative_amounts() {
        assert_eq!(
            Money::from_decimal(dec!(-0.01)),
            Err(OperationError::InvalidAmount)
        );
        assert_eq!(
            Money::from_decimal(dec!(-1000)),
            Err(OperationError::InvalidAmount)
        );
    }

    #[test]
    fn test_times_scales_by_share_count() {
        let price = Money::from_decimal(dec!(15.50)).unwrap();
        assert_eq!(price.times(100), Money::from_centavos(155_000));
        assert_eq!(price.times(0), Money::ZERO);
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let a = Money::from_centavos(500);
        let b = Money::from_centavos(800);
        assert_eq!(b.saturating_sub(a), Money::from_centavos(300));
        assert_eq!(a.saturating_sub(b), Money::ZERO);
    }

    #[test]
    fn test_display_always_has_two_fraction_digits() {
        assert_eq!(Money::ZERO.to_string(), "0.00");
        assert_eq!(Money::from_centavos(5).to_string(), "0.05");
        assert_eq!(Money::from_centavos(1_000_000).to_string(), "10000.00");
        assert_eq!(Money::from_centavos(-50).to_string(), "-0.50");
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let tax = Money::from_centavos(1_000_000);
        assert_eq!(serde_json::to_string(&tax).unwrap(), "\"10000.00\"");
    }
}
