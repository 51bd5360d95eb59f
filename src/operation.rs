//! Operation records and their validation
//!
//! Raw records arrive as loosely typed JSON mappings. Validation runs in a
//! fixed field order (kind, then quantity, then unit cost) and the first
//! invalid field decides which error the batch aborts with.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{OperationError, Result};
use crate::money::Money;

/// Buy/sell discriminator
///
/// Tokens are case-sensitive and nothing is normalized: `"buy"` and
/// `"sell"` are the only accepted spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Buy,
    Sell,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Buy => "buy",
            OperationKind::Sell => "sell",
        }
    }
}

impl FromStr for OperationKind {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "buy" => Ok(OperationKind::Buy),
            "sell" => Ok(OperationKind::Sell),
            _ => Err(OperationError::InvalidOperationType),
        }
    }
}

/// Positive share count. Zero, negative, and fractional input are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(shares: i64) -> Result<Self> {
        if shares <= 0 {
            return Err(OperationError::InvalidQuantity);
        }
        Ok(Quantity(shares as u64))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One operation exactly as it appeared on the wire, before validation.
///
/// Fields stay as raw JSON values so that type mismatches are attributed to
/// the right field by [`Operation::from_raw`] instead of failing the whole
/// line inside serde.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOperation {
    #[serde(default)]
    pub operation: Option<Value>,
    #[serde(rename = "unit-cost", default)]
    pub unit_cost: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
}

/// Validated operation: kind, unit price, and share count. Immutable once
/// built; one instance per input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    kind: OperationKind,
    unit_price: Money,
    quantity: Quantity,
}

impl Operation {
    /// Validate a raw record.
    ///
    /// Field order is a contract: the kind is checked first, then the
    /// quantity, then the unit cost. On a record with several invalid
    /// fields, the earliest one in that order names the error.
    pub fn from_raw(raw: &RawOperation) -> Result<Self> {
        let kind = match raw.operation.as_ref().and_then(Value::as_str) {
            Some(token) => token.parse()?,
            None => return Err(OperationError::InvalidOperationType),
        };
        let quantity = parse_quantity(raw.quantity.as_ref())?;
        let unit_price = parse_unit_cost(raw.unit_cost.as_ref())?;

        Ok(Self {
            kind,
            unit_price,
            quantity,
        })
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Gross value of the operation: unit price times share count.
    pub fn total(&self) -> Money {
        self.unit_price.times(self.quantity.get())
    }
}

fn parse_quantity(value: Option<&Value>) -> Result<Quantity> {
    let shares = value
        .and_then(Value::as_i64)
        .ok_or(OperationError::InvalidQuantity)?;
    Quantity::new(shares)
}

fn parse_unit_cost(value: Option<&Value>) -> Result<Money> {
    let number = match value {
        Some(Value::Number(n)) => n,
        _ => return Err(OperationError::InvalidAmount),
    };
    let decimal =
        Decimal::from_str(&number.to_string()).map_err(|_| OperationError::InvalidAmount)?;
    Money::from_decimal(decimal)
}
