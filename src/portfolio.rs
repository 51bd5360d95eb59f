//! Portfolio position and weighted-average cost basis
//!
//! Tracks how many shares are held and what they cost on average. Buys
//! recompute the average; sells only shrink the position. Transitions
//! return a new value instead of mutating in place, so the batch fold can
//! hold the pre-sell state while assessing tax.

use crate::error::{OperationError, Result};
use crate::money::Money;
use crate::operation::Quantity;

/// Current holding: share count plus the weighted-average unit cost.
///
/// The average is meaningless while the position is flat; the next buy
/// replaces it outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Portfolio {
    position: u64,
    average_cost: Money,
}

impl Portfolio {
    /// Empty portfolio: no shares, zero average.
    pub fn new() -> Self {
        Self {
            position: 0,
            average_cost: Money::ZERO,
        }
    }

    pub const fn position(&self) -> u64 {
        self.position
    }

    pub const fn average_cost(&self) -> Money {
        self.average_cost
    }

    /// Apply a buy: grow the position and recompute the weighted average.
    ///
    /// A buy into a flat position takes the incoming price as the new
    /// average. Otherwise the average is the position-weighted mean of the
    /// held cost and the incoming cost, floor-divided in centavos. Buys
    /// never fail on position rules.
    pub fn buy(self, unit_price: Money, quantity: Quantity) -> Portfolio {
        let incoming = quantity.get();
        if self.position == 0 {
            return Portfolio {
                position: incoming,
                average_cost: unit_price,
            };
        }

        let held_cost = i128::from(self.average_cost.centavos()) * i128::from(self.position);
        let incoming_cost = i128::from(unit_price.centavos()) * i128::from(incoming);
        let position = self.position + incoming;
        let average = (held_cost + incoming_cost) / i128::from(position);

        Portfolio {
            position,
            average_cost: Money::from_centavos(average as i64),
        }
    }

    /// Apply a sell: shrink the position, leaving the average untouched.
    ///
    /// Fails with `InsufficientPosition` when more shares are requested
    /// than held.
    pub fn sell(self, quantity: Quantity) -> Result<Portfolio> {
        let outgoing = quantity.get();
        if outgoing > self.position {
            return Err(OperationError::InsufficientPosition);
        }

        Ok(Portfolio {
            position: self.position - outgoing,
            average_cost: self.average_cost,
        })
    }
}
