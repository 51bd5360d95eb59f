//! Gains - Brazilian capital gains tax calculator
//!
//! This library computes the tax owed on sequences of stock buy and sell
//! operations under the simplified Brazilian swing-trade regime: weighted
//! average cost basis, a R$ 20.000,00 exemption threshold on gross sale
//! value, and loss carryforward. Each batch of operations is fully
//! isolated; no state survives from one batch to the next.

pub mod error;
pub mod money;
pub mod operation;
pub mod portfolio;
pub mod tax;
