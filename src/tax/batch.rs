//! Per-batch operation fold
//!
//! Threads the portfolio and the loss carryforward through an ordered
//! sequence of raw records, emitting one tax per record. The accumulator
//! never leaves the fold and nothing survives the batch: every batch starts
//! flat with an empty loss pool.

use tracing::debug;

use crate::error::Result;
use crate::money::Money;
use crate::operation::{Operation, OperationKind, RawOperation};
use crate::portfolio::Portfolio;

use super::calculator;
use super::regime::TaxRegime;

/// Accumulator threaded through one batch: the evolving portfolio, the
/// loss pool, and the taxes collected so far.
#[derive(Debug, Clone)]
struct BatchState {
    portfolio: Portfolio,
    accumulated_loss: Money,
    taxes: Vec<Money>,
}

impl BatchState {
    fn with_capacity(records: usize) -> Self {
        Self {
            portfolio: Portfolio::new(),
            accumulated_loss: Money::ZERO,
            taxes: Vec::with_capacity(records),
        }
    }
}

/// Process one batch of raw records under the given regime.
///
/// Records are validated and applied strictly in input order; each step
/// depends on the accumulator produced by all records before it. On
/// success the tax sequence has exactly one entry per record. The first
/// invalid record or oversold position aborts the whole batch - no partial
/// tax sequence is ever returned.
pub fn process_batch(records: &[RawOperation], regime: &TaxRegime) -> Result<Vec<Money>> {
    let state = records
        .iter()
        .try_fold(BatchState::with_capacity(records.len()), |state, raw| {
            let operation = Operation::from_raw(raw)?;
            apply(state, &operation, regime)
        })?;

    Ok(state.taxes)
}

fn apply(mut state: BatchState, operation: &Operation, regime: &TaxRegime) -> Result<BatchState> {
    match operation.kind() {
        OperationKind::Buy => {
            state.portfolio = state
                .portfolio
                .buy(operation.unit_price(), operation.quantity());
            state.taxes.push(Money::ZERO);
        }
        OperationKind::Sell => {
            // Assessment runs against the pre-sell portfolio.
            let before = state.portfolio;
            state.portfolio = state.portfolio.sell(operation.quantity())?;

            let assessment =
                calculator::assess(operation, &before, state.accumulated_loss, regime);
            debug!(
                tax = %assessment.tax,
                remaining_loss = %assessment.remaining_loss,
                position = state.portfolio.position(),
                "sell assessed"
            );

            state.accumulated_loss = assessment.remaining_loss;
            state.taxes.push(assessment.tax);
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperationError;
    use serde_json::{json, Value};

    fn records(value: Value) -> Vec<RawOperation> {
        serde_json::from_value(value).expect("batch should deserialize")
    }

    fn taxes(value: Value) -> Result<Vec<Money>> {
        process_batch(&records(value), &TaxRegime::default())
    }

    fn centavos(taxes: &[Money]) -> Vec<i64> {
        taxes.iter().map(|tax| tax.centavos()).collect()
    }

    #[test]
    fn test_buys_alone_never_owe_tax() {
        let result = taxes(json!([
            {"operation": "buy", "unit-cost": 10.00, "quantity": 100},
            {"operation": "buy", "unit-cost": 30.00, "quantity": 5},
            {"operation": "buy", "unit-cost": 1.99, "quantity": 10000}
        ]))
        .unwrap();

        assert_eq!(centavos(&result), vec![0, 0, 0]);
    }

    #[test]
    fn test_one_tax_entry_per_record_in_input_order() {
        let result = taxes(json!([
            {"operation": "buy", "unit-cost": 10.00, "quantity": 10000},
            {"operation": "sell", "unit-cost": 20.00, "quantity": 5000},
            {"operation": "sell", "unit-cost": 5.00, "quantity": 5000}
        ]))
        .unwrap();

        assert_eq!(centavos(&result), vec![0, 1_000_000, 0]);
    }

    #[test]
    fn test_empty_batch_yields_empty_tax_sequence() {
        assert_eq!(taxes(json!([])).unwrap(), Vec::<Money>::new());
    }

    #[test]
    fn test_loss_carries_forward_only_within_the_batch() {
        let losing = json!([
            {"operation": "buy", "unit-cost": 10.00, "quantity": 10000},
            {"operation": "sell", "unit-cost": 5.00, "quantity": 5000}
        ]);
        let profitable = json!([
            {"operation": "buy", "unit-cost": 10.00, "quantity": 10000},
            {"operation": "sell", "unit-cost": 20.00, "quantity": 3000}
        ]);

        // Processed back to back, the second batch sees no loss pool.
        assert_eq!(centavos(&taxes(losing).unwrap()), vec![0, 0]);
        assert_eq!(centavos(&taxes(profitable).unwrap()), vec![0, 600_000]);
    }

    #[test]
    fn test_invalid_record_aborts_the_whole_batch() {
        let result = taxes(json!([
            {"operation": "buy", "unit-cost": 10.00, "quantity": 100},
            {"operation": "hold", "unit-cost": 10.00, "quantity": 100},
            {"operation": "sell", "unit-cost": 10.00, "quantity": 100}
        ]));

        assert_eq!(result, Err(OperationError::InvalidOperationType));
    }

    #[test]
    fn test_oversell_aborts_the_whole_batch() {
        let result = taxes(json!([
            {"operation": "buy", "unit-cost": 10.00, "quantity": 100},
            {"operation": "sell", "unit-cost": 10.00, "quantity": 101}
        ]));

        assert_eq!(result, Err(OperationError::InsufficientPosition));
    }

    #[test]
    fn test_sell_without_any_prior_buy_aborts() {
        let result = taxes(json!([
            {"operation": "sell", "unit-cost": 10.00, "quantity": 1}
        ]));

        assert_eq!(result, Err(OperationError::InsufficientPosition));
    }
}
