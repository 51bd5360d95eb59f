//! Sell-side tax assessment
//!
//! Buys never owe tax and bypass this module entirely. The batch fold calls
//! in here only for sells, passing the portfolio as it stood before the
//! sell's position decrement, so profit is measured against the average
//! established by prior buys.

use crate::money::Money;
use crate::operation::Operation;
use crate::portfolio::Portfolio;

use super::regime::TaxRegime;

/// Outcome of assessing one sell: the tax due plus the loss pool as it
/// stands after the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub tax: Money,
    pub remaining_loss: Money,
}

/// Assess a sell against the pre-sell portfolio and the loss carryforward.
///
/// Three cases, checked in order:
/// 1. Sold at or below the average cost: nothing owed, the shortfall joins
///    the loss pool.
/// 2. Profitable but the gross sale value is within the exemption
///    threshold: nothing owed, and the loss pool is left untouched -
///    exempt gains never offset accumulated losses. Deliberate regime
///    policy, not an oversight.
/// 3. Profitable above the threshold: the loss pool offsets the profit,
///    and the flat rate applies to whatever net remains.
///
/// Never fails; input validation happened upstream.
pub fn assess(
    operation: &Operation,
    before: &Portfolio,
    accumulated_loss: Money,
    regime: &TaxRegime,
) -> Assessment {
    let proceeds = operation.total();
    let cost_basis = before.average_cost().times(operation.quantity().get());
    // Signed result of the sale, in centavos.
    let outcome = proceeds.centavos() - cost_basis.centavos();

    if outcome <= 0 {
        return Assessment {
            tax: Money::ZERO,
            remaining_loss: accumulated_loss + Money::from_centavos(-outcome),
        };
    }

    if regime.exempts(proceeds) {
        return Assessment {
            tax: Money::ZERO,
            remaining_loss: accumulated_loss,
        };
    }

    let profit = Money::from_centavos(outcome);
    let net_profit = profit.saturating_sub(accumulated_loss);
    let remaining_loss = accumulated_loss.saturating_sub(profit);

    Assessment {
        tax: regime.levy(net_profit),
        remaining_loss,
    }
}
