//! Cross-venue arbitrage evaluation

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use crate::types::{ArbitrageResult, Direction, EffectivePrice};

/// Compare two adjusted output amounts obtained for the same `amount_in`.
///
/// Fees and slippage are already embedded in the adjusted amounts, so net PnL
/// equals gross PnL. A missing side yields a result with no direction and no
/// PnL. The threshold is absolute, in quote-asset units, and must be strictly
/// exceeded.
pub fn evaluate(
    adjusted_a: Option<Decimal>,
    adjusted_b: Option<Decimal>,
    amount_in: Decimal,
    threshold: Decimal,
) -> ArbitrageResult {
    let price_a = adjusted_a.and_then(|amount| effective_price(amount, amount_in));
    let price_b = adjusted_b.and_then(|amount| effective_price(amount, amount_in));

    let (Some(a), Some(b)) = (price_a, price_b) else {
        return ArbitrageResult {
            price_a,
            price_b,
            divergence_pct: None,
            direction: None,
            gross_pnl: None,
            net_pnl: None,
            pnl_pct: None,
        };
    };

    let pnl_a_to_b = b.adjusted_amount - a.adjusted_amount;
    let pnl_b_to_a = a.adjusted_amount - b.adjusted_amount;

    let direction = if pnl_a_to_b > threshold {
        Direction::BuyASellB
    } else if pnl_b_to_a > threshold {
        Direction::BuyBSellA
    } else {
        Direction::NoOpportunity
    };

    let gross_pnl = pnl_a_to_b.max(pnl_b_to_a);

    ArbitrageResult {
        price_a,
        price_b,
        divergence_pct: percent_of_mean(a.price - b.price, a.price, b.price),
        direction: Some(direction),
        gross_pnl: Some(gross_pnl),
        net_pnl: Some(gross_pnl),
        pnl_pct: percent_of_mean(gross_pnl, a.adjusted_amount, b.adjusted_amount),
    }
}

fn effective_price(adjusted_amount: Decimal, amount_in: Decimal) -> Option<EffectivePrice> {
    let price = adjusted_amount.checked_div(amount_in)?;
    Some(EffectivePrice {
        adjusted_amount,
        price,
    })
}

/// `|delta| / ((x + y) / 2) × 100`
fn percent_of_mean(delta: Decimal, x: Decimal, y: Decimal) -> Option<Decimal> {
    let mean = (x + y) / dec!(2);
    delta.abs().checked_div(mean).map(|ratio| ratio * dec!(100))
}
