//! Arbitrage evaluation and report types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use super::TradeIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    NoOpportunity,
    /// Venue B pays more for the base asset: acquire on A, sell on B.
    BuyASellB,
    /// Venue A pays more for the base asset: acquire on B, sell on A.
    BuyBSellA,
}

impl Direction {
    /// The same opportunity seen with the venues swapped.
    pub fn mirrored(self) -> Self {
        match self {
            Direction::NoOpportunity => Direction::NoOpportunity,
            Direction::BuyASellB => Direction::BuyBSellA,
            Direction::BuyBSellA => Direction::BuyASellB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectivePrice {
    pub adjusted_amount: Decimal,
    pub price: Decimal,
}

/// Outcome of comparing two adjusted quotes.
///
/// When either side is missing, `direction` and both PnL fields are `None`,
/// which callers must not confuse with `Some(Direction::NoOpportunity)`.
///
/// For every complete cycle `gross_pnl`/`net_pnl` hold the better of the two
/// directional PnLs, `|adjusted_a - adjusted_b|`, even when `direction` is
/// `NoOpportunity`. A positive PnL is not a signal on its own; only
/// `direction` says whether it cleared the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArbitrageResult {
    pub price_a: Option<EffectivePrice>,
    pub price_b: Option<EffectivePrice>,
    pub divergence_pct: Option<Decimal>,
    pub direction: Option<Direction>,
    pub gross_pnl: Option<Decimal>,
    pub net_pnl: Option<Decimal>,
    pub pnl_pct: Option<Decimal>,
}

impl ArbitrageResult {
    pub fn is_complete(&self) -> bool {
        self.direction.is_some()
    }

    pub fn has_opportunity(&self) -> bool {
        matches!(
            self.direction,
            Some(Direction::BuyASellB) | Some(Direction::BuyBSellA)
        )
    }
}

/// One venue's contribution to a scan cycle.
#[derive(Debug, Clone, Serialize)]
pub struct VenueLeg {
    pub venue: String,
    pub fee_rate: Decimal,
    pub amount_out: Option<Decimal>,
    pub adjusted_amount: Option<Decimal>,
    pub error: Option<String>,
}

/// Everything produced by a single scan cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub intent: TradeIntent,
    pub slippage_tolerance: Decimal,
    pub threshold: Decimal,
    pub venue_a: VenueLeg,
    pub venue_b: VenueLeg,
    pub result: ArbitrageResult,
}
