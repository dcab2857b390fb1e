//! Per-venue quote types

use alloy::primitives::U256;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Which of the two configured venues a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VenueSide {
    A,
    B,
}

impl fmt::Display for VenueSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueSide::A => write!(f, "A"),
            VenueSide::B => write!(f, "B"),
        }
    }
}

/// Raw quote returned by a venue for the cycle's fixed input amount.
#[derive(Debug, Clone)]
pub struct VenueQuote {
    pub venue: String,
    pub raw_amount_out: U256,
    pub amount_out: Decimal,
    pub fee_rate: Decimal,
}

/// A venue quote after fee and slippage deduction.
#[derive(Debug, Clone)]
pub struct AdjustedQuote {
    pub quote: VenueQuote,
    pub adjusted_amount: Decimal,
}
