//! Token and trade intent types

use alloy::primitives::Address;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A token the scanner prices. Decimals convert raw integer amounts to
/// decimal amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

impl Asset {
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.address)
    }
}

/// The fixed base amount quoted on both venues every cycle.
#[derive(Debug, Clone, Serialize)]
pub struct TradeIntent {
    pub amount_in: Decimal,
    pub base: Asset,
    pub quote: Asset,
}
