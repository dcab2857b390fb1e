//! DEX arbitrage scanner for a single token pair
//!
//! Quotes a fixed base-asset amount on two venues every cycle, deducts each
//! venue's fee and a global slippage tolerance, and reports whether the
//! difference in received quote asset clears an absolute PnL threshold.
//! Nothing is executed or persisted.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod venues;
pub mod arbitrage;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::{BotError, BotResult, QuoteError, QuoteResult};
pub use types::*;

// Type alias for our concrete provider
pub type ConcreteProvider = alloy::providers::RootProvider<alloy::transports::BoxTransport>;
