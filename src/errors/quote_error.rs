//! Venue quote failures
//!
//! None of these abort a scan cycle: the scanner degrades the venue to
//! "absent" for that cycle and reports it.

use alloy::primitives::Address;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Trade amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error("Fee tier {0} is outside (0, 1000000)")]
    InvalidFeeTier(u32),

    #[error("No pool for {base}/{quote} at fee tier {fee_tier}")]
    PoolNotFound {
        base: Address,
        quote: Address,
        fee_tier: u32,
    },

    #[error("Router returned no amounts for the swap path")]
    EmptyPath,

    #[error("Venue quoted zero output for {0}")]
    ZeroOutput(Decimal),

    #[error("RPC call to {contract} failed: {message}")]
    Transport {
        contract: Address,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to decode {context}")]
    Decode {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl QuoteError {
    /// Short label used for per-venue failure counters.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::InvalidAmount(_) => "invalid_amount",
            QuoteError::InvalidFeeTier(_) => "invalid_fee_tier",
            QuoteError::PoolNotFound { .. } => "pool_not_found",
            QuoteError::EmptyPath => "empty_path",
            QuoteError::ZeroOutput(_) => "zero_output",
            QuoteError::Transport { .. } => "transport",
            QuoteError::Decode { .. } => "decode",
        }
    }
}

pub type QuoteResult<T> = Result<T, QuoteError>;
