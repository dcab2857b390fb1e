//! Pool-based venue: Uniswap V3 factory lookup plus quoter simulation

use alloy::primitives::{Address, Uint, aliases::{U24, U160}};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;
use crate::{
    errors::{QuoteError, QuoteResult},
    types::{Asset, TradeIntent, VenueQuote},
    venues::{
        QuoteSource,
        contracts::{IQuoter, IUniswapV3Factory},
        eth_call, raw_amount_in, venue_quote,
    },
    ConcreteProvider,
};

pub struct UniswapV3Quoter {
    name: String,
    provider: Arc<ConcreteProvider>,
    factory: Address,
    quoter: Address,
    base: Asset,
    quote: Asset,
    fee_tier: u32,
    fee: U24,
    fee_rate: Decimal,
}

/// Uniswap V3 fee tiers are hundredths of a basis point, so 100% is the ceiling.
pub const MAX_FEE_TIER: u32 = 1_000_000;

impl UniswapV3Quoter {
    pub fn new(
        name: String,
        provider: Arc<ConcreteProvider>,
        factory: Address,
        quoter: Address,
        intent: &TradeIntent,
        fee_tier: u32,
        fee_rate: Decimal,
    ) -> QuoteResult<Self> {
        if fee_tier == 0 || fee_tier >= MAX_FEE_TIER {
            return Err(QuoteError::InvalidFeeTier(fee_tier));
        }
        Ok(Self {
            name,
            provider,
            factory,
            quoter,
            base: intent.base.clone(),
            quote: intent.quote.clone(),
            fee_tier,
            fee: Uint::from_limbs([u64::from(fee_tier)]),
            fee_rate,
        })
    }

    /// Pool address for the configured pair and fee tier.
    pub async fn find_pool(&self) -> QuoteResult<Address> {
        let call = IUniswapV3Factory::getPoolCall {
            tokenA: self.base.address,
            tokenB: self.quote.address,
            fee: self.fee,
        };
        let pool = eth_call(&self.provider, self.factory, &call).await?.pool;

        if pool == Address::ZERO {
            return Err(QuoteError::PoolNotFound {
                base: self.base.address,
                quote: self.quote.address,
                fee_tier: self.fee_tier,
            });
        }
        Ok(pool)
    }
}

impl QuoteSource for UniswapV3Quoter {
    fn name(&self) -> &str {
        &self.name
    }

    fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    async fn quote(&self, amount_in: Decimal) -> QuoteResult<VenueQuote> {
        let raw_in = raw_amount_in(amount_in, &self.base)?;
        let pool = self.find_pool().await?;
        debug!("{} pool {} found, quoting {} raw {}", self.name, pool, raw_in, self.base.symbol);

        let call = IQuoter::quoteExactInputSingleCall {
            tokenIn: self.base.address,
            tokenOut: self.quote.address,
            fee: self.fee,
            amountIn: raw_in,
            sqrtPriceLimitX96: U160::ZERO,
        };
        let raw_out = eth_call(&self.provider, self.quoter, &call).await?.amountOut;

        venue_quote(&self.name, raw_out, &self.quote, self.fee_rate, amount_in)
    }
}
