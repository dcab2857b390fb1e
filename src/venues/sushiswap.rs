//! Routed venue: Uniswap V2 style router `getAmountsOut`

use alloy::primitives::Address;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;
use crate::{
    errors::{QuoteError, QuoteResult},
    types::{Asset, TradeIntent, VenueQuote},
    venues::{QuoteSource, contracts::IUniswapV2Router02, eth_call, raw_amount_in, venue_quote},
    ConcreteProvider,
};

pub struct SushiSwapQuoter {
    name: String,
    provider: Arc<ConcreteProvider>,
    router: Address,
    base: Asset,
    quote: Asset,
    fee_rate: Decimal,
}

impl SushiSwapQuoter {
    pub fn new(
        name: String,
        provider: Arc<ConcreteProvider>,
        router: Address,
        intent: &TradeIntent,
        fee_rate: Decimal,
    ) -> Self {
        Self {
            name,
            provider,
            router,
            base: intent.base.clone(),
            quote: intent.quote.clone(),
            fee_rate,
        }
    }
}

impl QuoteSource for SushiSwapQuoter {
    fn name(&self) -> &str {
        &self.name
    }

    fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    async fn quote(&self, amount_in: Decimal) -> QuoteResult<VenueQuote> {
        let raw_in = raw_amount_in(amount_in, &self.base)?;
        let path = vec![self.base.address, self.quote.address];
        let hops = path.len();

        let call = IUniswapV2Router02::getAmountsOutCall {
            amountIn: raw_in,
            path,
        };
        let amounts = eth_call(&self.provider, self.router, &call).await?.amounts;
        debug!("{} amounts out: {:?}", self.name, amounts);

        // One amount per path token; the last is what the final hop pays out
        let raw_out = *amounts.get(hops - 1).ok_or(QuoteError::EmptyPath)?;

        venue_quote(&self.name, raw_out, &self.quote, self.fee_rate, amount_in)
    }
}
