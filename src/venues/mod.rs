//! Venue quote sources
//!
//! Both venues answer the same question, "how much quote asset for this much
//! base asset", through different on-chain mechanisms. [`QuoteSource`] is the
//! seam the scanner depends on; [`VenueQuoter`] is the closed set of
//! implementations selected from configuration.

pub mod contracts;
pub mod uniswap_v3;
pub mod sushiswap;

pub use uniswap_v3::*;
pub use sushiswap::*;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol_types::SolCall,
};
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::Arc;
use crate::{
    config::{VenueConfig, VenueKind},
    errors::{QuoteError, QuoteResult},
    types::{Asset, TradeIntent, VenueQuote, SUSHISWAP_ROUTER, UNISWAP_V3_FACTORY, UNISWAP_V3_QUOTER},
    utils::{from_base_units, to_base_units},
    ConcreteProvider,
};

pub trait QuoteSource: Send + Sync {
    /// Human-readable venue label used in reports.
    fn name(&self) -> &str;

    fn fee_rate(&self) -> Decimal;

    /// Quote `amount_in` of the base asset. Performs no retries.
    fn quote(&self, amount_in: Decimal) -> impl Future<Output = QuoteResult<VenueQuote>> + Send;
}

pub enum VenueQuoter {
    UniswapV3(UniswapV3Quoter),
    SushiSwap(SushiSwapQuoter),
}

impl VenueQuoter {
    pub fn from_config(
        venue: &VenueConfig,
        provider: Arc<ConcreteProvider>,
        intent: &TradeIntent,
    ) -> QuoteResult<Self> {
        let quoter = match venue.kind {
            VenueKind::UniswapV3 { fee_tier } => VenueQuoter::UniswapV3(UniswapV3Quoter::new(
                venue.kind.to_string(),
                provider,
                UNISWAP_V3_FACTORY,
                UNISWAP_V3_QUOTER,
                intent,
                fee_tier,
                venue.fee_rate,
            )?),
            VenueKind::SushiSwap => VenueQuoter::SushiSwap(SushiSwapQuoter::new(
                venue.kind.to_string(),
                provider,
                SUSHISWAP_ROUTER,
                intent,
                venue.fee_rate,
            )),
        };
        Ok(quoter)
    }
}

impl QuoteSource for VenueQuoter {
    fn name(&self) -> &str {
        match self {
            VenueQuoter::UniswapV3(q) => q.name(),
            VenueQuoter::SushiSwap(q) => q.name(),
        }
    }

    fn fee_rate(&self) -> Decimal {
        match self {
            VenueQuoter::UniswapV3(q) => q.fee_rate(),
            VenueQuoter::SushiSwap(q) => q.fee_rate(),
        }
    }

    async fn quote(&self, amount_in: Decimal) -> QuoteResult<VenueQuote> {
        match self {
            VenueQuoter::UniswapV3(q) => q.quote(amount_in).await,
            VenueQuoter::SushiSwap(q) => q.quote(amount_in).await,
        }
    }
}

/// Encode `call`, run it as an `eth_call` against `to` and decode the return data.
pub(crate) async fn eth_call<C: SolCall>(
    provider: &ConcreteProvider,
    to: Address,
    call: &C,
) -> QuoteResult<C::Return> {
    let tx = TransactionRequest::default()
        .to(to)
        .input(call.abi_encode().into());

    let output = provider.call(&tx).await.map_err(|e| QuoteError::Transport {
        contract: to,
        message: format!("{} failed", C::SIGNATURE),
        source: e.into(),
    })?;

    C::abi_decode_returns(&output, true).map_err(|e| QuoteError::Decode {
        context: format!("{} return data", C::SIGNATURE),
        source: e.into(),
    })
}

/// Convert the cycle's input amount to the base asset's smallest unit.
pub(crate) fn raw_amount_in(amount_in: Decimal, base: &Asset) -> QuoteResult<U256> {
    if amount_in <= Decimal::ZERO {
        return Err(QuoteError::InvalidAmount(amount_in));
    }
    match to_base_units(amount_in, base.decimals) {
        Ok(raw) if !raw.is_zero() => Ok(raw),
        _ => Err(QuoteError::InvalidAmount(amount_in)),
    }
}

/// Build a [`VenueQuote`] from a raw output amount. Zero output is a failure,
/// never a zero price.
pub(crate) fn venue_quote(
    venue: &str,
    raw_amount_out: U256,
    quote: &Asset,
    fee_rate: Decimal,
    amount_in: Decimal,
) -> QuoteResult<VenueQuote> {
    if raw_amount_out.is_zero() {
        return Err(QuoteError::ZeroOutput(amount_in));
    }
    let amount_out = from_base_units(raw_amount_out, quote.decimals).map_err(|e| QuoteError::Decode {
        context: format!("{} output amount {}", venue, raw_amount_out),
        source: e,
    })?;
    Ok(VenueQuote {
        venue: venue.to_string(),
        raw_amount_out,
        amount_out,
        fee_rate,
    })
}

/// Minimal JSON-RPC endpoint answering `eth_call` by function selector.
#[cfg(test)]
pub(crate) mod test_rpc {
    use alloy::providers::ProviderBuilder;
    use std::sync::Arc;
    use crate::ConcreteProvider;

    /// `responses` maps a 4-byte selector to the hex return data. Unknown
    /// selectors answer with an execution-reverted error.
    pub async fn serve(
        responses: Vec<([u8; 4], Vec<u8>)>,
    ) -> (mockito::ServerGuard, mockito::Mock, Arc<ConcreteProvider>) {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |request| {
                let body: serde_json::Value = request
                    .body()
                    .ok()
                    .and_then(|b| serde_json::from_slice(b).ok())
                    .unwrap_or_default();
                let id = body["id"].clone();
                let params = &body["params"][0];
                let input = params["input"]
                    .as_str()
                    .or_else(|| params["data"].as_str())
                    .unwrap_or_default()
                    .trim_start_matches("0x")
                    .to_lowercase();

                let reply = responses
                    .iter()
                    .find(|(selector, _)| input.starts_with(&alloy::hex::encode(selector)))
                    .map(|(_, data)| serde_json::json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "result": format!("0x{}", alloy::hex::encode(data)),
                    }))
                    .unwrap_or_else(|| serde_json::json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": { "code": -32000, "message": "execution reverted" },
                    }));
                reply.to_string().into_bytes()
            })
            .create_async()
            .await;

        let provider: Arc<ConcreteProvider> = Arc::new(
            ProviderBuilder::new()
                .on_http(server.url().parse().expect("mock server url"))
                .boxed(),
        );
        (server, mock, provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use rust_decimal_macros::dec;

    fn wbtc() -> Asset {
        Asset::new("WBTC", address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6"), 8)
    }

    fn weth() -> Asset {
        Asset::new("WETH", address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619"), 18)
    }

    #[test]
    fn rejects_non_positive_input() {
        assert!(matches!(raw_amount_in(dec!(0), &wbtc()), Err(QuoteError::InvalidAmount(_))));
        assert!(matches!(raw_amount_in(dec!(-1), &wbtc()), Err(QuoteError::InvalidAmount(_))));
    }

    #[test]
    fn rejects_input_below_token_precision() {
        assert!(matches!(
            raw_amount_in(dec!(0.000000001), &wbtc()),
            Err(QuoteError::InvalidAmount(_))
        ));
    }

    #[test]
    fn zero_output_is_an_error() {
        let err = venue_quote("SushiSwap", U256::ZERO, &weth(), dec!(0.003), dec!(0.00032)).unwrap_err();
        assert!(matches!(err, QuoteError::ZeroOutput(_)));
    }

    #[test]
    fn decodes_output_with_quote_precision() {
        let raw = U256::from(20_000_000_000_000_000u64);
        let quote = venue_quote("Uniswap V3", raw, &weth(), dec!(0.0005), dec!(0.00032)).unwrap();
        assert_eq!(quote.amount_out, dec!(0.02));
        assert_eq!(quote.raw_amount_out, raw);
        assert_eq!(quote.fee_rate, dec!(0.0005));
    }
}
