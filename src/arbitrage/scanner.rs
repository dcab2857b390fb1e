//! One scan cycle: quote both venues concurrently, adjust, evaluate

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use crate::{
    arbitrage::{adjust_quote, evaluate},
    config::Config,
    errors::QuoteResult,
    types::{ScanReport, TradeIntent, VenueLeg, VenueQuote, VenueSide},
    venues::QuoteSource,
};

pub struct Scanner<A, B> {
    venue_a: A,
    venue_b: B,
    intent: TradeIntent,
    slippage_tolerance: Decimal,
    threshold: Decimal,
}

impl<A: QuoteSource, B: QuoteSource> Scanner<A, B> {
    pub fn new(venue_a: A, venue_b: B, config: &Config) -> Self {
        Self {
            venue_a,
            venue_b,
            intent: config.trade_intent(),
            slippage_tolerance: config.slippage_tolerance,
            threshold: config.pnl_threshold,
        }
    }

    pub fn intent(&self) -> &TradeIntent {
        &self.intent
    }

    pub fn venue_names(&self) -> (&str, &str) {
        (self.venue_a.name(), self.venue_b.name())
    }

    /// Run one cycle to completion. Venue failures degrade that venue to
    /// "absent" in the report; nothing escapes the cycle.
    pub async fn run_cycle(&self) -> ScanReport {
        let amount_in = self.intent.amount_in;
        let (quote_a, quote_b) = tokio::join!(
            self.venue_a.quote(amount_in),
            self.venue_b.quote(amount_in),
        );

        let venue_a = self.settle(VenueSide::A, &self.venue_a, quote_a);
        let venue_b = self.settle(VenueSide::B, &self.venue_b, quote_b);

        let result = evaluate(
            venue_a.adjusted_amount,
            venue_b.adjusted_amount,
            amount_in,
            self.threshold,
        );

        ScanReport {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            intent: self.intent.clone(),
            slippage_tolerance: self.slippage_tolerance,
            threshold: self.threshold,
            venue_a,
            venue_b,
            result,
        }
    }

    fn settle<S: QuoteSource>(
        &self,
        side: VenueSide,
        source: &S,
        quote: QuoteResult<VenueQuote>,
    ) -> VenueLeg {
        match quote {
            Ok(quote) => {
                let adjusted = adjust_quote(quote, self.slippage_tolerance);
                debug!(
                    "Venue {} ({}) quoted {} {}, adjusted {}",
                    side, source.name(), adjusted.quote.amount_out,
                    self.intent.quote.symbol, adjusted.adjusted_amount
                );
                VenueLeg {
                    venue: source.name().to_string(),
                    fee_rate: adjusted.quote.fee_rate,
                    amount_out: Some(adjusted.quote.amount_out),
                    adjusted_amount: Some(adjusted.adjusted_amount),
                    error: None,
                }
            }
            Err(e) => {
                warn!(venue = %source.name(), kind = e.kind(), "Venue {} quote unavailable: {}", side, e);
                VenueLeg {
                    venue: source.name().to_string(),
                    fee_rate: source.fee_rate(),
                    amount_out: None,
                    adjusted_amount: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256, address};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use crate::{errors::QuoteError, types::Direction, utils::to_base_units};

    /// Fixed-answer venue for driving cycles without a node.
    struct StubSource {
        name: String,
        fee_rate: Decimal,
        amount_out: Option<Decimal>,
        delay: Duration,
        calls: AtomicU32,
    }

    impl StubSource {
        fn quoting(name: &str, fee_rate: Decimal, amount_out: Decimal) -> Self {
            Self {
                name: name.to_string(),
                fee_rate,
                amount_out: Some(amount_out),
                delay: Duration::ZERO,
                calls: AtomicU32::new(0),
            }
        }

        fn failing(name: &str, fee_rate: Decimal) -> Self {
            Self {
                amount_out: None,
                ..Self::quoting(name, fee_rate, Decimal::ZERO)
            }
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl QuoteSource for StubSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn fee_rate(&self) -> Decimal {
            self.fee_rate
        }

        async fn quote(&self, amount_in: Decimal) -> QuoteResult<VenueQuote> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            let amount_out = self.amount_out.ok_or(QuoteError::PoolNotFound {
                base: Address::ZERO,
                quote: Address::ZERO,
                fee_tier: 500,
            })?;
            assert_eq!(amount_in, dec!(0.00032));
            Ok(VenueQuote {
                venue: self.name.clone(),
                raw_amount_out: to_base_units(amount_out, 18).unwrap_or(U256::ZERO),
                amount_out,
                fee_rate: self.fee_rate,
            })
        }
    }

    fn config() -> Config {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RPC_URL", "http://localhost:8545"),
            ("BASE_TOKEN", "WBTC:0x1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6:8"),
        ]);
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
    }

    #[tokio::test]
    async fn reference_cycle_flags_buy_on_sushiswap() {
        let scanner = Scanner::new(
            StubSource::quoting("Uniswap V3", dec!(0.0005), dec!(0.02)),
            StubSource::quoting("SushiSwap", dec!(0.003), dec!(0.0199)),
            &config(),
        );

        let report = scanner.run_cycle().await;

        assert_eq!(report.venue_a.adjusted_amount, Some(dec!(0.01989005)));
        assert_eq!(report.venue_b.adjusted_amount, Some(dec!(0.0197410985)));
        assert_eq!(report.result.direction, Some(Direction::BuyBSellA));
        assert_eq!(report.result.net_pnl, Some(dec!(0.0001489515)));
        assert_eq!(report.intent.base.address, address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6"));
    }

    #[tokio::test]
    async fn failed_venue_yields_partial_report() {
        let scanner = Scanner::new(
            StubSource::failing("Uniswap V3", dec!(0.0005)),
            StubSource::quoting("SushiSwap", dec!(0.003), dec!(0.0199)),
            &config(),
        );

        let report = scanner.run_cycle().await;

        assert!(report.venue_a.error.as_deref().unwrap().contains("No pool"));
        assert_eq!(report.venue_a.fee_rate, dec!(0.0005));
        assert_eq!(report.venue_b.amount_out, Some(dec!(0.0199)));
        assert_eq!(report.result.direction, None);
        assert_eq!(report.result.gross_pnl, None);
        assert!(report.result.price_b.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn venues_are_quoted_concurrently() {
        let scanner = Scanner::new(
            StubSource::quoting("Uniswap V3", dec!(0.0005), dec!(0.02)).delayed(Duration::from_secs(2)),
            StubSource::quoting("SushiSwap", dec!(0.003), dec!(0.02)).delayed(Duration::from_secs(2)),
            &config(),
        );

        let started = tokio::time::Instant::now();
        let report = scanner.run_cycle().await;

        assert!(started.elapsed() < Duration::from_secs(3));
        assert_eq!(scanner.venue_a.calls.load(Ordering::SeqCst), 1);
        assert_eq!(scanner.venue_b.calls.load(Ordering::SeqCst), 1);
        assert!(report.result.is_complete());
    }

    #[test]
    fn cycles_are_fresh_and_independent() {
        let scanner = Scanner::new(
            StubSource::quoting("Uniswap V3", dec!(0.0005), dec!(0.02)),
            StubSource::quoting("SushiSwap", dec!(0.003), dec!(0.02)),
            &config(),
        );

        let first = tokio_test::block_on(scanner.run_cycle());
        let second = tokio_test::block_on(scanner.run_cycle());

        assert_ne!(first.id, second.id);
        assert_eq!(first.result, second.result);
        assert_eq!(scanner.venue_names(), ("Uniswap V3", "SushiSwap"));
    }
}
