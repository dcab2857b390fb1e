//! DEX Arbitrage Scanner - Main Entry Point
//!
//! Drives the scan cycle on a fixed interval until Ctrl+C.

use dex_arb_scanner::*;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};
use dex_arb_scanner::{
    arbitrage::Scanner,
    venues::{QuoteSource, VenueQuoter},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {}", e);
            return Err(e.into());
        }
    };

    info!("🔎 DEX Arbitrage Scanner v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Pair: {} -> {}", config.base, config.quote);
    info!("   Trade Amount: {} {}", config.trade_amount, config.base.symbol);
    info!("   Venue A: {} (fee {})", config.venue_a.kind, config.venue_a.fee_rate);
    info!("   Venue B: {} (fee {})", config.venue_b.kind, config.venue_b.fee_rate);
    info!("   Slippage Tolerance: {}", config.slippage_tolerance);
    info!("   PnL Threshold: {} {}", config.pnl_threshold, config.quote.symbol);
    info!("   Scan Interval: {}ms", config.scan_interval_ms);
    info!("   Signer configured: {}", config.has_signer());

    // Setup network provider
    let provider = network::setup_provider(&config).await?;

    if config.verify_token_decimals {
        network::verify_asset_decimals(&provider, &config.base).await?;
        network::verify_asset_decimals(&provider, &config.quote).await?;
    }

    let intent = config.trade_intent();
    let scanner = Scanner::new(
        VenueQuoter::from_config(&config.venue_a, Arc::clone(&provider), &intent)?,
        VenueQuoter::from_config(&config.venue_b, Arc::clone(&provider), &intent)?,
        &config,
    );

    // Setup shutdown handler
    let mut shutdown_rx = utils::spawn_shutdown_listener(tokio::signal::ctrl_c());

    info!("🚀 Starting scan loop...");

    let start_time = Instant::now();
    let mut state = MonitoringState::new();
    let mut interval = time::interval(Duration::from_millis(config.scan_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Cycles never overlap: the next tick is only awaited once the current
    // cycle has finished, and shutdown is only observed between cycles.
    loop {
        tokio::select! {
            _ = interval.tick() => {
                info!("Scanning for arbitrage opportunities...");
                let report = scanner.run_cycle().await;
                utils::print_scan_report(&report, config.output_format);
                state.record(&report);
                if state.cycles % 100 == 0 {
                    state.print(start_time, &scanner);
                }
            }
            _ = &mut shutdown_rx => {
                info!("Shutdown signal received, exiting scan loop...");
                break;
            }
        }
    }

    info!("🛑 Shutting down gracefully...");
    state.print(start_time, &scanner);

    Ok(())
}

/// Session counters, reported periodically and on shutdown
struct MonitoringState {
    cycles: u64,
    complete_cycles: u64,
    opportunities: u64,
    best_net_pnl: Option<Decimal>,
    venue_failures: HashMap<String, u32>,
}

impl MonitoringState {
    fn new() -> Self {
        Self {
            cycles: 0,
            complete_cycles: 0,
            opportunities: 0,
            best_net_pnl: None,
            venue_failures: HashMap::new(),
        }
    }

    fn record(&mut self, report: &ScanReport) {
        self.cycles += 1;
        if report.result.is_complete() {
            self.complete_cycles += 1;
        }
        if report.result.has_opportunity() {
            self.opportunities += 1;
            self.best_net_pnl = self.best_net_pnl.max(report.result.net_pnl);
        }
        for leg in [&report.venue_a, &report.venue_b] {
            if leg.error.is_some() {
                *self.venue_failures.entry(leg.venue.clone()).or_insert(0) += 1;
            }
        }
    }

    fn print<A: QuoteSource, B: QuoteSource>(&self, start_time: Instant, scanner: &Scanner<A, B>) {
        let (venue_a, venue_b) = scanner.venue_names();
        info!("📊 Session statistics ({} vs {}):", venue_a, venue_b);
        info!("   Runtime: {:?}", start_time.elapsed());
        info!("   Cycles: {} ({} complete)", self.cycles, self.complete_cycles);
        info!("   Opportunities: {}", self.opportunities);
        if let Some(best) = self.best_net_pnl {
            info!("   Best net PnL: {:.6} {}", best.round_dp(utils::AMOUNT_DP), scanner.intent().quote.symbol);
        }
        for (venue, count) in &self.venue_failures {
            info!("   {} quote failures: {}", venue, count);
        }
    }
}
