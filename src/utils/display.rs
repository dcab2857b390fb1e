//! Per-cycle report rendering

use tracing::{info, warn};
use crate::{
    config::OutputFormat,
    types::{Direction, EffectivePrice, ScanReport, VenueLeg},
};

// Decimal's `{:.N}` truncates, so values are rounded before formatting
pub const AMOUNT_DP: u32 = 6;
pub const PERCENT_DP: u32 = 2;

pub fn describe_direction(direction: Direction, venue_a: &str, venue_b: &str) -> String {
    match direction {
        Direction::NoOpportunity => "No significant arbitrage opportunity".to_string(),
        Direction::BuyASellB => format!("Buy on {}, sell on {}", venue_a, venue_b),
        Direction::BuyBSellA => format!("Buy on {}, sell on {}", venue_b, venue_a),
    }
}

fn price_line(leg: &VenueLeg, price: Option<EffectivePrice>, report: &ScanReport) -> String {
    match (price, &leg.error) {
        (Some(p), _) => format!(
            "   {}: {:.6} {} per {}",
            leg.venue, p.price.round_dp(AMOUNT_DP), report.intent.quote.symbol, report.intent.base.symbol
        ),
        (None, Some(error)) => format!("   {}: N/A ({})", leg.venue, error),
        (None, None) => format!("   {}: N/A", leg.venue),
    }
}

/// Human-readable lines for one cycle.
pub fn render_report(report: &ScanReport) -> Vec<String> {
    let intent = &report.intent;
    let result = &report.result;
    let quote = &intent.quote.symbol;
    let mut lines = vec![
        format!("--- Effective price for {} {} to {} ---", intent.amount_in, intent.base.symbol, quote),
        price_line(&report.venue_a, result.price_a, report),
        price_line(&report.venue_b, result.price_b, report),
    ];

    let (Some(direction), Some(gross), Some(net)) = (result.direction, result.gross_pnl, result.net_pnl) else {
        lines.push("   Percent divergence: N/A".to_string());
        lines.push("Unable to compute PnL due to missing quote data".to_string());
        return lines;
    };

    if let Some(divergence) = result.divergence_pct {
        lines.push(format!("   Percent divergence: {:.2}%", divergence.round_dp(PERCENT_DP)));
    }

    if direction == Direction::NoOpportunity {
        lines.push(format!(
            "No significant arbitrage opportunity (best PnL {:.6} {}, threshold {} {})",
            gross.round_dp(AMOUNT_DP), quote, report.threshold, quote
        ));
        return lines;
    }

    lines.push(format!(
        "🎯 Arbitrage opportunity: {}",
        describe_direction(direction, &report.venue_a.venue, &report.venue_b.venue)
    ));
    lines.push(format!("   Gross PnL for {} {}: {:.6} {}", intent.amount_in, intent.base.symbol, gross.round_dp(AMOUNT_DP), quote));
    lines.push(format!("   Net PnL (after fees and slippage): {:.6} {}", net.round_dp(AMOUNT_DP), quote));
    if let Some(pnl_pct) = result.pnl_pct {
        lines.push(format!("   PnL vs average received amount: {:.2}%", pnl_pct.round_dp(PERCENT_DP)));
    }
    for leg in [&report.venue_a, &report.venue_b] {
        if let Some(adjusted) = leg.adjusted_amount {
            lines.push(format!(
                "   {}: received {:.6} {} for {} {}",
                leg.venue, adjusted.round_dp(AMOUNT_DP), quote, intent.amount_in, intent.base.symbol
            ));
        }
    }
    lines
}

pub fn print_scan_report(report: &ScanReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string(report) {
            Ok(json) => info!(target: "report", "{}", json),
            Err(e) => warn!("Failed to serialize scan report {}: {}", report.id, e),
        },
        OutputFormat::Text => {
            let opportunity = report.result.has_opportunity();
            for line in render_report(report) {
                if opportunity {
                    warn!("{}", line);
                } else {
                    info!("{}", line);
                }
            }
        }
    }
}
