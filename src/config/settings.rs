//! Scanner configuration settings and environment variable handling

use alloy::primitives::Address;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use crate::{
    errors::{BotError, BotResult},
    types::{Asset, TradeIntent, WBTC_DECIMALS, WBTC_POLYGON, WETH_DECIMALS, WETH_POLYGON},
    venues::MAX_FEE_TIER,
};

// Configuration defaults
pub const DEFAULT_TRADE_AMOUNT: Decimal = dec!(0.00032);
pub const DEFAULT_SLIPPAGE_TOLERANCE: Decimal = dec!(0.005);
pub const DEFAULT_PNL_THRESHOLD: Decimal = dec!(0.0001);
pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 3000;
pub const SUSHISWAP_FEE_RATE: Decimal = dec!(0.003);

// Uniswap V3 fee tiers are expressed in hundredths of a basis point
const FEE_TIER_DENOMINATOR: Decimal = dec!(1_000_000);

/// Which pricing mechanism a venue uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueKind {
    /// Single pool quote through the Uniswap V3 quoter.
    UniswapV3 { fee_tier: u32 },
    /// Router `getAmountsOut` over a fixed two-token path.
    SushiSwap,
}

impl VenueKind {
    pub fn default_fee_rate(&self) -> Decimal {
        match self {
            VenueKind::UniswapV3 { fee_tier } => Decimal::from(*fee_tier) / FEE_TIER_DENOMINATOR,
            VenueKind::SushiSwap => SUSHISWAP_FEE_RATE,
        }
    }
}

impl fmt::Display for VenueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueKind::UniswapV3 { fee_tier } => write!(f, "Uniswap V3 ({} tier)", fee_tier),
            VenueKind::SushiSwap => write!(f, "SushiSwap"),
        }
    }
}

impl FromStr for VenueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "sushiswap" {
            return Ok(VenueKind::SushiSwap);
        }
        match s.split_once(':') {
            Some(("uniswap-v3", tier)) => tier
                .parse::<u32>()
                .ok()
                .filter(|t| *t > 0 && *t < MAX_FEE_TIER)
                .map(|fee_tier| VenueKind::UniswapV3 { fee_tier })
                .ok_or_else(|| format!("invalid fee tier '{}'", tier)),
            _ => Err(format!("unknown venue '{}', expected 'uniswap-v3:<tier>' or 'sushiswap'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueConfig {
    pub kind: VenueKind,
    pub fee_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Process-wide settings, built once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: Option<String>,
    pub base: Asset,
    pub quote: Asset,
    pub trade_amount: Decimal,
    pub slippage_tolerance: Decimal,
    pub venue_a: VenueConfig,
    pub venue_b: VenueConfig,
    pub pnl_threshold: Decimal,
    pub scan_interval_ms: u64,
    pub verify_token_decimals: bool,
    pub output_format: OutputFormat,
}

// Secrets stay out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &"<redacted>")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("base", &self.base)
            .field("quote", &self.quote)
            .field("trade_amount", &self.trade_amount)
            .field("slippage_tolerance", &self.slippage_tolerance)
            .field("venue_a", &self.venue_a)
            .field("venue_b", &self.venue_b)
            .field("pnl_threshold", &self.pnl_threshold)
            .field("scan_interval_ms", &self.scan_interval_ms)
            .field("verify_token_decimals", &self.verify_token_decimals)
            .field("output_format", &self.output_format)
            .finish()
    }
}

impl Config {
    /// Load from the process environment (after `dotenv`).
    pub fn load() -> BotResult<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let rpc_url = match (get("RPC_URL"), get("ALCHEMY_API_KEY")) {
            (Some(url), _) => url,
            (None, Some(key)) => format!("https://polygon-mainnet.g.alchemy.com/v2/{}", key),
            (None, None) => {
                return Err(BotError::config("RPC_URL", "either RPC_URL or ALCHEMY_API_KEY is required"));
            }
        };

        let base = match get("BASE_TOKEN") {
            Some(spec) => parse_asset("BASE_TOKEN", &spec)?,
            None => Asset::new("WBTC", WBTC_POLYGON, WBTC_DECIMALS),
        };
        let quote = match get("QUOTE_TOKEN") {
            Some(spec) => parse_asset("QUOTE_TOKEN", &spec)?,
            None => Asset::new("WETH", WETH_POLYGON, WETH_DECIMALS),
        };

        let venue_a = parse_venue(&get, "VENUE_A", VenueKind::UniswapV3 { fee_tier: 500 })?;
        let venue_b = parse_venue(&get, "VENUE_B", VenueKind::SushiSwap)?;

        let output_format = match get("OUTPUT_FORMAT").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                return Err(BotError::config("OUTPUT_FORMAT", format!("expected 'text' or 'json', got '{}'", other)));
            }
        };

        let config = Self {
            rpc_url,
            private_key: get("PRIVATE_KEY"),
            base,
            quote,
            trade_amount: parse_or(&get, "TRADE_AMOUNT", DEFAULT_TRADE_AMOUNT)?,
            slippage_tolerance: parse_or(&get, "SLIPPAGE_TOLERANCE", DEFAULT_SLIPPAGE_TOLERANCE)?,
            venue_a,
            venue_b,
            pnl_threshold: parse_or(&get, "PNL_THRESHOLD", DEFAULT_PNL_THRESHOLD)?,
            scan_interval_ms: parse_or(&get, "SCAN_INTERVAL_MS", DEFAULT_SCAN_INTERVAL_MS)?,
            verify_token_decimals: parse_or(&get, "VERIFY_TOKEN_DECIMALS", true)?,
            output_format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Startup sanity checks. Any failure here is fatal.
    pub fn validate(&self) -> BotResult<()> {
        if self.trade_amount <= Decimal::ZERO {
            return Err(BotError::config("TRADE_AMOUNT", format!("must be positive, got {}", self.trade_amount)));
        }
        if self.trade_amount.normalize().scale() > self.base.decimals as u32 {
            return Err(BotError::config(
                "TRADE_AMOUNT",
                format!("{} has more precision than {} supports ({} decimals)",
                    self.trade_amount, self.base.symbol, self.base.decimals),
            ));
        }
        validate_rate("SLIPPAGE_TOLERANCE", self.slippage_tolerance)?;
        validate_rate("VENUE_A_FEE_RATE", self.venue_a.fee_rate)?;
        validate_rate("VENUE_B_FEE_RATE", self.venue_b.fee_rate)?;
        if self.pnl_threshold < Decimal::ZERO {
            return Err(BotError::config("PNL_THRESHOLD", format!("must not be negative, got {}", self.pnl_threshold)));
        }
        if self.scan_interval_ms == 0 {
            return Err(BotError::config("SCAN_INTERVAL_MS", "must be greater than zero"));
        }
        if self.venue_a.kind == self.venue_b.kind {
            return Err(BotError::config("VENUE_B", format!("both venues are {}", self.venue_a.kind)));
        }
        if self.base.address == self.quote.address {
            return Err(BotError::config("QUOTE_TOKEN", "base and quote tokens must differ"));
        }
        Ok(())
    }

    pub fn trade_intent(&self) -> TradeIntent {
        TradeIntent {
            amount_in: self.trade_amount,
            base: self.base.clone(),
            quote: self.quote.clone(),
        }
    }

    pub fn has_signer(&self) -> bool {
        self.private_key.is_some()
    }
}

fn validate_rate(key: &str, rate: Decimal) -> BotResult<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(BotError::config(key, format!("must be in [0, 1), got {}", rate)));
    }
    Ok(())
}

fn parse_or<T, F>(get: &F, key: &str, default: T) -> BotResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| BotError::config(key, format!("cannot parse '{}': {}", raw, e))),
        None => Ok(default),
    }
}

fn parse_venue<F>(get: &F, key: &str, default: VenueKind) -> BotResult<VenueConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let kind = match get(key) {
        Some(raw) => raw.parse().map_err(|e: String| BotError::config(key, e))?,
        None => default,
    };
    let fee_rate = parse_or(get, &format!("{}_FEE_RATE", key), kind.default_fee_rate())?;
    Ok(VenueConfig { kind, fee_rate })
}

/// `SYMBOL:0xaddress:decimals`
fn parse_asset(key: &str, spec: &str) -> BotResult<Asset> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let [symbol, address, decimals] = parts.as_slice() else {
        return Err(BotError::config(key, format!("expected SYMBOL:address:decimals, got '{}'", spec)));
    };
    let address = Address::from_str(address)
        .map_err(|e| BotError::config(key, format!("invalid address '{}': {}", address, e)))?;
    let decimals: u8 = decimals
        .parse()
        .ok()
        .filter(|d| *d <= 28)
        .ok_or_else(|| BotError::config(key, format!("invalid decimals '{}'", decimals)))?;
    Ok(Asset::new(*symbol, address, decimals))
}
