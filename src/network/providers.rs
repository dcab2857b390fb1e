//! Network provider setup and startup checks

use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use crate::{
    config::Config,
    errors::{BotError, BotResult},
    network::retry::{retry_with_backoff, RetryConfig},
    types::{Asset, POLYGON_CHAIN_ID},
    venues::{contracts::IERC20, eth_call},
    ConcreteProvider,
};

pub async fn setup_provider(config: &Config) -> Result<Arc<ConcreteProvider>> {
    let provider: Arc<ConcreteProvider> = Arc::new(
        ProviderBuilder::new()
            .on_http(config.rpc_url.parse().context("RPC_URL is not a valid URL")?)
            .boxed()
    );

    info!("🔗 Testing connection to RPC endpoint...");
    let block = retry_with_backoff(
        || async {
            provider.get_block_number().await
                .context("Failed to get block number")
        },
        &RetryConfig::default(),
        "RPC endpoint connection",
    ).await
    .map_err(|e| {
        warn!("⚠️ Network connection attempt failed: {}", e);
        anyhow::anyhow!("Network connection failed: {}", e)
    })?;

    match provider.get_chain_id().await {
        Ok(chain_id) if chain_id != POLYGON_CHAIN_ID => {
            warn!("⚠️ Endpoint reports chain id {}, default addresses are for Polygon ({})",
                chain_id, POLYGON_CHAIN_ID);
        }
        Ok(_) => {}
        Err(e) => warn!("⚠️ Could not read chain id: {}", e),
    }

    info!("✅ Connected at block {}", block);
    Ok(provider)
}

/// Check the configured precision against the token's own `decimals()`.
pub async fn verify_asset_decimals(provider: &ConcreteProvider, asset: &Asset) -> BotResult<()> {
    let on_chain = eth_call(provider, asset.address, &IERC20::decimalsCall {})
        .await
        .map_err(|e| BotError::Network {
            message: format!("decimals() lookup for {} failed", asset.symbol),
            source: Some(e.into()),
            retry_count: 0,
        })?
        ._0;

    if on_chain != asset.decimals {
        return Err(BotError::config(
            asset.symbol.clone(),
            format!("configured {} decimals but token reports {}", asset.decimals, on_chain),
        ));
    }
    info!("✅ {} decimals verified: {}", asset.symbol, on_chain);
    Ok(())
}
