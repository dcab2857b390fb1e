//! Retry with exponential backoff, used for startup connectivity only.
//! Quote calls are never retried within a cycle.

use std::time::Duration;
use anyhow::Result;
use tracing::warn;
use crate::errors::{BotError, BotResult};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub exponential_base: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
            exponential_base: 2.0,
        }
    }
}

impl RetryConfig {
    /// Delay before the attempt following `delay_ms`, capped and jittered by ±5%.
    fn next_delay(&self, delay_ms: u64) -> u64 {
        let grown = ((delay_ms as f64 * self.exponential_base) as u64).min(self.max_delay_ms);
        let jitter = grown as f64 * 0.1 * (rand::random::<f64>() - 0.5);
        (grown as f64 + jitter).max(0.0) as u64
    }
}

pub async fn retry_with_backoff<F, Fut, T>(
    operation: F,
    config: &RetryConfig,
    context: &str,
) -> BotResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay_ms;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt >= config.max_attempts => {
                return Err(BotError::Network {
                    message: format!("{} failed after {} attempts", context, attempt),
                    source: Some(e),
                    retry_count: attempt,
                });
            }
            Err(e) => {
                warn!(
                    "Attempt {}/{} failed for {}: {}. Retrying in {}ms...",
                    attempt, config.max_attempts, context, e, delay
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay = config.next_delay(delay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 1,
            max_delay_ms: 4,
            exponential_base: 2.0,
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(anyhow::anyhow!("connection refused"))
                } else {
                    Ok(42u64)
                }
            },
            &fast(),
            "block number",
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_with_network_error() {
        let result: BotResult<()> = retry_with_backoff(
            || async { Err(anyhow::anyhow!("timeout")) },
            &fast(),
            "block number",
        )
        .await;

        match result {
            Err(BotError::Network { retry_count, .. }) => assert_eq!(retry_count, 3),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn delay_growth_is_capped() {
        let config = fast();
        for _ in 0..20 {
            assert!(config.next_delay(4) <= 4);
        }
    }
}
