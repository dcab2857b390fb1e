//! Custom error types for the scanner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid configuration: {key} - {reason}")]
    Configuration {
        key: String,
        reason: String,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        retry_count: u32,
    },
}

impl BotError {
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        BotError::Configuration {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

pub type BotResult<T> = Result<T, BotError>;
