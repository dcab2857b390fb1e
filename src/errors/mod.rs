//! Error types

pub mod bot_error;
pub mod quote_error;

pub use bot_error::*;
pub use quote_error::*;
