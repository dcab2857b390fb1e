//! Core data types and structures

pub mod addresses;
pub mod assets;
pub mod quotes;
pub mod arbitrage;

pub use addresses::*;
pub use assets::*;
pub use quotes::*;
pub use arbitrage::*;
