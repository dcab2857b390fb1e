//! Quote adjustment, arbitrage evaluation and the scan cycle

pub mod fees;
pub mod calculator;
pub mod scanner;

pub use fees::*;
pub use calculator::*;
pub use scanner::*;
