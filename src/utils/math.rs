//! Mathematical utility functions

use alloy::primitives::U256;
use anyhow::{Context, Result};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::str::FromStr;

pub fn pow10(n: i32) -> Decimal {
    match n {
        0 => dec!(1),
        6 => dec!(1_000_000),
        8 => dec!(100_000_000),
        18 => dec!(1_000_000_000_000_000_000),
        _ => {
            let mut result = dec!(1);
            if n > 0 {
                for _ in 0..n {
                    result *= dec!(10);
                }
            } else {
                for _ in 0..(-n) {
                    result /= dec!(10);
                }
            }
            result
        }
    }
}

/// Decimal token amount to its smallest integer unit. Digits beyond the
/// token's precision are truncated.
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<U256> {
    if amount.is_sign_negative() {
        return Err(anyhow::anyhow!("Negative token amount: {}", amount));
    }
    let scaled = amount
        .checked_mul(pow10(decimals as i32))
        .ok_or_else(|| anyhow::anyhow!("Amount {} overflows at {} decimals", amount, decimals))?
        .trunc();
    U256::from_str(&scaled.normalize().to_string())
        .context("Failed to convert scaled amount to U256")
}

/// Smallest integer unit back to a decimal token amount.
pub fn from_base_units(raw: U256, decimals: u8) -> Result<Decimal> {
    let raw = Decimal::from_str(&raw.to_string())
        .context("Raw amount does not fit a decimal")?;
    Ok(raw / pow10(decimals as i32))
}
