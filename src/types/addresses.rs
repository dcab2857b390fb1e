//! Network addresses for the Polygon deployment

use alloy::primitives::{Address, address};

pub const POLYGON_CHAIN_ID: u64 = 137;

// Tokens
pub const WBTC_POLYGON: Address = address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6");
pub const WETH_POLYGON: Address = address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619");
pub const WBTC_DECIMALS: u8 = 8;
pub const WETH_DECIMALS: u8 = 18;

// Uniswap V3
pub const UNISWAP_V3_FACTORY: Address = address!("1F98431c8aD98523631AE4a59f267346ea31F984");
pub const UNISWAP_V3_QUOTER: Address = address!("b27308f9F90D607463bb33eA1BeBb41C27CE5AB6");

// SushiSwap (Uniswap V2 style router)
pub const SUSHISWAP_ROUTER: Address = address!("1b02dA8Cb0d097eB8D57A175b88c7D8b47997506");
