//! Fee and slippage adjustment

use rust_decimal::Decimal;
use crate::types::{AdjustedQuote, VenueQuote};

/// Conservative received amount: `amount × (1 − fee_rate) × (1 − slippage)`.
///
/// Rates are validated at startup to lie in `[0, 1)`, so the result never
/// exceeds `amount` and is never negative for a non-negative input.
pub fn adjust(amount: Decimal, fee_rate: Decimal, slippage_tolerance: Decimal) -> Decimal {
    let after_fees = amount * (Decimal::ONE - fee_rate);
    after_fees * (Decimal::ONE - slippage_tolerance)
}

pub fn adjust_quote(quote: VenueQuote, slippage_tolerance: Decimal) -> AdjustedQuote {
    let adjusted_amount = adjust(quote.amount_out, quote.fee_rate, slippage_tolerance);
    AdjustedQuote {
        quote,
        adjusted_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn uniswap_leg_of_reference_scenario() {
        assert_eq!(adjust(dec!(0.02), dec!(0.0005), dec!(0.005)), dec!(0.01989005));
    }

    #[test]
    fn sushiswap_leg_of_reference_scenario() {
        assert_eq!(adjust(dec!(0.0199), dec!(0.003), dec!(0.005)), dec!(0.0197410985));
    }

    #[test]
    fn adjust_quote_keeps_raw_quote() {
        let quote = VenueQuote {
            venue: "SushiSwap".to_string(),
            raw_amount_out: U256::from(1_000u64),
            amount_out: dec!(1),
            fee_rate: dec!(0.003),
        };
        let adjusted = adjust_quote(quote, dec!(0.01));
        assert_eq!(adjusted.quote.amount_out, dec!(1));
        assert_eq!(adjusted.adjusted_amount, dec!(0.98703));
    }

    proptest! {
        #[test]
        fn never_exceeds_input(
            raw in 0i64..1_000_000_000_000,
            fee in 0i64..10_000,
            slippage in 0i64..10_000,
        ) {
            let amount = Decimal::new(raw, 8);
            let adjusted = adjust(amount, Decimal::new(fee, 4), Decimal::new(slippage, 4));
            prop_assert!(adjusted <= amount);
            prop_assert!(adjusted >= Decimal::ZERO);
        }

        #[test]
        fn zero_fee_and_slippage_is_identity(raw in 0i64..1_000_000_000_000) {
            let amount = Decimal::new(raw, 8);
            prop_assert_eq!(adjust(amount, Decimal::ZERO, Decimal::ZERO), amount);
        }
    }
}
