//! Common utility functions for the salary-after-tax pipeline.
//!
//! Every line item in a breakdown passes through [`round_whole`], and every
//! subtraction and product is guarded so that nothing negative or
//! overflowing can reach a later step.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to the nearest whole currency unit.
///
/// Midpoints round away from zero. All amounts in the pipeline are
/// non-negative by the time they are rounded, so this behaves as
/// round-half-up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use skat_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(79657.49)), dec!(79657));
/// assert_eq!(round_whole(dec!(79657.5)), dec!(79658));
/// assert_eq!(round_whole(dec!(0.4)), dec!(0));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use skat_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100), dec!(200)), dec!(200));
/// assert_eq!(max(dec!(-100), dec!(-200)), dec!(-100));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps a value to zero when it is negative.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// `a - b`, floored at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use skat_core::calculations::common::saturating_sub;
///
/// assert_eq!(saturating_sub(dec!(100), dec!(30)), dec!(70));
/// assert_eq!(saturating_sub(dec!(30), dec!(100)), dec!(0));
/// ```
pub fn saturating_sub(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    a.checked_sub(b).map(non_negative).unwrap_or(Decimal::ZERO)
}

/// `a * b`, floored at zero.
///
/// An overflowing product has no finite value; it is treated the same way
/// as a non-finite input and collapses to zero.
pub fn guarded_mul(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    a.checked_mul(b).map(non_negative).unwrap_or(Decimal::ZERO)
}

/// `a / b`, or zero when `b` is zero or the quotient is not representable.
pub fn guarded_div(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if b.is_zero() {
        return Decimal::ZERO;
    }
    a.checked_div(b).map(non_negative).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_whole tests
    // =========================================================================

    #[test]
    fn round_whole_rounds_down_below_midpoint() {
        let result = round_whole(dec!(123.49));

        assert_eq!(result, dec!(123));
    }

    #[test]
    fn round_whole_rounds_up_at_midpoint() {
        let result = round_whole(dec!(123.5));

        assert_eq!(result, dec!(124));
    }

    #[test]
    fn round_whole_rounds_up_above_midpoint() {
        let result = round_whole(dec!(123.51));

        assert_eq!(result, dec!(124));
    }

    #[test]
    fn round_whole_preserves_whole_values() {
        let result = round_whole(dec!(48000));

        assert_eq!(result, dec!(48000));
    }

    #[test]
    fn round_whole_handles_zero() {
        let result = round_whole(dec!(0.00));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn round_whole_handles_large_values() {
        let result = round_whole(dec!(999999999.5));

        assert_eq!(result, dec!(1000000000));
    }

    // =========================================================================
    // max / non_negative tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100), dec!(200)), dec!(200));
        assert_eq!(max(dec!(200), dec!(100)), dec!(200));
    }

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(150), dec!(150)), dec!(150));
    }

    #[test]
    fn non_negative_clamps_negative_values() {
        assert_eq!(non_negative(dec!(-0.01)), dec!(0));
        assert_eq!(non_negative(dec!(12.5)), dec!(12.5));
    }

    // =========================================================================
    // guarded arithmetic tests
    // =========================================================================

    #[test]
    fn saturating_sub_floors_at_zero() {
        assert_eq!(saturating_sub(dec!(89000), dec!(7120)), dec!(81880));
        assert_eq!(saturating_sub(dec!(1000), dec!(1188)), dec!(0));
    }

    #[test]
    fn saturating_sub_survives_overflow() {
        assert_eq!(saturating_sub(Decimal::MIN, Decimal::MAX), dec!(0));
    }

    #[test]
    fn guarded_mul_multiplies() {
        assert_eq!(guarded_mul(dec!(89000), dec!(0.08)), dec!(7120.00));
    }

    #[test]
    fn guarded_mul_collapses_overflow_to_zero() {
        assert_eq!(guarded_mul(Decimal::MAX, dec!(12)), dec!(0));
    }

    #[test]
    fn guarded_mul_clamps_negative_products() {
        assert_eq!(guarded_mul(dec!(-100), dec!(0.5)), dec!(0));
    }

    #[test]
    fn guarded_div_returns_zero_for_zero_divisor() {
        assert_eq!(guarded_div(dec!(100), dec!(0)), dec!(0));
    }

    #[test]
    fn guarded_div_divides() {
        assert_eq!(guarded_div(dec!(7120), dec!(89000)), dec!(0.08));
    }
}
