//! Shared helpers for the credit, incentive and savings calculations.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Floor area below which only three credits are required.
pub const SMALL_HOME_MAX_AREA: f64 = 1500.0;

/// Floor area at and above which seven credits are required.
pub const LARGE_HOME_MIN_AREA: f64 = 5000.0;

/// Rounds a dollar amount to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use wcc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2400.004)), dec!(2400.00));
/// assert_eq!(round_half_up(dec!(2400.005)), dec!(2400.01));
/// assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a float to `places` decimal places, half away from zero.
///
/// Goes through [`Decimal`] so that values such as `141.295` round the way
/// they read rather than the way they are stored. Non-finite values are
/// returned unchanged.
pub fn round_to(
    value: f64,
    places: u32,
) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Number of code credits a home of the given conditioned floor area must
/// reach.
///
/// | Conditioned floor area | Credits |
/// |------------------------|---------|
/// | under 1,500 sq ft      | 3 |
/// | 1,500 to 4,999 sq ft   | 6 |
/// | 5,000 sq ft and up     | 7 |
///
/// ```
/// use wcc_core::calculations::common::required_credits_to_meet_code;
///
/// assert_eq!(required_credits_to_meet_code(1499.0), 3);
/// assert_eq!(required_credits_to_meet_code(1500.0), 6);
/// assert_eq!(required_credits_to_meet_code(5000.0), 7);
/// ```
pub fn required_credits_to_meet_code(conditioned_floor_area: f64) -> u8 {
    if conditioned_floor_area < SMALL_HOME_MAX_AREA {
        3
    } else if conditioned_floor_area < LARGE_HOME_MIN_AREA {
        6
    } else {
        7
    }
}
