//! Token unit conversion.
//!
//! ## Overview
//!
//! Order amounts are integer base units (wei for an 18-decimal token).
//! These helpers convert human-readable decimal strings to base units and
//! back, so scenarios and fixtures can be written as `"1.5"` instead of
//! `1500000000000000000`.
//!
//! Parsing goes through `rust_decimal` and never rounds: a value with more
//! fractional digits than the token has decimals is rejected.
//!
//! ## Examples
//!
//! ```
//! use exchange_math::types::units::{to_base_units, from_base_units, ETHER_DECIMALS};
//! use primitive_types::U256;
//!
//! let amount = to_base_units("1.5", ETHER_DECIMALS).unwrap();
//! assert_eq!(amount, U256::from(1_500_000_000_000_000_000u64));
//!
//! assert_eq!(from_base_units(amount, ETHER_DECIMALS), "1.5");
//! ```

use primitive_types::U256;
use rust_decimal::Decimal;

/// Decimals of ether and of most ERC-20 tokens
pub const ETHER_DECIMALS: u32 = 18;

/// Largest decimals value whose scale factor `10^decimals` fits in 256 bits
pub const MAX_DECIMALS: u32 = 77;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to integer base units
///
/// # Returns
///
/// * `Some(U256)` - `s * 10^decimals`
/// * `None` - If parsing fails, the value is negative, it has more
///   fractional digits than `decimals`, or the result exceeds 256 bits
///
/// # Example
///
/// ```
/// use exchange_math::types::units::to_base_units;
/// use primitive_types::U256;
///
/// assert_eq!(to_base_units("0.000001", 6), Some(U256::one()));
/// assert_eq!(to_base_units("0.0000001", 6), None);
/// ```
pub fn to_base_units(s: &str, decimals: u32) -> Option<U256> {
    let decimal = s.trim().parse::<Decimal>().ok()?;
    decimal_to_base_units(decimal, decimals)
}

/// Convert a `Decimal` to integer base units, see [`to_base_units`]
pub fn decimal_to_base_units(d: Decimal, decimals: u32) -> Option<U256> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }
    if decimals > MAX_DECIMALS {
        return None;
    }

    let d = d.normalize();
    let scale = d.scale();
    if scale > decimals {
        return None;
    }

    let mantissa = u128::try_from(d.mantissa()).ok()?;
    U256::from(mantissa).checked_mul(U256::exp10((decimals - scale) as usize))
}

/// Render integer base units as a decimal string with trailing zeros trimmed
///
/// # Example
///
/// ```
/// use exchange_math::types::units::from_base_units;
/// use primitive_types::U256;
///
/// assert_eq!(from_base_units(U256::from(1_000_000u64), 6), "1");
/// assert_eq!(from_base_units(U256::from(1_230_000u64), 6), "1.23");
/// assert_eq!(from_base_units(U256::from(5u64), 6), "0.000005");
/// ```
pub fn from_base_units(amount: U256, decimals: u32) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };
    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
