//! Partial amounts: `numerator * target / denominator` with controlled rounding.
//!
//! ## Rounding Error Rule
//!
//! A partial amount is considered to have a rounding error when truncation
//! loses at least 0.1% of the exact value. The test is carried out on the
//! unscaled integers:
//!
//! - floor: `(numerator * target) % denominator * 1000 >= numerator * target`
//! - ceil: `(denominator - remainder) * 1000 >= numerator * target`, unless
//!   the division is exact
//!
//! Pre-dividing either side would round a second time and change which edge
//! cases are flagged.
//!
//! ## Evaluation Order
//!
//! Every intermediate is a checked 256-bit word. For the ceil variant
//! `denominator - 1` is formed before the product and the sum, so an overflow
//! surfaces at the same step as on the reference machine.
//!
//! ## Example
//!
//! ```
//! use exchange_math::math::partial::{get_partial_amount_ceil, get_partial_amount_floor};
//! use primitive_types::U256;
//!
//! let n = U256::from(6u64) * U256::exp10(17);  // 0.6e18
//! let d = U256::from(18u64) * U256::exp10(17); // 1.8e18
//! let t = U256::exp10(18);                     // 1e18
//!
//! assert_eq!(get_partial_amount_floor(n, d, t).unwrap(), U256::from(333_333_333_333_333_333u64));
//! assert_eq!(get_partial_amount_ceil(n, d, t).unwrap(), U256::from(333_333_333_333_333_334u64));
//! ```

use primitive_types::U256;

use crate::error::{ExchangeError, Result};
use crate::math::word::{checked_add, checked_div, checked_mul, checked_rem, checked_sub};

/// Loss threshold: one part in this many
pub const ROUNDING_ERROR_SCALE: u64 = 1000;

#[inline]
fn ensure_nonzero(denominator: U256) -> Result<()> {
    if denominator.is_zero() {
        return Err(ExchangeError::DivisionByZero);
    }
    Ok(())
}

// ============================================================================
// Unchecked rounding
// ============================================================================

/// `floor(numerator * target / denominator)`
pub fn get_partial_amount_floor(numerator: U256, denominator: U256, target: U256) -> Result<U256> {
    ensure_nonzero(denominator)?;
    checked_div(checked_mul(numerator, target)?, denominator)
}

/// `ceil(numerator * target / denominator)`, computed as
/// `(numerator * target + (denominator - 1)) / denominator`
pub fn get_partial_amount_ceil(numerator: U256, denominator: U256, target: U256) -> Result<U256> {
    ensure_nonzero(denominator)?;
    let denominator_less_one = checked_sub(denominator, U256::one())?;
    let product = checked_mul(numerator, target)?;
    checked_div(checked_add(product, denominator_less_one)?, denominator)
}

// ============================================================================
// Rounding error detection
// ============================================================================

/// True if flooring `numerator * target / denominator` loses at least 0.1%.
pub fn is_rounding_error_floor(numerator: U256, denominator: U256, target: U256) -> Result<bool> {
    ensure_nonzero(denominator)?;
    if numerator.is_zero() || target.is_zero() {
        return Ok(false);
    }

    let product = checked_mul(numerator, target)?;
    let remainder = checked_rem(product, denominator)?;
    let scaled = checked_mul(remainder, U256::from(ROUNDING_ERROR_SCALE))?;
    Ok(scaled >= product)
}

/// True if ceiling `numerator * target / denominator` adds at least 0.1%.
pub fn is_rounding_error_ceil(numerator: U256, denominator: U256, target: U256) -> Result<bool> {
    ensure_nonzero(denominator)?;
    if numerator.is_zero() || target.is_zero() {
        return Ok(false);
    }

    let product = checked_mul(numerator, target)?;
    let remainder = checked_rem(product, denominator)?;
    if remainder.is_zero() {
        // Exact division: ceil == floor
        return Ok(false);
    }
    let complement = checked_sub(denominator, remainder)?;
    let scaled = checked_mul(complement, U256::from(ROUNDING_ERROR_SCALE))?;
    Ok(scaled >= product)
}

// ============================================================================
// Safe variants
// ============================================================================

/// Floor partial amount, failing with `RoundingError` on a >= 0.1% loss.
pub fn safe_get_partial_amount_floor(
    numerator: U256,
    denominator: U256,
    target: U256,
) -> Result<U256> {
    if is_rounding_error_floor(numerator, denominator, target)? {
        return Err(ExchangeError::RoundingError {
            numerator,
            denominator,
            target,
        });
    }
    get_partial_amount_floor(numerator, denominator, target)
}

/// Ceil partial amount, failing with `RoundingError` on a >= 0.1% gain.
pub fn safe_get_partial_amount_ceil(
    numerator: U256,
    denominator: U256,
    target: U256,
) -> Result<U256> {
    if is_rounding_error_ceil(numerator, denominator, target)? {
        return Err(ExchangeError::RoundingError {
            numerator,
            denominator,
            target,
        });
    }
    get_partial_amount_ceil(numerator, denominator, target)
}

// ============================================================================
// Unit Tests
// ============================================================================
