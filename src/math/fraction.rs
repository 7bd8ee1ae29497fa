//! Exact rational accumulation over 256-bit words.
//!
//! Fractions are kept unreduced. `add` cross-multiplies; `normalize` rescales
//! both components by a common integer divisor once either grows past a bound,
//! so an accumulated ratio stays small enough for further multiplication.
//! The only precision lost is the truncation of that divisor.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::word::{checked_add, checked_div, checked_mul};

/// Default bound used by [`normalize_default`]: 2^127
pub fn default_max_value() -> U256 {
    U256::one() << 127
}

/// `n1/d1 + n2/d2` as an unreduced `(numerator, denominator)` pair.
///
/// A zero numerator on either side returns the other pair unchanged.
pub fn add(n1: U256, d1: U256, n2: U256, d2: U256) -> Result<(U256, U256)> {
    if n1.is_zero() {
        return Ok((n2, d2));
    }
    if n2.is_zero() {
        return Ok((n1, d1));
    }
    let numerator = checked_add(checked_mul(n1, d2)?, checked_mul(n2, d1)?)?;
    let denominator = checked_mul(d1, d2)?;
    Ok((numerator, denominator))
}

/// Rescale `numerator / denominator` once either component exceeds `max_value`.
///
/// Both components are divided by `max(numerator, denominator) / max_value`.
/// That divisor is truncated, so the larger component ends up in
/// `[max_value, 2 * max_value)` rather than exactly at the bound.
pub fn normalize(numerator: U256, denominator: U256, max_value: U256) -> Result<(U256, U256)> {
    if numerator > max_value || denominator > max_value {
        let larger = if numerator >= denominator { numerator } else { denominator };
        let rescale_base = checked_div(larger, max_value)?;
        return Ok((
            checked_div(numerator, rescale_base)?,
            checked_div(denominator, rescale_base)?,
        ));
    }
    Ok((numerator, denominator))
}

/// [`normalize`] with a bound of 2^127
pub fn normalize_default(numerator: U256, denominator: U256) -> Result<(U256, U256)> {
    normalize(numerator, denominator, default_max_value())
}

// ============================================================================
// Fraction value type
// ============================================================================

/// An unreduced `numerator / denominator` pair.
///
/// ## Example
///
/// ```
/// use exchange_math::math::Fraction;
/// use primitive_types::U256;
///
/// let third = Fraction::new(U256::from(1u64), U256::from(3u64));
/// let sum = third.add(&third).unwrap();
/// assert_eq!(sum, Fraction::new(U256::from(6u64), U256::from(9u64)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: U256,
    pub denominator: U256,
}

impl Default for Fraction {
    fn default() -> Self {
        Self::zero()
    }
}

impl Fraction {
    pub fn new(numerator: U256, denominator: U256) -> Self {
        Self { numerator, denominator }
    }

    /// `0 / 1`
    pub fn zero() -> Self {
        Self::new(U256::zero(), U256::one())
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Exact sum, see [`add`]
    pub fn add(&self, other: &Fraction) -> Result<Fraction> {
        let (numerator, denominator) =
            add(self.numerator, self.denominator, other.numerator, other.denominator)?;
        Ok(Self::new(numerator, denominator))
    }

    /// Rescaled copy, see [`normalize`]
    pub fn normalize(&self, max_value: U256) -> Result<Fraction> {
        let (numerator, denominator) = normalize(self.numerator, self.denominator, max_value)?;
        Ok(Self::new(numerator, denominator))
    }

    /// Integer part, `floor(numerator / denominator)`
    pub fn to_floor(&self) -> Result<U256> {
        checked_div(self.numerator, self.denominator)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
