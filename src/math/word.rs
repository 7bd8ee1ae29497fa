//! Checked 256-bit word arithmetic.
//!
//! Every helper fails exactly where a fixed-width 256-bit machine traps:
//! additions and multiplications beyond `U256::MAX`, subtractions below zero,
//! and division or remainder by zero.

use primitive_types::U256;

use crate::error::{ExchangeError, Result};

/// `a + b`, failing with `ArithmeticOverflow` past `U256::MAX`
#[inline]
pub fn checked_add(a: U256, b: U256) -> Result<U256> {
    a.checked_add(b).ok_or(ExchangeError::ArithmeticOverflow)
}

/// `a - b`, failing with `ArithmeticOverflow` below zero
#[inline]
pub fn checked_sub(a: U256, b: U256) -> Result<U256> {
    a.checked_sub(b).ok_or(ExchangeError::ArithmeticOverflow)
}

/// `a * b`, failing with `ArithmeticOverflow` past `U256::MAX`
#[inline]
pub fn checked_mul(a: U256, b: U256) -> Result<U256> {
    a.checked_mul(b).ok_or(ExchangeError::ArithmeticOverflow)
}

/// `a / b` truncated toward zero, failing with `DivisionByZero`
#[inline]
pub fn checked_div(a: U256, b: U256) -> Result<U256> {
    a.checked_div(b).ok_or(ExchangeError::DivisionByZero)
}

/// `a % b`, failing with `DivisionByZero`
#[inline]
pub fn checked_rem(a: U256, b: U256) -> Result<U256> {
    a.checked_rem(b).ok_or(ExchangeError::DivisionByZero)
}

// ============================================================================
// Unit Tests
// ============================================================================
