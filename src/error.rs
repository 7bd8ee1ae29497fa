//! Error taxonomy for the fill and match arithmetic.
//!
//! The set is closed: every operation in this crate fails with exactly one of
//! these variants, and every failure is deterministic for its inputs. Retrying
//! a call with the same arguments fails identically.

use primitive_types::U256;
use thiserror::Error;

use crate::types::OrderHash;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Failure of a partial-amount, fill or match computation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeError {
    /// A denominator argument was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// `numerator * target / denominator` would lose at least 0.1% of its
    /// value to rounding.
    #[error("rounding error: {numerator} * {target} / {denominator} loses at least 0.1%")]
    RoundingError {
        numerator: U256,
        denominator: U256,
        target: U256,
    },

    /// An addition or multiplication exceeded 2^256 - 1, or a subtraction
    /// went below zero.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// The two orders of a match have incompatible exchange rates.
    #[error("negative spread between orders {left_order_hash} and {right_order_hash}")]
    NegativeSpreadError {
        left_order_hash: OrderHash,
        right_order_hash: OrderHash,
    },
}

impl ExchangeError {
    /// Stable machine-readable tag for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            ExchangeError::DivisionByZero => "DIVISION_BY_ZERO",
            ExchangeError::RoundingError { .. } => "ROUNDING_ERROR",
            ExchangeError::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            ExchangeError::NegativeSpreadError { .. } => "NEGATIVE_SPREAD",
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
