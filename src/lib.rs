//! # Exchange Math
//!
//! Fill and match settlement arithmetic for a 256-bit order-matching
//! protocol.
//!
//! ## Architecture
//!
//! - **Math**: Checked word arithmetic, partial amounts with controlled
//!   rounding, fraction accumulation
//! - **Types**: Order, FillResults, MatchedFillResults, ConformanceReceipt
//! - **Engine**: Single-order fill and two-order match calculators
//! - **Config**: Protocol fee policy
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Results match a second, independently executed
//!    implementation to the integer
//! 2. **No Floating Point**: All amounts are 256-bit unsigned words
//! 3. **Fail Closed**: Overflow, division by zero and excessive rounding
//!    abort the whole computation with an [`ExchangeError`]
//!
//! ## Example
//!
//! ```
//! use exchange_math::{calculate_fill_results, Order, ProtocolFeeConfig};
//! use primitive_types::U256;
//!
//! let fees = ProtocolFeeConfig::new(U256::from(150_000u64), U256::from(100_000u64));
//! let order = Order::new(U256::from(17u64), U256::from(98u64));
//!
//! let results = calculate_fill_results(&order, U256::from(98u64), fees.multiplier, fees.gas_price)
//!     .unwrap();
//! assert_eq!(results.maker_asset_filled_amount, U256::from(17u64));
//! assert_eq!(results.protocol_fee_paid, U256::from(15_000_000_000u64));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy shared by every operation
pub mod error;

/// Checked arithmetic, partial amounts, fractions
pub mod math;

/// Core data types: Order, FillResults, MatchedFillResults
pub mod types;

/// Fill and match calculators
pub mod engine;

/// Protocol fee policy
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{ConfigError, ProtocolFeeConfig};
pub use engine::{
    add_fill_results, calculate_fill_results, calculate_matched_fill_results,
    calculate_matched_fill_results_bounded, calculate_matched_fill_results_with_filled_amounts,
    calculate_matched_fill_results_with_maximal_fill, TransferBranch,
};
pub use error::{ExchangeError, Result};
pub use math::{
    get_partial_amount_ceil, get_partial_amount_floor, is_rounding_error_ceil,
    is_rounding_error_floor, safe_get_partial_amount_ceil, safe_get_partial_amount_floor,
    Fraction,
};
pub use types::{ConformanceReceipt, FillResults, MatchedFillResults, Order, OrderHash};
