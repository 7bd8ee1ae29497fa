//! Fill and match calculators.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same input always produces same output, down to the
//!    rounding direction of every division
//! 2. **Checked Arithmetic**: Every intermediate is a 256-bit word; nothing
//!    wraps or saturates silently
//! 3. **Pure Functions**: No state, no I/O; results are fresh values
//!
//! ## Example
//!
//! ```
//! use exchange_math::engine::calculate_matched_fill_results_bounded;
//! use exchange_math::types::Order;
//! use primitive_types::U256;
//!
//! // Left sells 17 A for 98 B, right sells 75 B for 13 A
//! let left = Order::new(U256::from(17u64), U256::from(98u64));
//! let right = Order::new(U256::from(75u64), U256::from(13u64));
//!
//! let results = calculate_matched_fill_results_bounded(&left, &right, U256::zero(), U256::zero())
//!     .unwrap();
//!
//! assert_eq!(results.left.maker_asset_filled_amount, U256::from(13u64));
//! assert_eq!(results.left.taker_asset_filled_amount, U256::from(75u64));
//! assert_eq!(results.right.maker_asset_filled_amount, U256::from(75u64));
//! assert_eq!(results.right.taker_asset_filled_amount, U256::from(13u64));
//! ```

pub mod fill;
pub mod matcher;

pub use fill::{add_fill_results, calculate_fill_results};
pub use matcher::{
    calculate_matched_fill_results, calculate_matched_fill_results_bounded,
    calculate_matched_fill_results_with_filled_amounts,
    calculate_matched_fill_results_with_maximal_fill, select_branch, TransferBranch,
};
