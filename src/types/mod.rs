//! Core data types for the exchange math
//!
//! All amounts are 256-bit unsigned words (`primitive_types::U256`) in base
//! units of their asset. Records serialize with serde using camelCase field
//! names.
//!
//! ## Types
//!
//! - [`Order`]: The order fields the fill and match calculators read
//! - [`OrderHash`]: 32-byte order identifier carried by errors
//! - [`FillResults`]: Amounts moved by filling one order
//! - [`MatchedFillResults`]: Amounts moved by matching two orders
//! - [`ConformanceReceipt`]: SHA-256 digest over a sequence of results
//!
//! ## Units
//!
//! [`units`] converts decimal strings such as `"1.5"` to base units and back.

mod fill_results;
mod order;
mod receipt;
pub mod units;

// Re-export all types at module level
pub use fill_results::{FillResults, MatchedFillResults};
pub use order::{Order, OrderHash};
pub use receipt::ConformanceReceipt;
