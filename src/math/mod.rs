//! Fixed-width arithmetic primitives.
//!
//! All values are 256-bit unsigned words (`primitive_types::U256`) and every
//! operation is checked: nothing wraps, nothing saturates unless the function
//! says so.
//!
//! ## Modules
//!
//! - [`word`]: checked add/sub/mul/div/rem returning [`crate::ExchangeError`]
//! - [`partial`]: floor/ceil partial amounts and the 0.1% rounding-error rule
//! - [`fraction`]: unreduced rational addition and bounded normalization

pub mod fraction;
pub mod partial;
pub mod word;

pub use fraction::Fraction;
pub use partial::{
    get_partial_amount_ceil, get_partial_amount_floor, is_rounding_error_ceil,
    is_rounding_error_floor, safe_get_partial_amount_ceil, safe_get_partial_amount_floor,
};
