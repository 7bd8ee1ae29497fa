//! Single-order fill calculation.
//!
//! Every derived amount is the floor of its proportional share of the taker
//! fill, computed through the safe partial-amount path: a loss of 0.1% or
//! more on any of them aborts the whole calculation.

use primitive_types::U256;
use tracing::trace;

use crate::error::Result;
use crate::math::partial::safe_get_partial_amount_floor;
use crate::math::word::checked_mul;
use crate::types::{FillResults, Order};

/// Compute the amounts moved by filling `taker_asset_filled_amount` of `order`.
///
/// # Errors
///
/// - `DivisionByZero` if `order.taker_asset_amount` is zero
/// - `RoundingError` naming the first of the maker amount, maker fee or taker
///   fee computations that loses 0.1% or more
/// - `ArithmeticOverflow` if any product overflows, including
///   `protocol_fee_multiplier * gas_price`
///
/// # Example
///
/// ```
/// use exchange_math::engine::calculate_fill_results;
/// use exchange_math::types::Order;
/// use primitive_types::U256;
///
/// let order = Order::new(U256::from(200u64), U256::from(100u64))
///     .with_fees(U256::from(10u64), U256::from(20u64));
///
/// let results = calculate_fill_results(&order, U256::from(50u64), U256::from(150_000u64), U256::one())
///     .unwrap();
///
/// assert_eq!(results.maker_asset_filled_amount, U256::from(100u64));
/// assert_eq!(results.maker_fee_paid, U256::from(5u64));
/// assert_eq!(results.taker_fee_paid, U256::from(10u64));
/// assert_eq!(results.protocol_fee_paid, U256::from(150_000u64));
/// ```
pub fn calculate_fill_results(
    order: &Order,
    taker_asset_filled_amount: U256,
    protocol_fee_multiplier: U256,
    gas_price: U256,
) -> Result<FillResults> {
    let maker_asset_filled_amount = safe_get_partial_amount_floor(
        taker_asset_filled_amount,
        order.taker_asset_amount,
        order.maker_asset_amount,
    )?;
    let maker_fee_paid = safe_get_partial_amount_floor(
        taker_asset_filled_amount,
        order.taker_asset_amount,
        order.maker_fee,
    )?;
    let taker_fee_paid = safe_get_partial_amount_floor(
        taker_asset_filled_amount,
        order.taker_asset_amount,
        order.taker_fee,
    )?;
    let protocol_fee_paid = checked_mul(protocol_fee_multiplier, gas_price)?;

    trace!(
        order = %order.hash,
        %taker_asset_filled_amount,
        %maker_asset_filled_amount,
        "calculated fill results"
    );

    Ok(FillResults {
        maker_asset_filled_amount,
        taker_asset_filled_amount,
        maker_fee_paid,
        taker_fee_paid,
        protocol_fee_paid,
    })
}

/// Field-wise sum of two fill results, see [`FillResults::checked_add`].
pub fn add_fill_results(a: &FillResults, b: &FillResults) -> Result<FillResults> {
    a.checked_add(b)
}

// ============================================================================
// Unit Tests
// ============================================================================
