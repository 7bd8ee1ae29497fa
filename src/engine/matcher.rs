//! Two-order match calculation.
//!
//! ## Transfer Branches
//!
//! The left order sells asset A for asset B, the right order sells B for A.
//! Whichever order has less remaining capacity is the bottleneck and fills
//! completely; the other is filled proportionally. Branches are tried in
//! order and the first that applies wins:
//!
//! 1. [`TransferBranch::RightOrderFilled`]: `left.taker > right.maker`. The
//!    left maker amount is floored without a rounding check.
//! 2. [`TransferBranch::LeftOrderFilledMaximal`]: maximal fill only,
//!    `left.maker < right.taker`. The right maker amount is a checked floor.
//! 3. [`TransferBranch::LeftOrderFilled`]: bounded fill only,
//!    `left.taker < right.maker`. The right taker amount is a checked ceil,
//!    rounding in favour of the right maker.
//! 4. [`TransferBranch::BothOrdersFilled`]: both orders fill completely.
//!
//! Comparisons use the amounts each order can still trade. Partial amounts
//! are always priced at the order's own `maker / taker` ratio.
//!
//! ## Profit
//!
//! The spread kept by the matcher, in each maker asset:
//!
//! - `profit_in_left_maker_asset = left.maker_filled - right.taker_filled`
//! - `profit_in_right_maker_asset = right.maker_filled - left.taker_filled`
//!
//! Under bounded fill the right maker fill always equals the left taker fill,
//! so only the left profit can be non-zero. Under maximal fill each profit is
//! taken only when that maker's remaining amount exceeds what the counterparty
//! still wants, and both can be non-zero.

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ExchangeError, Result};
use crate::math::partial::{
    get_partial_amount_floor, safe_get_partial_amount_ceil, safe_get_partial_amount_floor,
};
use crate::math::word::{checked_mul, checked_sub};
use crate::types::{FillResults, MatchedFillResults, Order};

/// Which order of a match is the bottleneck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferBranch {
    /// Right order fills completely, left order partially
    RightOrderFilled,
    /// Left order fills completely, right order partially (maximal fill)
    LeftOrderFilledMaximal,
    /// Left order fills completely, right order partially (bounded fill)
    LeftOrderFilled,
    /// Both orders fill completely
    BothOrdersFilled,
}

impl TransferBranch {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferBranch::RightOrderFilled => "right_order_filled",
            TransferBranch::LeftOrderFilledMaximal => "left_order_filled_maximal",
            TransferBranch::LeftOrderFilled => "left_order_filled",
            TransferBranch::BothOrdersFilled => "both_orders_filled",
        }
    }
}

impl fmt::Display for TransferBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maker and taker amounts an order can still trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Remaining {
    maker: U256,
    taker: U256,
}

impl Remaining {
    fn whole(order: &Order) -> Self {
        Self {
            maker: order.maker_asset_amount,
            taker: order.taker_asset_amount,
        }
    }

    /// `taker - taker_asset_filled_amount`, and the maker amount it buys
    fn after_fill(order: &Order, taker_asset_filled_amount: U256) -> Result<Self> {
        let taker = checked_sub(order.taker_asset_amount, taker_asset_filled_amount)?;
        let maker = safe_get_partial_amount_floor(
            order.maker_asset_amount,
            order.taker_asset_amount,
            taker,
        )?;
        Ok(Self { maker, taker })
    }
}

/// Asset amounts moved by a match
#[derive(Debug, Clone, Copy)]
struct Transfers {
    left_maker: U256,
    left_taker: U256,
    right_maker: U256,
    right_taker: U256,
}

fn branch_for(left: Remaining, right: Remaining, with_maximal_fill: bool) -> TransferBranch {
    if left.taker > right.maker {
        TransferBranch::RightOrderFilled
    } else if with_maximal_fill && left.maker < right.taker {
        TransferBranch::LeftOrderFilledMaximal
    } else if !with_maximal_fill && left.taker < right.maker {
        TransferBranch::LeftOrderFilled
    } else {
        TransferBranch::BothOrdersFilled
    }
}

/// Pick the transfer branch for a pair of unfilled orders.
///
/// Does not check the spread; see [`calculate_matched_fill_results`].
pub fn select_branch(left: &Order, right: &Order, with_maximal_fill: bool) -> TransferBranch {
    branch_for(Remaining::whole(left), Remaining::whole(right), with_maximal_fill)
}

/// Fail with `NegativeSpreadError` unless
/// `left.maker * right.maker >= left.taker * right.taker`.
fn assert_valid_spread(left: &Order, right: &Order) -> Result<()> {
    let offered = checked_mul(left.maker_asset_amount, right.maker_asset_amount)?;
    let asked = checked_mul(left.taker_asset_amount, right.taker_asset_amount)?;
    if offered < asked {
        debug!(
            left_order = %left.hash,
            right_order = %right.hash,
            "rejected match with negative spread"
        );
        return Err(ExchangeError::NegativeSpreadError {
            left_order_hash: left.hash,
            right_order_hash: right.hash,
        });
    }
    Ok(())
}

fn transfer_amounts(
    left: &Order,
    right: &Order,
    left_remaining: Remaining,
    right_remaining: Remaining,
    branch: TransferBranch,
) -> Result<Transfers> {
    Ok(match branch {
        TransferBranch::RightOrderFilled => Transfers {
            left_maker: get_partial_amount_floor(
                left.maker_asset_amount,
                left.taker_asset_amount,
                right_remaining.maker,
            )?,
            left_taker: right_remaining.maker,
            right_maker: right_remaining.maker,
            right_taker: right_remaining.taker,
        },
        TransferBranch::LeftOrderFilledMaximal => Transfers {
            left_maker: left_remaining.maker,
            left_taker: left_remaining.taker,
            right_maker: safe_get_partial_amount_floor(
                right.maker_asset_amount,
                right.taker_asset_amount,
                left_remaining.maker,
            )?,
            right_taker: left_remaining.maker,
        },
        TransferBranch::LeftOrderFilled => Transfers {
            left_maker: left_remaining.maker,
            left_taker: left_remaining.taker,
            right_maker: left_remaining.taker,
            right_taker: safe_get_partial_amount_ceil(
                right.taker_asset_amount,
                right.maker_asset_amount,
                left_remaining.taker,
            )?,
        },
        TransferBranch::BothOrdersFilled => Transfers {
            left_maker: left_remaining.maker,
            left_taker: left_remaining.taker,
            right_maker: right_remaining.maker,
            right_taker: right_remaining.taker,
        },
    })
}

/// `(profit in left maker asset, profit in right maker asset)`
fn match_profits(
    left_remaining: Remaining,
    right_remaining: Remaining,
    transfers: &Transfers,
    with_maximal_fill: bool,
) -> Result<(U256, U256)> {
    if !with_maximal_fill {
        let in_left = checked_sub(transfers.left_maker, transfers.right_taker)?;
        return Ok((in_left, U256::zero()));
    }

    let in_left = if left_remaining.maker > right_remaining.taker {
        checked_sub(transfers.left_maker, transfers.right_taker)?
    } else {
        U256::zero()
    };
    let in_right = if right_remaining.maker > left_remaining.taker {
        checked_sub(transfers.right_maker, transfers.left_taker)?
    } else {
        U256::zero()
    };
    Ok((in_left, in_right))
}

/// Fees owed by one side of a match, proportional to its order totals
fn side_fees(
    order: &Order,
    maker_asset_filled_amount: U256,
    taker_asset_filled_amount: U256,
) -> Result<(U256, U256)> {
    Ok((
        safe_get_partial_amount_floor(
            maker_asset_filled_amount,
            order.maker_asset_amount,
            order.maker_fee,
        )?,
        safe_get_partial_amount_floor(
            taker_asset_filled_amount,
            order.taker_asset_amount,
            order.taker_fee,
        )?,
    ))
}

fn match_remaining(
    left: &Order,
    right: &Order,
    left_remaining: Remaining,
    right_remaining: Remaining,
    protocol_fee_multiplier: U256,
    gas_price: U256,
    with_maximal_fill: bool,
) -> Result<MatchedFillResults> {
    let branch = branch_for(left_remaining, right_remaining, with_maximal_fill);
    let transfers = transfer_amounts(left, right, left_remaining, right_remaining, branch)?;

    trace!(
        %branch,
        left_order = %left.hash,
        right_order = %right.hash,
        with_maximal_fill,
        "selected transfer branch"
    );

    let (profit_in_left_maker_asset, profit_in_right_maker_asset) =
        match_profits(left_remaining, right_remaining, &transfers, with_maximal_fill)?;

    let (left_maker_fee, left_taker_fee) =
        side_fees(left, transfers.left_maker, transfers.left_taker)?;
    let (right_maker_fee, right_taker_fee) =
        side_fees(right, transfers.right_maker, transfers.right_taker)?;
    let protocol_fee_paid = checked_mul(protocol_fee_multiplier, gas_price)?;

    Ok(MatchedFillResults {
        left: FillResults {
            maker_asset_filled_amount: transfers.left_maker,
            taker_asset_filled_amount: transfers.left_taker,
            maker_fee_paid: left_maker_fee,
            taker_fee_paid: left_taker_fee,
            protocol_fee_paid,
        },
        right: FillResults {
            maker_asset_filled_amount: transfers.right_maker,
            taker_asset_filled_amount: transfers.right_taker,
            maker_fee_paid: right_maker_fee,
            taker_fee_paid: right_taker_fee,
            protocol_fee_paid,
        },
        profit_in_left_maker_asset,
        profit_in_right_maker_asset,
    })
}

/// Compute the amounts moved by matching `left` against `right`.
///
/// # Arguments
///
/// * `left` - Order selling asset A for asset B
/// * `right` - Order selling asset B for asset A
/// * `protocol_fee_multiplier`, `gas_price` - Each side pays their product
/// * `with_maximal_fill` - Enable branch 2 instead of branch 3
///
/// # Errors
///
/// Checked in this order:
///
/// - `NegativeSpreadError` if the orders' prices do not cross; checked before
///   any transfer amount is computed
/// - `RoundingError` from the checked branches or any of the four fees
/// - `DivisionByZero` if a divisor amount used by the selected branch or the
///   fee computation is zero
/// - `ArithmeticOverflow` if any product overflows, including
///   `protocol_fee_multiplier * gas_price`
pub fn calculate_matched_fill_results(
    left: &Order,
    right: &Order,
    protocol_fee_multiplier: U256,
    gas_price: U256,
    with_maximal_fill: bool,
) -> Result<MatchedFillResults> {
    assert_valid_spread(left, right)?;
    match_remaining(
        left,
        right,
        Remaining::whole(left),
        Remaining::whole(right),
        protocol_fee_multiplier,
        gas_price,
        with_maximal_fill,
    )
}

/// Match two orders that may already be partially filled.
///
/// `left_taker_asset_filled_amount` and `right_taker_asset_filled_amount` are
/// the taker amounts each order has already traded. Branches run on what is
/// left: `taker - filled`, and the maker amount that buys at the order's
/// price (a checked floor). Fees are still proportional to the order totals.
///
/// # Errors
///
/// As [`calculate_matched_fill_results`], plus:
///
/// - `ArithmeticOverflow` if a filled amount exceeds its order's taker amount
///   or a profit would be negative
/// - `RoundingError` if a remaining maker amount loses 0.1% or more
/// - `DivisionByZero` if an order's taker amount is zero
pub fn calculate_matched_fill_results_with_filled_amounts(
    left: &Order,
    right: &Order,
    left_taker_asset_filled_amount: U256,
    right_taker_asset_filled_amount: U256,
    protocol_fee_multiplier: U256,
    gas_price: U256,
    with_maximal_fill: bool,
) -> Result<MatchedFillResults> {
    assert_valid_spread(left, right)?;
    let left_remaining = Remaining::after_fill(left, left_taker_asset_filled_amount)?;
    let right_remaining = Remaining::after_fill(right, right_taker_asset_filled_amount)?;
    match_remaining(
        left,
        right,
        left_remaining,
        right_remaining,
        protocol_fee_multiplier,
        gas_price,
        with_maximal_fill,
    )
}

/// [`calculate_matched_fill_results`] with bounded fill
pub fn calculate_matched_fill_results_bounded(
    left: &Order,
    right: &Order,
    protocol_fee_multiplier: U256,
    gas_price: U256,
) -> Result<MatchedFillResults> {
    calculate_matched_fill_results(left, right, protocol_fee_multiplier, gas_price, false)
}

/// [`calculate_matched_fill_results`] with maximal fill
pub fn calculate_matched_fill_results_with_maximal_fill(
    left: &Order,
    right: &Order,
    protocol_fee_multiplier: U256,
    gas_price: U256,
) -> Result<MatchedFillResults> {
    calculate_matched_fill_results(left, right, protocol_fee_multiplier, gas_price, true)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderHash;

    const PROTOCOL_FEE_MULTIPLIER: u64 = 150_000;
    const GAS_PRICE: u64 = 100_000;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn ether() -> U256 {
        U256::exp10(18)
    }

    fn protocol_fee() -> U256 {
        u(15) * U256::exp10(9)
    }

    /// Order with the default 1 ether maker and taker fees
    fn order(maker: U256, taker: U256) -> Order {
        Order::new(maker, taker).with_fees(ether(), ether())
    }

    fn bounded(left: &Order, right: &Order) -> Result<MatchedFillResults> {
        calculate_matched_fill_results_bounded(left, right, u(PROTOCOL_FEE_MULTIPLIER), u(GAS_PRICE))
    }

    fn maximal(left: &Order, right: &Order) -> Result<MatchedFillResults> {
        calculate_matched_fill_results_with_maximal_fill(
            left,
            right,
            u(PROTOCOL_FEE_MULTIPLIER),
            u(GAS_PRICE),
        )
    }

    fn fill(maker: U256, taker: U256, maker_fee: U256, taker_fee: U256) -> FillResults {
        FillResults {
            maker_asset_filled_amount: maker,
            taker_asset_filled_amount: taker,
            maker_fee_paid: maker_fee,
            taker_fee_paid: taker_fee,
            protocol_fee_paid: protocol_fee(),
        }
    }

    // ------------------------------------------------------------------------
    // Branch selection
    // ------------------------------------------------------------------------

    #[test]
    fn test_select_branch() {
        let left = order(u(17), u(98));
        let right = order(u(75), u(13));
        assert_eq!(select_branch(&left, &right, false), TransferBranch::RightOrderFilled);
        assert_eq!(select_branch(&left, &right, true), TransferBranch::RightOrderFilled);

        let left = order(u(7), u(4));
        let right = order(u(8), u(6));
        assert_eq!(select_branch(&left, &right, false), TransferBranch::LeftOrderFilled);
        assert_eq!(select_branch(&left, &right, true), TransferBranch::BothOrdersFilled);

        let left = order(u(15), u(90));
        let right = order(u(196), u(28));
        assert_eq!(select_branch(&left, &right, true), TransferBranch::LeftOrderFilledMaximal);
    }

    #[test]
    fn test_branch_display() {
        assert_eq!(TransferBranch::LeftOrderFilledMaximal.to_string(), "left_order_filled_maximal");
        assert_eq!(
            serde_json::to_string(&TransferBranch::BothOrdersFilled).unwrap(),
            "\"both_orders_filled\""
        );
    }

    // ------------------------------------------------------------------------
    // Bounded fill
    // ------------------------------------------------------------------------

    #[test]
    fn test_only_right_order_fully_filled() {
        let left = order(u(17), u(98));
        let right = order(u(75), u(13));

        let results = bounded(&left, &right).unwrap();

        assert_eq!(
            results.left,
            fill(
                u(13),
                u(75),
                u(764_705_882_352_941_176),
                u(765_306_122_448_979_591)
            )
        );
        assert_eq!(results.right, fill(u(75), u(13), ether(), ether()));
        // 13 A paid out, 13 A taken in
        assert_eq!(results.profit_in_left_maker_asset, U256::zero());
        assert_eq!(results.profit_in_right_maker_asset, U256::zero());
    }

    #[test]
    fn test_only_left_order_fully_filled() {
        let left = order(u(15), u(90));
        let right = order(u(97), u(14));

        let results = bounded(&left, &right).unwrap();

        assert_eq!(results.left, fill(u(15), u(90), ether(), ether()));
        assert_eq!(
            results.right,
            fill(
                u(90),
                u(13),
                u(927_835_051_546_391_752),
                u(928_571_428_571_428_571)
            )
        );
        assert_eq!(results.profit_in_left_maker_asset, u(2));
        assert_eq!(results.profit_in_right_maker_asset, U256::zero());
    }

    #[test]
    fn test_right_taker_amount_rounds_up() {
        let left = order(u(16), u(22));
        let right = Order::new(u(83), u(49)).with_fees(u(10_000), u(10_000));

        let results = bounded(&left, &right).unwrap();

        assert_eq!(results.left, fill(u(16), u(22), ether(), ether()));
        // ceil(49 * 22 / 83) = ceil(12.98)
        assert_eq!(results.right, fill(u(22), u(13), u(2650), u(2653)));
        assert_eq!(results.profit_in_left_maker_asset, u(3));
    }

    #[test]
    fn test_left_maker_amount_rounds_down() {
        let left = Order::new(u(12), u(97)).with_fees(u(10_000), u(10_000));
        let right = order(u(89), u(1));

        let results = bounded(&left, &right).unwrap();

        // floor(12 * 89 / 97) = floor(11.01)
        assert_eq!(results.left, fill(u(11), u(89), u(9166), u(9175)));
        assert_eq!(results.right, fill(u(89), u(1), ether(), ether()));
        assert_eq!(results.profit_in_left_maker_asset, u(10));
    }

    #[test]
    fn test_right_order_fill_deviates_from_single_fill() {
        let left = order(u(1000), u(1005));
        let right = order(u(2126), u(1063));

        let results = bounded(&left, &right).unwrap();

        assert_eq!(results.left, fill(u(1000), u(1005), ether(), ether()));
        assert_eq!(
            results.right,
            fill(
                u(1005),
                u(503),
                u(472_718_720_602_069_614),
                u(473_189_087_488_240_827)
            )
        );
        assert_eq!(results.profit_in_left_maker_asset, u(497));
    }

    #[test]
    fn test_orders_completely_fill_each_other() {
        let left = order(ether() * 5u64, ether() * 10u64);
        let right = order(ether() * 10u64, ether() * 2u64);

        let results = bounded(&left, &right).unwrap();

        assert_eq!(results.left, fill(ether() * 5u64, ether() * 10u64, ether(), ether()));
        assert_eq!(results.right, fill(ether() * 10u64, ether() * 2u64, ether(), ether()));
        assert_eq!(results.profit_in_left_maker_asset, ether() * 3u64);
        assert_eq!(results.profit_in_right_maker_asset, U256::zero());
    }

    #[test]
    fn test_left_full_right_partial() {
        let left = order(ether() * 5u64, ether() * 10u64);
        let right = order(ether() * 20u64, ether() * 4u64);

        let results = bounded(&left, &right).unwrap();

        let half = ether() / 2u64;
        assert_eq!(results.left, fill(ether() * 5u64, ether() * 10u64, ether(), ether()));
        assert_eq!(results.right, fill(ether() * 10u64, ether() * 2u64, half, half));
    }

    #[test]
    fn test_right_full_left_partial() {
        let left = order(ether() * 50u64, ether() * 100u64);
        let right = order(ether() * 10u64, ether() * 2u64);

        let results = bounded(&left, &right).unwrap();

        let tenth = ether() / 10u64;
        assert_eq!(results.left, fill(ether() * 5u64, ether() * 10u64, tenth, tenth));
        assert_eq!(results.right, fill(ether() * 10u64, ether() * 2u64, ether(), ether()));
    }

    #[test]
    fn test_right_filled_branch_skips_rounding_check() {
        // floor(2 * 2 / 3) = 1 loses a third, yet the match goes through
        let left = Order::new(u(2), u(3));
        let right = Order::new(u(2), u(1));

        let results = bounded(&left, &right).unwrap();

        assert_eq!(results.left.maker_asset_filled_amount, u(1));
        assert_eq!(results.left.taker_asset_filled_amount, u(2));
        assert_eq!(results.right.maker_asset_filled_amount, u(2));
        assert_eq!(results.right.taker_asset_filled_amount, u(1));
    }

    #[test]
    fn test_left_filled_branch_rounding_error() {
        let left = Order::new(u(1), u(1));
        let right = Order::new(u(3), u(1));

        assert_eq!(
            bounded(&left, &right),
            Err(ExchangeError::RoundingError {
                numerator: u(1),
                denominator: u(3),
                target: u(1),
            })
        );
    }

    // ------------------------------------------------------------------------
    // Maximal fill
    // ------------------------------------------------------------------------

    #[test]
    fn test_maximal_fill_right_maker_exact() {
        let left = order(u(15), u(90));
        let right = order(u(196), u(28));

        let results = maximal(&left, &right).unwrap();

        assert_eq!(results.left, fill(u(15), u(90), ether(), ether()));
        assert_eq!(
            results.right,
            fill(
                u(105),
                u(15),
                u(535_714_285_714_285_714),
                u(535_714_285_714_285_714)
            )
        );
        assert_eq!(results.profit_in_left_maker_asset, U256::zero());
        assert_eq!(results.profit_in_right_maker_asset, u(15));
    }

    #[test]
    fn test_maximal_fill_right_maker_floor() {
        let left = order(u(16), u(22));
        let right = order(u(87), u(48));

        let results = maximal(&left, &right).unwrap();

        assert_eq!(results.left, fill(u(16), u(22), ether(), ether()));
        assert_eq!(
            results.right,
            fill(
                u(29),
                u(16),
                u(333_333_333_333_333_333),
                u(333_333_333_333_333_333)
            )
        );
        assert_eq!(results.profit_in_right_maker_asset, u(7));
    }

    #[test]
    fn test_maximal_fill_profit_in_both_maker_assets() {
        let left = order(u(7), u(4));
        let right = order(u(8), u(6));

        let results = maximal(&left, &right).unwrap();
        assert_eq!(results.left, fill(u(7), u(4), ether(), ether()));
        assert_eq!(results.right, fill(u(8), u(6), ether(), ether()));
        // 7 - 6 of the left maker asset, 8 - 4 of the right maker asset
        assert_eq!(results.profit_in_left_maker_asset, u(1));
        assert_eq!(results.profit_in_right_maker_asset, u(4));

        // Bounded fill stops the right order at the left taker amount
        let results = bounded(&left, &right).unwrap();
        assert_eq!(results.right.maker_asset_filled_amount, u(4));
        assert_eq!(results.right.taker_asset_filled_amount, u(3));
    }

    #[test]
    fn test_maximal_fill_deviates_from_bounded() {
        let left = order(u(1000), u(1005));
        let right = order(u(2126), u(1063));

        let results = maximal(&left, &right).unwrap();

        assert_eq!(results.left.maker_asset_filled_amount, u(1000));
        assert_eq!(results.right.maker_asset_filled_amount, u(2000));
        assert_eq!(results.right.taker_asset_filled_amount, u(1000));
        assert_eq!(results.profit_in_left_maker_asset, U256::zero());
        assert_eq!(results.profit_in_right_maker_asset, u(995));
    }

    #[test]
    fn test_maximal_fill_rounding_error() {
        let left = Order::new(u(1), u(1));
        let right = Order::new(u(10), u(3));

        assert_eq!(
            maximal(&left, &right),
            Err(ExchangeError::RoundingError {
                numerator: u(10),
                denominator: u(3),
                target: u(1),
            })
        );
    }

    #[test]
    fn test_bounded_fill_profits_only_left_maker_asset() {
        let pairs = [
            (order(u(17), u(98)), order(u(75), u(13))),
            (order(u(15), u(90)), order(u(97), u(14))),
            (order(u(16), u(22)), order(u(83), u(49))),
            (order(u(12), u(97)), order(u(89), u(1))),
            (order(u(7), u(4)), order(u(8), u(6))),
        ];

        for (left, right) in &pairs {
            let results = bounded(left, right).unwrap();
            assert_eq!(
                results.right.maker_asset_filled_amount,
                results.left.taker_asset_filled_amount
            );
            assert_eq!(results.profit_in_right_maker_asset, U256::zero());
            assert_eq!(
                results.profit_in_left_maker_asset,
                results.left.maker_asset_filled_amount - results.right.taker_asset_filled_amount
            );
        }
    }

    // ------------------------------------------------------------------------
    // Partially filled orders
    // ------------------------------------------------------------------------

    fn with_filled(
        left: &Order,
        right: &Order,
        left_filled: U256,
        right_filled: U256,
        with_maximal_fill: bool,
    ) -> Result<MatchedFillResults> {
        calculate_matched_fill_results_with_filled_amounts(
            left,
            right,
            left_filled,
            right_filled,
            u(PROTOCOL_FEE_MULTIPLIER),
            u(GAS_PRICE),
            with_maximal_fill,
        )
    }

    #[test]
    fn test_left_order_partially_filled_before_match() {
        let left = order(ether() * 50u64, ether() * 100u64);
        let right = order(ether() * 100u64, ether() * 50u64);

        // 90 of the left order's 100 taker units remain, buying 45 maker units
        let results = with_filled(&left, &right, ether() * 10u64, U256::zero(), true).unwrap();

        let fee = ether() * 9u64 / 10u64;
        assert_eq!(results.left, fill(ether() * 45u64, ether() * 90u64, fee, fee));
        assert_eq!(results.right, fill(ether() * 90u64, ether() * 45u64, fee, fee));
        assert!(results.is_profitless());
    }

    #[test]
    fn test_right_order_partially_filled_before_match() {
        let left = order(ether() * 100u64, ether() * 50u64);
        let right = order(ether() * 50u64, ether() * 100u64);

        let results = with_filled(&left, &right, U256::zero(), ether() * 10u64, true).unwrap();

        let fee = ether() * 9u64 / 10u64;
        assert_eq!(results.left, fill(ether() * 90u64, ether() * 45u64, fee, fee));
        assert_eq!(results.right, fill(ether() * 45u64, ether() * 90u64, fee, fee));
        assert!(results.is_profitless());
    }

    #[test]
    fn test_partially_filled_bounded_match() {
        let left = order(ether() * 5u64, ether() * 10u64);
        let right = order(ether() * 10u64, ether() * 2u64);

        let results = with_filled(&left, &right, ether() * 4u64, U256::zero(), false).unwrap();

        let fee = ether() * 6u64 / 10u64;
        let right_taker = ether() * 12u64 / 10u64;
        assert_eq!(results.left, fill(ether() * 3u64, ether() * 6u64, fee, fee));
        assert_eq!(results.right, fill(ether() * 6u64, right_taker, fee, fee));
        assert_eq!(results.profit_in_left_maker_asset, ether() * 3u64 - right_taker);
        assert_eq!(results.profit_in_right_maker_asset, U256::zero());
    }

    #[test]
    fn test_unfilled_orders_match_like_fresh_orders() {
        let pairs = [
            (order(u(17), u(98)), order(u(75), u(13))),
            (order(u(15), u(90)), order(u(196), u(28))),
            (order(u(7), u(4)), order(u(8), u(6))),
            (order(u(1000), u(1005)), order(u(2126), u(1063))),
        ];

        for (left, right) in &pairs {
            for with_maximal_fill in [false, true] {
                assert_eq!(
                    with_filled(left, right, U256::zero(), U256::zero(), with_maximal_fill),
                    calculate_matched_fill_results(
                        left,
                        right,
                        u(PROTOCOL_FEE_MULTIPLIER),
                        u(GAS_PRICE),
                        with_maximal_fill,
                    )
                );
            }
        }
    }

    #[test]
    fn test_overfilled_order_rejected() {
        let left = order(u(5), u(10));
        let right = order(u(10), u(2));
        assert_eq!(
            with_filled(&left, &right, u(11), U256::zero(), false),
            Err(ExchangeError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_negative_profit_after_fill_overflows() {
        // Right has 999 of 1000 taker units left, buying floor(1001 * 999 / 1000) = 999.
        // Left then pays floor(1000 * 999 / 1001) = 998 for 999 wanted.
        let left = Order::new(u(1000), u(1001));
        let right = Order::new(u(1001), u(1000));
        assert_eq!(
            with_filled(&left, &right, U256::zero(), u(1), false),
            Err(ExchangeError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_remaining_maker_amount_rounding_error() {
        // 1 of 2 taker units left buys 1.5 maker units
        let left = Order::new(u(3), u(2));
        let right = Order::new(u(2), u(1));
        assert_eq!(
            with_filled(&left, &right, u(1), U256::zero(), false),
            Err(ExchangeError::RoundingError {
                numerator: u(3),
                denominator: u(2),
                target: u(1),
            })
        );
    }

    // ------------------------------------------------------------------------
    // Failures
    // ------------------------------------------------------------------------

    #[test]
    fn test_negative_spread() {
        let left = Order::new(u(1), u(2)).with_hash(OrderHash([0xaa; 32]));
        let right = Order::new(u(1), u(1)).with_hash(OrderHash([0xbb; 32]));

        let expected = Err(ExchangeError::NegativeSpreadError {
            left_order_hash: OrderHash([0xaa; 32]),
            right_order_hash: OrderHash([0xbb; 32]),
        });
        assert_eq!(bounded(&left, &right), expected);
        assert_eq!(maximal(&left, &right), expected);
    }

    #[test]
    fn test_negative_spread_checked_before_transfers() {
        // Past the spread check this pair would divide by the zero left maker amount
        let left = Order::new(U256::zero(), u(5));
        let right = Order::new(u(10), u(3));
        assert!(matches!(
            maximal(&left, &right),
            Err(ExchangeError::NegativeSpreadError { .. })
        ));

        // ...and this one would fail the right maker rounding check
        let left = Order::new(u(1), u(5));
        let right = Order::new(u(10), u(3));
        assert!(matches!(
            maximal(&left, &right),
            Err(ExchangeError::NegativeSpreadError { .. })
        ));
    }

    #[test]
    fn test_spread_overflow() {
        let left = Order::new(U256::MAX, u(1));
        let right = Order::new(u(2), u(1));
        assert_eq!(bounded(&left, &right), Err(ExchangeError::ArithmeticOverflow));
    }

    #[test]
    fn test_fee_rounding_error() {
        let left = order(u(15), u(90));
        let right = Order::new(u(196), u(28)).with_fees(u(100), U256::zero());

        // floor(105 * 100 / 196) = 53 loses 0.57
        assert_eq!(
            maximal(&left, &right),
            Err(ExchangeError::RoundingError {
                numerator: u(105),
                denominator: u(196),
                target: u(100),
            })
        );
    }

    #[test]
    fn test_protocol_fee_overflow() {
        let left = order(u(7), u(4));
        let right = order(u(8), u(6));
        assert_eq!(
            calculate_matched_fill_results(&left, &right, U256::MAX, u(2), true),
            Err(ExchangeError::ArithmeticOverflow)
        );
    }
}
