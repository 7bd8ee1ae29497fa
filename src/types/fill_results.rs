//! Output records of the fill and match calculators.
//!
//! Both records are produced fresh by each call and never mutated afterwards.
//! All amounts are 256-bit unsigned words in base units of their asset.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::word::checked_add;

/// Amounts moved by filling a single order.
///
/// ## Example
///
/// ```
/// use exchange_math::types::FillResults;
/// use primitive_types::U256;
///
/// let a = FillResults {
///     maker_asset_filled_amount: U256::from(10u64),
///     ..FillResults::default()
/// };
/// let total = a.checked_add(&a).unwrap();
/// assert_eq!(total.maker_asset_filled_amount, U256::from(20u64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillResults {
    /// Maker asset transferred from the maker
    pub maker_asset_filled_amount: U256,

    /// Taker asset transferred to the maker
    pub taker_asset_filled_amount: U256,

    /// Fee paid by the maker
    pub maker_fee_paid: U256,

    /// Fee paid by the taker
    pub taker_fee_paid: U256,

    /// Protocol fee, `multiplier * gas_price`
    pub protocol_fee_paid: U256,
}

impl FillResults {
    /// Field-wise sum of two fill results.
    ///
    /// Fails with `ArithmeticOverflow` if any field overflows.
    pub fn checked_add(&self, other: &FillResults) -> Result<FillResults> {
        Ok(FillResults {
            maker_asset_filled_amount: checked_add(
                self.maker_asset_filled_amount,
                other.maker_asset_filled_amount,
            )?,
            taker_asset_filled_amount: checked_add(
                self.taker_asset_filled_amount,
                other.taker_asset_filled_amount,
            )?,
            maker_fee_paid: checked_add(self.maker_fee_paid, other.maker_fee_paid)?,
            taker_fee_paid: checked_add(self.taker_fee_paid, other.taker_fee_paid)?,
            protocol_fee_paid: checked_add(self.protocol_fee_paid, other.protocol_fee_paid)?,
        })
    }
}

/// Amounts moved by matching a left order against a right order.
///
/// The matcher (the party submitting the match) keeps whatever surplus the
/// spread leaves, expressed in each maker's asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedFillResults {
    /// Fill of the left order
    pub left: FillResults,

    /// Fill of the right order
    pub right: FillResults,

    /// Surplus denominated in the left maker's asset
    pub profit_in_left_maker_asset: U256,

    /// Surplus denominated in the right maker's asset
    pub profit_in_right_maker_asset: U256,
}

impl MatchedFillResults {
    /// True if neither maker asset yields a surplus
    pub fn is_profitless(&self) -> bool {
        self.profit_in_left_maker_asset.is_zero() && self.profit_in_right_maker_asset.is_zero()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
