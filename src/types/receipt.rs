//! Conformance receipt for batches of calculations.
//!
//! A `ConformanceReceipt` folds every result it is shown, success or failure,
//! into a running SHA-256 digest. Two implementations that agree on every
//! amount and every error produce the same digest, so a whole randomized run
//! can be compared through one 32-byte value.

use std::fmt;

use primitive_types::U256;
use sha2::{Digest, Sha256};

use crate::error::{ExchangeError, Result};
use crate::types::{FillResults, MatchedFillResults};

const TAG_OK: u8 = 0x00;
const TAG_ERR: u8 = 0x01;

/// Running digest over a sequence of calculation results.
///
/// ## Encoding
///
/// Each record is a tag byte (`0x00` ok, `0x01` error) followed by:
///
/// - ok: every 256-bit word of the value, big-endian, in field order
///   (flags are a single `0x00`/`0x01` byte)
/// - error: the ASCII error code, then the words carried by the error
///
/// ## Example
///
/// ```
/// use exchange_math::math::get_partial_amount_floor;
/// use exchange_math::types::ConformanceReceipt;
/// use primitive_types::U256;
///
/// let mut receipt = ConformanceReceipt::new();
/// receipt.record_amount(&get_partial_amount_floor(U256::from(1u64), U256::from(3u64), U256::from(9u64)));
/// receipt.record_amount(&get_partial_amount_floor(U256::from(1u64), U256::zero(), U256::from(9u64)));
///
/// assert_eq!(receipt.calls(), 2);
/// assert_eq!(receipt.failures(), 1);
/// assert_eq!(receipt.digest_hex().len(), 64);
/// ```
#[derive(Clone, Default)]
pub struct ConformanceReceipt {
    hasher: Sha256,
    calls: u64,
    failures: u64,
}

impl ConformanceReceipt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of results recorded
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Number of recorded results that were errors
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn record_amount(&mut self, result: &Result<U256>) {
        self.record_with(result, |hasher, amount| update_word(hasher, amount));
    }

    pub fn record_flag(&mut self, result: &Result<bool>) {
        self.record_with(result, |hasher, flag| hasher.update([u8::from(*flag)]));
    }

    pub fn record_fill(&mut self, result: &Result<FillResults>) {
        self.record_with(result, update_fill);
    }

    pub fn record_match(&mut self, result: &Result<MatchedFillResults>) {
        self.record_with(result, |hasher, matched| {
            update_fill(hasher, &matched.left);
            update_fill(hasher, &matched.right);
            update_word(hasher, &matched.profit_in_left_maker_asset);
            update_word(hasher, &matched.profit_in_right_maker_asset);
        });
    }

    /// Digest of everything recorded so far; the receipt stays usable
    pub fn digest(&self) -> [u8; 32] {
        self.hasher.clone().finalize().into()
    }

    /// Consume the receipt and return its digest
    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }

    /// Get the digest as a hex string
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }

    fn record_with<T>(&mut self, result: &Result<T>, encode: impl FnOnce(&mut Sha256, &T)) {
        self.calls += 1;
        match result {
            Ok(value) => {
                self.hasher.update([TAG_OK]);
                encode(&mut self.hasher, value);
            }
            Err(err) => {
                self.failures += 1;
                self.hasher.update([TAG_ERR]);
                update_error(&mut self.hasher, err);
            }
        }
    }
}

impl fmt::Debug for ConformanceReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConformanceReceipt")
            .field("calls", &self.calls)
            .field("failures", &self.failures)
            .field("digest", &self.digest_hex())
            .finish()
    }
}

fn update_word(hasher: &mut Sha256, word: &U256) {
    let mut bytes = [0u8; 32];
    word.to_big_endian(&mut bytes);
    hasher.update(bytes);
}

fn update_fill(hasher: &mut Sha256, fill: &FillResults) {
    update_word(hasher, &fill.maker_asset_filled_amount);
    update_word(hasher, &fill.taker_asset_filled_amount);
    update_word(hasher, &fill.maker_fee_paid);
    update_word(hasher, &fill.taker_fee_paid);
    update_word(hasher, &fill.protocol_fee_paid);
}

fn update_error(hasher: &mut Sha256, err: &ExchangeError) {
    hasher.update(err.code().as_bytes());
    match err {
        ExchangeError::RoundingError {
            numerator,
            denominator,
            target,
        } => {
            update_word(hasher, numerator);
            update_word(hasher, denominator);
            update_word(hasher, target);
        }
        ExchangeError::NegativeSpreadError {
            left_order_hash,
            right_order_hash,
        } => {
            hasher.update(left_order_hash.as_bytes());
            hasher.update(right_order_hash.as_bytes());
        }
        ExchangeError::DivisionByZero | ExchangeError::ArithmeticOverflow => {}
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
