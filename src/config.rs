//! Protocol fee policy.
//!
//! The fill and match calculators take the protocol fee multiplier and gas
//! price as plain words. `ProtocolFeeConfig` is the policy that supplies
//! them, loaded from the environment by the binary:
//!
//! - `EXCHANGE_PROTOCOL_FEE_MULTIPLIER` (default 150000)
//! - `EXCHANGE_GAS_PRICE` (default 0)
//!
//! Both are decimal integers. A missing variable keeps its default; a
//! malformed one is an error rather than a silent fallback.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Result;
use crate::math::word::checked_mul;

pub const PROTOCOL_FEE_MULTIPLIER_VAR: &str = "EXCHANGE_PROTOCOL_FEE_MULTIPLIER";
pub const GAS_PRICE_VAR: &str = "EXCHANGE_GAS_PRICE";

/// Standard protocol fee multiplier
pub const DEFAULT_PROTOCOL_FEE_MULTIPLIER: u64 = 150_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a decimal integer below 2^256, got {value:?}")]
    InvalidInteger { name: &'static str, value: String },
}

/// Protocol fee multiplier and gas price applied to every fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolFeeConfig {
    pub multiplier: U256,
    pub gas_price: U256,
}

impl Default for ProtocolFeeConfig {
    fn default() -> Self {
        Self {
            multiplier: U256::from(DEFAULT_PROTOCOL_FEE_MULTIPLIER),
            gas_price: U256::zero(),
        }
    }
}

impl ProtocolFeeConfig {
    pub fn new(multiplier: U256, gas_price: U256) -> Self {
        Self { multiplier, gas_price }
    }

    /// Load from process environment variables.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            multiplier: parse_var(&lookup, PROTOCOL_FEE_MULTIPLIER_VAR)?
                .unwrap_or(defaults.multiplier),
            gas_price: parse_var(&lookup, GAS_PRICE_VAR)?.unwrap_or(defaults.gas_price),
        })
    }

    /// `multiplier * gas_price`, failing with `ArithmeticOverflow`
    pub fn protocol_fee(&self) -> Result<U256> {
        checked_mul(self.multiplier, self.gas_price)
    }
}

fn parse_var<F>(lookup: &F, name: &'static str) -> std::result::Result<Option<U256>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidInteger { name, value: raw });
    }
    U256::from_dec_str(trimmed)
        .map(Some)
        .map_err(|_| ConfigError::InvalidInteger { name, value: raw })
}

// ============================================================================
// Unit Tests
// ============================================================================
