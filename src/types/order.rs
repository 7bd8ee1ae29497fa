//! Order record consumed by the fill and match calculators.
//!
//! ## Numeric Fields
//!
//! Only four fields take part in the arithmetic: `maker_asset_amount`,
//! `taker_asset_amount`, `maker_fee` and `taker_fee`. They are 256-bit
//! unsigned words and may be zero.
//!
//! ## Opaque Fields
//!
//! Addresses, asset-data blobs, expiry and salt are carried through
//! unexamined. The `hash` is supplied by the order-hashing component and is
//! only used to name orders in errors.

use std::fmt;
use std::str::FromStr;

use primitive_types::{H160, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// OrderHash
// ============================================================================

/// 32-byte order identifier.
///
/// Displayed and parsed as `0x`-prefixed lowercase hex.
///
/// ## Example
///
/// ```
/// use exchange_math::types::OrderHash;
///
/// let hash: OrderHash = "0x0101010101010101010101010101010101010101010101010101010101010101"
///     .parse()
///     .unwrap();
/// assert_eq!(hash, OrderHash([1u8; 32]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct OrderHash(pub [u8; 32]);

impl OrderHash {
    /// Raw bytes of the hash
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for OrderHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for OrderHash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for OrderHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A signed order as seen by the arithmetic core.
///
/// ## Example
///
/// ```
/// use exchange_math::types::Order;
/// use primitive_types::U256;
///
/// // Sell 17 units of the maker asset for 98 units of the taker asset
/// let order = Order::new(U256::from(17u64), U256::from(98u64))
///     .with_fees(U256::from(1u64), U256::zero());
///
/// assert_eq!(order.maker_asset_amount, U256::from(17u64));
/// assert_eq!(order.maker_fee, U256::one());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Identifier computed by the hashing component
    pub hash: OrderHash,

    pub maker_address: H160,
    pub taker_address: H160,
    pub fee_recipient_address: H160,
    pub sender_address: H160,

    /// Amount of the maker asset offered
    pub maker_asset_amount: U256,

    /// Amount of the taker asset requested
    pub taker_asset_amount: U256,

    /// Fee paid by the maker for a complete fill
    pub maker_fee: U256,

    /// Fee paid by the taker for a complete fill
    pub taker_fee: U256,

    pub expiration_time_seconds: U256,
    pub salt: U256,

    #[serde(with = "hex_bytes")]
    pub maker_asset_data: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub taker_asset_data: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub maker_fee_asset_data: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub taker_fee_asset_data: Vec<u8>,
}

impl Order {
    /// Create an order with the given asset amounts and zero fees.
    ///
    /// All opaque fields are left at their defaults.
    pub fn new(maker_asset_amount: U256, taker_asset_amount: U256) -> Self {
        Self {
            maker_asset_amount,
            taker_asset_amount,
            ..Self::default()
        }
    }

    /// Set the maker and taker fees
    pub fn with_fees(mut self, maker_fee: U256, taker_fee: U256) -> Self {
        self.maker_fee = maker_fee;
        self.taker_fee = taker_fee;
        self
    }

    /// Set the order identifier
    pub fn with_hash(mut self, hash: OrderHash) -> Self {
        self.hash = hash;
        self
    }
}

/// Asset-data blobs travel as `0x`-prefixed hex strings.
mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(D::Error::custom)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
