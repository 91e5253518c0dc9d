//! Gas-fee derivation from raw gateway answers.
//!
//! # Responsibilities
//! - Parse the `0x`-prefixed hex gas price into an arbitrary-precision value
//! - Multiply by the per-transaction gas limit of the asset kind
//! - Convert smallest on-chain units into the display unit
//!
//! # Design Decisions
//! - Numeric/format faults are terminal, never retried: they indicate a
//!   malformed or unsupported answer, not transient unavailability

use alloy::primitives::{
    utils::{ParseUnits, Unit},
    U256,
};

use crate::error::{ChainError, ChainResult};

/// Gas limit for a native-asset transfer.
pub const NATIVE_TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Gas limit for an ERC-20 token transfer.
pub const TOKEN_TRANSFER_GAS_LIMIT: u64 = 55_000;

/// What kind of asset the pending transaction moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Native,
    Token,
}

impl AssetKind {
    /// Per-transaction gas limit for this asset kind.
    pub fn gas_limit(&self) -> u64 {
        match self {
            AssetKind::Native => NATIVE_TRANSFER_GAS_LIMIT,
            AssetKind::Token => TOKEN_TRANSFER_GAS_LIMIT,
        }
    }
}

/// Derive the transaction fee, in smallest on-chain units, from a raw
/// hexadecimal gas price answer (`"0x3b9aca00"` style).
pub fn derive_fee(gas_price_hex: &str, kind: AssetKind) -> ChainResult<U256> {
    let digits = gas_price_hex.strip_prefix("0x").ok_or_else(|| {
        ChainError::NumericFormat(format!("gas price '{}' missing 0x prefix", gas_price_hex))
    })?;
    let price = U256::from_str_radix(digits, 16)
        .map_err(|e| ChainError::NumericFormat(format!("gas price '{}': {}", gas_price_hex, e)))?;

    price
        .checked_mul(U256::from(kind.gas_limit()))
        .ok_or_else(|| ChainError::NumericFormat("fee overflows 256 bits".to_string()))
}

/// Format a fee in smallest units as a gwei display string.
pub fn fee_display_gwei(fee: U256) -> String {
    ParseUnits::U256(fee).format_units(Unit::GWEI)
}
