//! Cardano Chain Types Module
//!
//! UTXO bookkeeping types plus the chain's asset descriptor. Asset ids are
//! either the native unit "lovelace" or "policyId.assetName" where the
//! policy id is a 56-hex-character script hash.

use serde::{Deserialize, Serialize};

use router_core::TokenConfigError;

/// The chain's native unit.
pub const NATIVE_ASSET: &str = "lovelace";

/// Decimals of the native unit (lovelace per ADA).
pub const NATIVE_DECIMALS: u8 = 6;

/// Hex length of a minting policy id (blake2b-224 script hash).
const POLICY_ID_HEX_LEN: usize = 56;

/// Maximum byte length of an on-chain asset name.
const ASSET_NAME_MAX_LEN: usize = 32;

/// Uniquely identifies a spendable output. Used as a map key, so it has
/// value equality and a stable hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtxoKey {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
    #[serde(rename = "txIndex")]
    pub tx_index: u64,
}

/// One spendable output as reported by the chain endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Utxo {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
    pub index: u64,
    pub value: String,
}

impl Utxo {
    /// The output's map key.
    pub fn key(&self) -> UtxoKey {
        UtxoKey {
            tx_hash: self.tx_hash.clone(),
            tx_index: self.index,
        }
    }
}

/// Chain tip as reported by the chain endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Tip {
    #[serde(rename = "number")]
    pub block: u64,
    #[serde(rename = "slotNo")]
    pub slot: u64,
    pub hash: String,
}

/// Parsed cardano asset descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardanoAsset {
    /// Minting policy id (empty for the native unit)
    pub policy_id: String,
    /// Asset name within the policy (empty for the native unit)
    pub asset_name: String,
}

impl CardanoAsset {
    /// Parses an asset id of the form "lovelace" or "policyId.assetName".
    pub fn parse(asset_id: &str) -> Result<Self, TokenConfigError> {
        if asset_id == NATIVE_ASSET {
            return Ok(Self {
                policy_id: String::new(),
                asset_name: String::new(),
            });
        }
        let (policy_id, asset_name) = asset_id
            .split_once('.')
            .ok_or_else(|| TokenConfigError::MalformedAssetAddress(asset_id.to_string()))?;
        let policy_ok = policy_id.len() == POLICY_ID_HEX_LEN
            && policy_id.chars().all(|c| c.is_ascii_hexdigit());
        if !policy_ok {
            return Err(TokenConfigError::MalformedAssetAddress(asset_id.to_string()));
        }
        if asset_name.is_empty() || asset_name.len() > ASSET_NAME_MAX_LEN {
            return Err(TokenConfigError::InvalidCurrency(asset_name.to_string()));
        }
        Ok(Self {
            policy_id: policy_id.to_string(),
            asset_name: asset_name.to_string(),
        })
    }

    /// Whether this asset is the native unit.
    pub fn is_native(&self) -> bool {
        self.policy_id.is_empty()
    }
}
