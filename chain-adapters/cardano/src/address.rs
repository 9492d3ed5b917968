//! Cardano Address Module
//!
//! Enterprise addresses: a header byte carrying the address type and
//! network tag, followed by the blake2b-224 hash of the ed25519 payment
//! key, bech32-encoded with the "addr" (mainnet) or "addr_test" (testnet)
//! prefix.

use anyhow::{Context, Result};
use bech32::{FromBase32, ToBase32, Variant};
use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;

/// Enterprise address header for mainnet (type 0b0110, network tag 1).
const ENTERPRISE_HEADER_MAINNET: u8 = 0x61;

/// Enterprise address header for testnets (network tag 0).
const ENTERPRISE_HEADER_TESTNET: u8 = 0x60;

/// Byte length of a blake2b-224 key hash.
const KEY_HASH_LEN: usize = 28;

/// Whether the string is a well-formed cardano address.
pub fn is_valid_address(address: &str) -> bool {
    let Ok((hrp, data, variant)) = bech32::decode(address) else {
        return false;
    };
    if variant != Variant::Bech32 {
        return false;
    }
    if hrp != "addr" && hrp != "addr_test" {
        return false;
    }
    let Ok(bytes) = Vec::<u8>::from_base32(&data) else {
        return false;
    };
    // header + payment hash, optionally followed by a stake hash
    matches!(bytes.len(), l if l == 1 + KEY_HASH_LEN || l == 1 + 2 * KEY_HASH_LEN)
}

/// Whether the address carries the testnet prefix.
pub fn is_testnet_address(address: &str) -> bool {
    address.starts_with("addr_test1")
}

/// Derives the enterprise address for a hex-encoded ed25519 payment key.
pub fn public_key_to_address(public_key_hex: &str, mainnet: bool) -> Result<String> {
    let public_key = hex::decode(public_key_hex.trim_start_matches("0x"))
        .context("public key is not valid hex")?;
    if public_key.is_empty() {
        anyhow::bail!("public key is empty");
    }

    let mut hasher = Blake2bVar::new(KEY_HASH_LEN).context("blake2b-224 init failed")?;
    hasher.update(&public_key);
    let mut key_hash = [0u8; KEY_HASH_LEN];
    hasher
        .finalize_variable(&mut key_hash)
        .context("blake2b-224 finalize failed")?;

    let (header, hrp) = if mainnet {
        (ENTERPRISE_HEADER_MAINNET, "addr")
    } else {
        (ENTERPRISE_HEADER_TESTNET, "addr_test")
    };
    let mut payload = Vec::with_capacity(1 + KEY_HASH_LEN);
    payload.push(header);
    payload.extend_from_slice(&key_hash);

    bech32::encode(hrp, payload.to_base32(), Variant::Bech32).context("bech32 encoding failed")
}
