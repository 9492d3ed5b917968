//! Tron Address Module
//!
//! Base58check addresses: a 0x41 prefix byte followed by the last 20 bytes
//! of the keccak256 hash of the uncompressed secp256k1 public key.

use anyhow::{Context, Result};
use sha3::{Digest, Keccak256};

/// Prefix byte of every tron address.
const ADDRESS_PREFIX: u8 = 0x41;

/// Raw byte length of an address, prefix included.
const ADDRESS_LEN: usize = 21;

/// Whether the string is a well-formed tron base58check address.
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_some()
}

/// Decodes a base58check address into its 21 raw bytes.
pub fn decode_address(address: &str) -> Option<[u8; ADDRESS_LEN]> {
    let bytes = bs58::decode(address).with_check(None).into_vec().ok()?;
    if bytes.len() != ADDRESS_LEN || bytes[0] != ADDRESS_PREFIX {
        return None;
    }
    let mut raw = [0u8; ADDRESS_LEN];
    raw.copy_from_slice(&bytes);
    Some(raw)
}

/// The 20-byte account part of an address as 0x-hex, the form the
/// ethereum-compatible JSON-RPC surface expects.
pub fn to_eth_hex(address: &str) -> Option<String> {
    let raw = decode_address(address)?;
    Some(format!("0x{}", hex::encode(&raw[1..])))
}

/// Encodes a 20-byte account into its base58check address.
pub fn from_account_bytes(account: &[u8]) -> String {
    let mut payload = Vec::with_capacity(ADDRESS_LEN);
    payload.push(ADDRESS_PREFIX);
    payload.extend_from_slice(account);
    bs58::encode(payload).with_check().into_string()
}

/// Derives the address of a hex-encoded uncompressed secp256k1 public key.
///
/// Accepts the 65-byte form with the 0x04 tag or the 64-byte raw x||y form.
pub fn public_key_to_address(public_key_hex: &str) -> Result<String> {
    let public_key = hex::decode(public_key_hex.trim_start_matches("0x"))
        .context("public key is not valid hex")?;
    let raw: &[u8] = match public_key.len() {
        65 if public_key[0] == 0x04 => &public_key[1..],
        64 => &public_key,
        n => anyhow::bail!("unexpected public key length {}", n),
    };

    let digest = Keccak256::digest(raw);
    Ok(from_account_bytes(&digest[12..]))
}
