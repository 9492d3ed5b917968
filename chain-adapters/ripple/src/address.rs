//! Ripple Address Module
//!
//! Ripple account addresses are base58check strings over the ripple
//! alphabet: version byte 0x00, the 20-byte account id, and a 4-byte
//! double-SHA256 checksum. The account id is RIPEMD160(SHA256(pubkey)).

use anyhow::{Context, Result};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Version byte for ripple account addresses.
const ACCOUNT_ID_VERSION: u8 = 0x00;

/// Length of a decoded account id payload (version byte + 20-byte hash).
const ACCOUNT_ID_PAYLOAD_LEN: usize = 21;

/// Whether the string is a well-formed ripple account address.
pub fn is_valid_address(address: &str) -> bool {
    decode_account_id(address).is_some()
}

/// Decodes an address to its 20-byte account id, verifying alphabet,
/// version byte and checksum.
pub fn decode_account_id(address: &str) -> Option<[u8; 20]> {
    let payload = bs58::decode(address)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .with_check(Some(ACCOUNT_ID_VERSION))
        .into_vec()
        .ok()?;
    if payload.len() != ACCOUNT_ID_PAYLOAD_LEN {
        return None;
    }
    payload[1..].try_into().ok()
}

/// Derives the ripple account address for a hex-encoded public key.
pub fn public_key_to_address(public_key_hex: &str) -> Result<String> {
    let public_key = hex::decode(public_key_hex.trim_start_matches("0x"))
        .context("public key is not valid hex")?;
    if public_key.is_empty() {
        anyhow::bail!("public key is empty");
    }
    let sha = Sha256::digest(&public_key);
    let account_id = Ripemd160::digest(sha);

    let mut payload = Vec::with_capacity(ACCOUNT_ID_PAYLOAD_LEN);
    payload.push(ACCOUNT_ID_VERSION);
    payload.extend_from_slice(&account_id);
    Ok(bs58::encode(payload)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .with_check()
        .into_string())
}
