//! Unit tests for tron addresses

use chain_adapter_tron::address::{
    decode_address, from_account_bytes, is_valid_address, public_key_to_address, to_eth_hex,
};

const USDT_CONTRACT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

// 64-byte raw x||y public key
const RAW_PUBKEY: &str = "e6f04522f875c1563682ca876ddb04c2e2e3ae718e3ff9f11c03dd9f9dccf698\
                          1aab0f654bbc9d36e1a06578fa63a4c8e0d07624c149c77e3e6d9e88f655a844";

// ============================================================================
// VALIDATION TESTS
// ============================================================================

/// What is tested: base58check validation of well-formed and malformed
/// addresses
/// Why: validation gates token configs and the custodian address
#[test]
fn test_address_validation() {
    assert!(is_valid_address(USDT_CONTRACT));

    assert!(!is_valid_address(""));
    assert!(!is_valid_address("0xdac17f958d2ee523a2206206994597c13d831ec7"));
    assert!(!is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));

    let mut corrupted = USDT_CONTRACT.to_string();
    corrupted.pop();
    corrupted.push('1');
    assert!(!is_valid_address(&corrupted));
}

/// What is tested: raw decode and the 0x-hex form used for contract calls
/// Why: eth_call wants the bare 20-byte account, not the base58check form
#[test]
fn test_decode_and_eth_hex() {
    let raw = decode_address(USDT_CONTRACT).unwrap();
    assert_eq!(raw[0], 0x41);

    let eth_hex = to_eth_hex(USDT_CONTRACT).unwrap();
    assert_eq!(eth_hex, format!("0x{}", hex::encode(&raw[1..])));

    assert!(to_eth_hex("not-an-address").is_none());
}

// ============================================================================
// DERIVATION TESTS
// ============================================================================

/// What is tested: address derivation from raw and 0x04-tagged public keys
/// Why: the MPC trust check compares the derived address with the one the
/// router contract resolves
#[test]
fn test_public_key_to_address() {
    let from_raw = public_key_to_address(RAW_PUBKEY).unwrap();
    assert!(from_raw.starts_with('T'));
    assert!(is_valid_address(&from_raw));

    let tagged = format!("04{}", RAW_PUBKEY);
    let from_tagged = public_key_to_address(&tagged).unwrap();
    assert_eq!(from_raw, from_tagged);

    let raw = decode_address(&from_raw).unwrap();
    assert_eq!(from_account_bytes(&raw[1..]), from_raw);
}

/// What is tested: malformed public keys are refused
/// Why: a wrong-length or non-hex key must surface as an error, not derive
/// some address
#[test]
fn test_public_key_rejects_malformed() {
    assert!(public_key_to_address("not-hex").is_err());
    // compressed keys are not accepted
    assert!(public_key_to_address(&RAW_PUBKEY[..66]).is_err());
    assert!(public_key_to_address(&format!("05{}", RAW_PUBKEY)).is_err());
}
