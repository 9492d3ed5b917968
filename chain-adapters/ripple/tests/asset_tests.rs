//! Unit tests for the ripple asset grammar and address handling

use chain_adapter_ripple::address::{
    decode_account_id, is_valid_address, public_key_to_address,
};
use chain_adapter_ripple::{RippleAsset, RippleCurrency};
use router_core::TokenConfigError;

// Canonical rippled example account: master public key and the account
// address it derives to.
const GENESIS_PUBKEY: &str = "0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020";
const GENESIS_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

// ============================================================================
// ASSET GRAMMAR TESTS
// ============================================================================

/// What is tested: parsing the native token address "XRP"
/// Why: native assets decompose to the bare currency with no issuer
#[test]
fn test_parse_native_asset() {
    let asset = RippleAsset::parse("XRP").unwrap();
    assert_eq!(asset.currency, "XRP");
    assert_eq!(asset.issuer, "");
    assert!(asset.is_native());
}

/// What is tested: parsing a "Currency/Issuer" token address
/// Why: issued assets must decompose into both components
#[test]
fn test_parse_issued_asset() {
    let asset = RippleAsset::parse(&format!("USD/{}", GENESIS_ADDRESS)).unwrap();
    assert_eq!(asset.currency, "USD");
    assert_eq!(asset.issuer, GENESIS_ADDRESS);
    assert!(!asset.is_native());
}

/// What is tested: strings outside the asset grammar are rejected
/// Why: a malformed address must fail parsing, not downstream validation
#[test]
fn test_parse_malformed_asset() {
    for bad in ["USD", "", "/rSomeIssuer"] {
        assert_eq!(
            RippleAsset::parse(bad).unwrap_err(),
            TokenConfigError::MalformedAssetAddress(bad.to_string())
        );
    }
}

/// What is tested: currency code validation accepts the standard and hex forms
/// Why: both 3-character and 160-bit hex currency codes exist on the ledger
#[test]
fn test_currency_validation() {
    assert!(RippleCurrency::new("XRP").unwrap().is_native());
    assert!(!RippleCurrency::new("USD").unwrap().is_native());
    RippleCurrency::new("E$P").unwrap();
    RippleCurrency::new("0158415500000000C1F76FF6ECB0BAC600000000").unwrap();

    for bad in ["", "US", "USDX", "U D", "0158415500000000C1F76FF6ECB0BAC6000000"] {
        assert_eq!(
            RippleCurrency::new(bad).unwrap_err(),
            TokenConfigError::InvalidCurrency(bad.to_string())
        );
    }
}

// ============================================================================
// ADDRESS TESTS
// ============================================================================

/// What is tested: validation of well-formed and malformed account addresses
/// Why: address validation gates both issuer registration and router trust
#[test]
fn test_address_validation() {
    assert!(is_valid_address(GENESIS_ADDRESS));

    assert!(!is_valid_address(""));
    assert!(!is_valid_address("0x1234"));
    // '0' is outside the ripple base58 alphabet
    assert!(!is_valid_address("r0b9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
    // Corrupted checksum
    assert!(!is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTg"));
}

/// What is tested: account id derivation from a public key
/// Why: the MPC trust check relies on RIPEMD160(SHA256(pubkey)) matching
/// the claimed custodian address
#[test]
fn test_public_key_to_address() {
    let derived = public_key_to_address(GENESIS_PUBKEY).unwrap();
    assert_eq!(derived, GENESIS_ADDRESS);

    let account_id = decode_account_id(&derived).unwrap();
    assert_eq!(account_id.len(), 20);

    assert!(public_key_to_address("not-hex").is_err());
    assert!(public_key_to_address("").is_err());
}
