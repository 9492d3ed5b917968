//! Ripple Asset Grammar Module
//!
//! Ripple token addresses are either the native unit "XRP" or a
//! "Currency/Issuer" pair. Currency codes come in the standard 3-character
//! form or the 160-bit hex form (40 hex characters).

use serde::{Deserialize, Serialize};

use router_core::TokenConfigError;

/// The chain's native currency unit.
pub const NATIVE_CURRENCY: &str = "XRP";

/// Ledger-mandated decimals for the native unit (drops per XRP).
pub const NATIVE_DECIMALS: u8 = 6;

/// Characters allowed in a standard 3-character currency code.
const CURRENCY_SYMBOLS: &str = "?!@#$%^&*<>(){}[]|";

/// Parsed ripple asset descriptor.
///
/// Native assets never carry an issuer; whether a non-native asset's issuer
/// is present and well formed is checked by the token config validator, not
/// by parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RippleAsset {
    /// Currency component of the token address
    pub currency: String,
    /// Issuer account address (empty for the native unit)
    pub issuer: String,
}

impl RippleAsset {
    /// Parses a token address of the form "XRP" or "Currency/Issuer".
    pub fn parse(token_address: &str) -> Result<Self, TokenConfigError> {
        if token_address == NATIVE_CURRENCY {
            return Ok(Self {
                currency: NATIVE_CURRENCY.to_string(),
                issuer: String::new(),
            });
        }
        match token_address.split_once('/') {
            Some((currency, issuer)) if !currency.is_empty() => Ok(Self {
                currency: currency.to_string(),
                issuer: issuer.to_string(),
            }),
            _ => Err(TokenConfigError::MalformedAssetAddress(
                token_address.to_string(),
            )),
        }
    }

    /// Whether this asset is the chain's native unit.
    pub fn is_native(&self) -> bool {
        self.currency == NATIVE_CURRENCY
    }
}

/// Validated ripple currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RippleCurrency(String);

impl RippleCurrency {
    /// Validates a currency code: "XRP", a standard 3-character code, or the
    /// 40-hex-character 160-bit form.
    pub fn new(code: &str) -> Result<Self, TokenConfigError> {
        if code == NATIVE_CURRENCY {
            return Ok(Self(code.to_string()));
        }
        let standard = code.len() == 3
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || CURRENCY_SYMBOLS.contains(c));
        let hex_form = code.len() == 40 && code.chars().all(|c| c.is_ascii_hexdigit());
        if standard || hex_form {
            Ok(Self(code.to_string()))
        } else {
            Err(TokenConfigError::InvalidCurrency(code.to_string()))
        }
    }

    /// Whether this is the native currency.
    pub fn is_native(&self) -> bool {
        self.0 == NATIVE_CURRENCY
    }

    /// The validated code.
    pub fn code(&self) -> &str {
        &self.0
    }
}
