//! # Chain Address
//!
//! Validated 20-byte account address.
//!
//! Addresses arrive as hex strings from callers and configuration. They are
//! validated here, at the boundary, so that a malformed address never
//! reaches a contract call.
//!
//! # Examples
//!
//! ```
//! use sphere_client::domain::value_objects::ChainAddress;
//!
//! let addr = ChainAddress::parse("0x99665E952674a8ba03e8e91A09B0163be5DcfB5A").unwrap();
//! assert_eq!(addr.to_string(), "0x99665E952674a8ba03e8e91A09B0163be5DcfB5A");
//!
//! assert!(ChainAddress::parse("not-an-address").is_err());
//! ```

use ethers::types::Address;
use ethers::utils::{hex, to_checksum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of hex digits in an encoded address.
const ADDRESS_HEX_LEN: usize = 40;

/// Error returned when a string is not a well-formed address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Wrong number of hex digits after the optional prefix.
    #[error("expected 40 hex digits, got {0}")]
    Length(usize),

    /// A character outside `[0-9a-fA-F]`.
    #[error("address contains non-hex characters")]
    NotHex,
}

/// A syntactically valid 20-byte chain address.
///
/// Accepts an optional `0x`/`0X` prefix followed by exactly 40 hex digits.
/// Mixed-case checksums are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainAddress(Address);

impl ChainAddress {
    /// Parses a hex-encoded address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] if the input is not 40 hex digits with an
    /// optional `0x` prefix.
    pub fn parse(value: &str) -> Result<Self, AddressError> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);

        if digits.len() != ADDRESS_HEX_LEN {
            return Err(AddressError::Length(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::NotHex);
        }

        let bytes = hex::decode(digits).map_err(|_| AddressError::NotHex)?;
        Ok(Self(Address::from_slice(&bytes)))
    }

    /// Returns the underlying address.
    #[inline]
    #[must_use]
    pub const fn as_address(&self) -> Address {
        self.0
    }
}

impl FromStr for ChainAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ChainAddress> for Address {
    fn from(addr: ChainAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_checksum(&self.0, None))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CONTRACT: &str = "0x99665E952674a8ba03e8e91A09B0163be5DcfB5A";

    #[test]
    fn parse_checksummed() {
        let addr = ChainAddress::parse(CONTRACT).unwrap();
        assert_eq!(addr.to_string(), CONTRACT);
    }

    #[test]
    fn parse_without_prefix_and_lowercase() {
        let bare = ChainAddress::parse("99665e952674a8ba03e8e91a09b0163be5dcfb5a").unwrap();
        let upper_prefix = ChainAddress::parse("0X99665E952674A8BA03E8E91A09B0163BE5DCFB5A").unwrap();
        assert_eq!(bare, ChainAddress::parse(CONTRACT).unwrap());
        assert_eq!(bare, upper_prefix);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            ChainAddress::parse("not-an-address"),
            Err(AddressError::Length(14))
        );
        assert_eq!(ChainAddress::parse(""), Err(AddressError::Length(0)));
        assert_eq!(ChainAddress::parse("0x"), Err(AddressError::Length(0)));
    }

    #[test]
    fn rejects_non_hex_of_right_length() {
        let bad = "0xZZ665E952674a8ba03e8e91A09B0163be5DcfB5A";
        assert_eq!(ChainAddress::parse(bad), Err(AddressError::NotHex));
    }

    #[test]
    fn rejects_wrong_length() {
        // 19 bytes
        assert!(ChainAddress::parse("0x99665E952674a8ba03e8e91A09B0163be5DcfB").is_err());
        // 21 bytes
        assert!(ChainAddress::parse("0x99665E952674a8ba03e8e91A09B0163be5DcfB5A00").is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let addr: ChainAddress = CONTRACT.parse().unwrap();
        assert_eq!(Address::from(addr), ChainAddress::parse(CONTRACT).unwrap().as_address());
    }

    proptest! {
        #[test]
        fn any_forty_hex_digits_parse(digits in "[0-9a-fA-F]{40}") {
            let prefixed = format!("0x{digits}");
            prop_assert!(ChainAddress::parse(&digits).is_ok());
            prop_assert_eq!(ChainAddress::parse(&prefixed), ChainAddress::parse(&digits));
        }

        #[test]
        fn other_lengths_rejected(digits in "[0-9a-f]{0,80}") {
            prop_assume!(digits.len() != ADDRESS_HEX_LEN);
            prop_assert!(ChainAddress::parse(&digits).is_err());
        }
    }
}
