//! # Invoice
//!
//! A bill for resources consumed by a user over a block-height range.

use super::address::{AddressError, ChainAddress};
use super::pricing::Pricing;
use ethers::types::U256;
use serde::{Deserialize, Serialize};

/// Resource usage billed to a user between two block heights.
///
/// The user address is kept as the caller supplied it and validated when
/// the invoice is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// First block of the billed range.
    height_start: U256,
    /// Last block of the billed range.
    height_end: U256,
    /// Hex-encoded address of the billed user.
    user: String,
    /// Resources consumed, in the same shape as [`Pricing`].
    resources: Pricing,
}

impl Invoice {
    /// Creates a new invoice.
    #[must_use]
    pub fn new(
        height_start: impl Into<U256>,
        height_end: impl Into<U256>,
        user: impl Into<String>,
        resources: Pricing,
    ) -> Self {
        Self {
            height_start: height_start.into(),
            height_end: height_end.into(),
            user: user.into(),
            resources,
        }
    }

    /// Returns the first billed block.
    #[inline]
    #[must_use]
    pub const fn height_start(&self) -> U256 {
        self.height_start
    }

    /// Returns the last billed block.
    #[inline]
    #[must_use]
    pub const fn height_end(&self) -> U256 {
        self.height_end
    }

    /// Returns the user address as supplied.
    #[inline]
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the billed resources.
    #[inline]
    #[must_use]
    pub const fn resources(&self) -> &Pricing {
        &self.resources
    }

    /// Parses the user address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] if the user address is malformed.
    pub fn user_address(&self) -> Result<ChainAddress, AddressError> {
        ChainAddress::parse(&self.user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn user_address_valid() {
        let invoice = Invoice::new(
            10u64,
            20u64,
            "0x99665E952674a8ba03e8e91A09B0163be5DcfB5A",
            Pricing::uniform(1u64),
        );
        assert!(invoice.user_address().is_ok());
        assert_eq!(invoice.height_start(), U256::from(10));
        assert_eq!(invoice.height_end(), U256::from(20));
    }

    #[test]
    fn user_address_invalid() {
        let invoice = Invoice::new(0u64, 1u64, "bob", Pricing::default());
        assert!(invoice.user_address().is_err());
        assert_eq!(invoice.user(), "bob");
    }
}
