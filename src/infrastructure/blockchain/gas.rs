//! # Gas Settings
//!
//! Gas limit and gas price applied to every submitted transaction.
//!
//! The client never estimates gas and never asks the node for a suggested
//! price. The limit is always the configured value, and an unset price is
//! submitted as an explicit zero legacy gas price. Callers that need a
//! non-zero price must opt in with [`GasSettings::with_gas_price`].

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default gas limit for contract calls.
pub const DEFAULT_GAS_LIMIT: u64 = 210_000;

/// Gas configuration for submitted transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSettings {
    /// Gas limit in units.
    gas_limit: u64,
    /// Legacy gas price in wei, if the caller set one.
    gas_price: Option<U256>,
}

impl GasSettings {
    /// Creates settings with the given limit and no gas price.
    #[must_use]
    pub const fn new(gas_limit: u64) -> Self {
        Self {
            gas_limit,
            gas_price: None,
        }
    }

    /// Sets the gas limit.
    #[must_use]
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Sets the gas price in wei.
    #[must_use]
    pub fn with_gas_price(mut self, gas_price: impl Into<U256>) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }

    /// Returns the gas limit.
    #[inline]
    #[must_use]
    pub const fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Returns the gas price if one was set.
    #[inline]
    #[must_use]
    pub const fn gas_price(&self) -> Option<U256> {
        self.gas_price
    }

    /// Returns the gas price that will be submitted (zero when unset).
    #[must_use]
    pub fn effective_gas_price(&self) -> U256 {
        self.gas_price.unwrap_or_default()
    }
}

impl Default for GasSettings {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_LIMIT)
    }
}

impl fmt::Display for GasSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gas_price {
            Some(price) => write!(f, "limit={} price={} wei", self.gas_limit, price),
            None => write!(f, "limit={} price=unset", self.gas_limit),
        }
    }
}
