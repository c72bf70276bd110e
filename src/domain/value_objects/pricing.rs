//! # Pricing
//!
//! Resource prices a node charges, or resources an invoice bills for.
//!
//! The contract takes the four components as separate `uint256`
//! arguments in a fixed order: keep, write, cpu, gpu. Use
//! [`Pricing::contract_args`] rather than reading fields positionally.

use ethers::types::U256;
use serde::{Deserialize, Serialize};

/// Four per-unit resource prices.
///
/// Components are unsigned so a negative price is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pricing {
    /// Storage cost per byte kept.
    keep_per_byte: U256,
    /// Cost per byte written.
    write_per_byte: U256,
    /// Cost per CPU cycle.
    cpu_per_cycle: U256,
    /// Cost per GPU cycle.
    gpu_per_cycle: U256,
}

impl Pricing {
    /// Creates a new pricing record.
    #[must_use]
    pub fn new(
        keep_per_byte: impl Into<U256>,
        write_per_byte: impl Into<U256>,
        cpu_per_cycle: impl Into<U256>,
        gpu_per_cycle: impl Into<U256>,
    ) -> Self {
        Self {
            keep_per_byte: keep_per_byte.into(),
            write_per_byte: write_per_byte.into(),
            cpu_per_cycle: cpu_per_cycle.into(),
            gpu_per_cycle: gpu_per_cycle.into(),
        }
    }

    /// Creates a pricing record with every component set to `price`.
    #[must_use]
    pub fn uniform(price: impl Into<U256>) -> Self {
        let price = price.into();
        Self::new(price, price, price, price)
    }

    /// Returns the storage cost per byte.
    #[inline]
    #[must_use]
    pub const fn keep_per_byte(&self) -> U256 {
        self.keep_per_byte
    }

    /// Returns the cost per byte written.
    #[inline]
    #[must_use]
    pub const fn write_per_byte(&self) -> U256 {
        self.write_per_byte
    }

    /// Returns the cost per CPU cycle.
    #[inline]
    #[must_use]
    pub const fn cpu_per_cycle(&self) -> U256 {
        self.cpu_per_cycle
    }

    /// Returns the cost per GPU cycle.
    #[inline]
    #[must_use]
    pub const fn gpu_per_cycle(&self) -> U256 {
        self.gpu_per_cycle
    }

    /// Returns the components in contract argument order.
    #[must_use]
    pub const fn contract_args(&self) -> (U256, U256, U256, U256) {
        (
            self.keep_per_byte,
            self.write_per_byte,
            self.cpu_per_cycle,
            self.gpu_per_cycle,
        )
    }
}
