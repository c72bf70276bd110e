//! # Deposit Contract Binding
//!
//! Port definition for the deposit contract.
//!
//! This module defines the [`DepositBinding`] trait with one method per
//! contract action. Each method takes the [`TransactOptions`] for the
//! transaction plus the action's arguments and returns the hash of the
//! submitted transaction. [`EthersDepositBinding`] is the on-chain
//! implementation.
//!
//! [`EthersDepositBinding`]: super::ethereum::EthersDepositBinding

use crate::domain::value_objects::Pricing;
use async_trait::async_trait;
use ethers::types::{Address, H256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error raised by a binding, kept opaque so any transport can plug in.
pub type BindingError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for binding calls.
pub type BindingResult<T> = Result<T, BindingError>;

/// Options attached to a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactOptions {
    /// Signer address.
    pub from: Address,
    /// Value attached in wei.
    pub value: U256,
    /// Gas limit in units.
    pub gas_limit: u64,
    /// Legacy gas price in wei.
    pub gas_price: U256,
}

/// Transaction hash, `0x` followed by 64 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Returns the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the hash and returns the string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<H256> for TxHash {
    fn from(hash: H256) -> Self {
        Self(format!("{hash:#x}"))
    }
}

impl From<TxHash> for String {
    fn from(hash: TxHash) -> Self {
        hash.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction-submitting side of the deposit contract.
///
/// Implementations submit exactly one transaction per call and return as
/// soon as the node accepts it. They do not wait for a receipt.
#[async_trait]
pub trait DepositBinding: Send + Sync + fmt::Debug {
    /// Calls `depositWithNodes(pool, places)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted.
    async fn deposit_with_nodes(
        &self,
        opts: &TransactOptions,
        pool: U256,
        places: U256,
    ) -> BindingResult<H256>;

    /// Calls `proposePricing(keep, write, cpu, gpu)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted.
    async fn propose_pricing(
        &self,
        opts: &TransactOptions,
        pricing: &Pricing,
    ) -> BindingResult<H256>;

    /// Calls `changePool(pool, places)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted.
    async fn change_pool(
        &self,
        opts: &TransactOptions,
        pool: U256,
        places: U256,
    ) -> BindingResult<H256>;

    /// Calls `createInvoice(start, end, user, keep, write, cpu, gpu)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted.
    async fn create_invoice(
        &self,
        opts: &TransactOptions,
        height_start: U256,
        height_end: U256,
        user: Address,
        resources: &Pricing,
    ) -> BindingResult<H256>;

    /// Calls `registerNode(node, keep, write, cpu, gpu)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted.
    async fn register_node(
        &self,
        opts: &TransactOptions,
        node: Address,
        pricing: &Pricing,
    ) -> BindingResult<H256>;

    /// Calls `changeNodePricing(keep, write, cpu, gpu)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted.
    async fn change_node_pricing(
        &self,
        opts: &TransactOptions,
        pricing: &Pricing,
    ) -> BindingResult<H256>;

    /// Calls `withdraw(node)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be submitted.
    async fn withdraw(&self, opts: &TransactOptions, node: Address) -> BindingResult<H256>;
}
