//! # Sphere Client
//!
//! Client for submitting transactions to the Sphere deposit contract.
//!
//! The crate signs transactions with a locally held key and submits them to
//! a chain node over JSON-RPC, via HTTP or WebSocket. It covers the
//! contract's state-changing actions: deposits, pool changes, pricing
//! proposals, node registration, invoices and withdrawals. Each call returns the transaction hash as soon
//! as the node accepts it.
//!
//! ## Layout
//!
//! - [`domain`]: Value objects ([`Pricing`], [`Invoice`], [`ChainAddress`])
//! - [`application`]: [`DepositClient`] and [`ClientError`]
//! - [`infrastructure`]: Contract binding, gas settings, configuration and
//!   tracing setup
//!
//! ## Example
//!
//! ```ignore
//! use sphere_client::{DepositClient, Invoice, Pricing};
//!
//! let client = DepositClient::connect(key, contract, "http://localhost:8545").await?;
//! let hash = client.deposit(1000u64).await?;
//! println!("submitted {hash}");
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ClientError, ClientResult, DepositClient, ErrorKind, MEMBERSHIP_FEE};
pub use domain::value_objects::{ChainAddress, Invoice, Pricing};
pub use infrastructure::blockchain::{ClientConfig, DEFAULT_GAS_LIMIT, GasSettings, TxHash};
