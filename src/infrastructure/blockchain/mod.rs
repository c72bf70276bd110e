//! # Blockchain
//!
//! Adapters for submitting deposit contract transactions to a chain node.
//!
//! ## Available Components
//!
//! - [`DepositBinding`]: Port with one method per contract action
//! - [`EthersDepositBinding`]: ethers-rs implementation over JSON-RPC
//! - [`NodeTransport`]: HTTP or WebSocket transport, picked from the URL
//! - [`GasSettings`]: Gas limit and optional gas price
//! - [`ClientConfig`]: File and environment configuration

pub mod binding;
pub mod config;
pub mod ethereum;
pub mod gas;
pub mod transport;

pub use binding::{BindingError, BindingResult, DepositBinding, TransactOptions, TxHash};
pub use config::ClientConfig;
pub use ethereum::EthersDepositBinding;
pub use gas::{DEFAULT_GAS_LIMIT, GasSettings};
pub use transport::NodeTransport;
