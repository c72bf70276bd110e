//! # Application
//!
//! The deposit client and its error types.

pub mod deposit_client;
pub mod error;

pub use deposit_client::{DepositClient, MEMBERSHIP_FEE};
pub use error::{AddressRole, ClientError, ClientResult, ErrorKind};
