//! # Client Errors
//!
//! Error types for the deposit client.
//!
//! Every error is returned to the immediate caller with a human-readable
//! message and, where one exists, the underlying cause as its
//! [`source`](std::error::Error::source). Nothing is retried or logged.
//!
//! # Error Hierarchy
//!
//! ```text
//! ClientError
//! ├── Connection      - Node could not be dialed
//! ├── KeyParse        - Malformed signing key
//! ├── InvalidAddress  - Malformed contract, user or node address
//! ├── Transaction     - Submission failed (cause wrapped)
//! └── Config          - Configuration could not be loaded
//! ```
//!
//! # Examples
//!
//! ```
//! use sphere_client::application::error::{AddressRole, ClientError, ErrorKind};
//!
//! let err = ClientError::invalid_address(AddressRole::Node, "not-an-address");
//! assert_eq!(err.kind(), ErrorKind::InvalidAddress);
//! assert_eq!(err.to_string(), "invalid node address");
//! ```

use crate::infrastructure::blockchain::BindingError;
use std::fmt;
use thiserror::Error;

/// Which address failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressRole {
    /// The deposit contract address given at construction.
    Contract,
    /// The billed user of an invoice.
    User,
    /// The node address passed to a withdrawal.
    Node,
}

impl AddressRole {
    /// Returns the role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::User => "user",
            Self::Node => "node",
        }
    }
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of a [`ClientError`], for matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ClientError::Connection`].
    Connection,
    /// See [`ClientError::KeyParse`].
    KeyParse,
    /// See [`ClientError::InvalidAddress`].
    InvalidAddress,
    /// See [`ClientError::Transaction`].
    Transaction,
    /// See [`ClientError::Config`].
    Config,
}

/// Error type for deposit client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The node endpoint could not be dialed.
    #[error("failed to dial {endpoint}")]
    Connection {
        /// Endpoint that was dialed.
        endpoint: String,
        /// Underlying transport error.
        #[source]
        source: BindingError,
    },

    /// The signing key is not a valid hex-encoded private key.
    #[error("failed to parse private key: {reason}")]
    KeyParse {
        /// Why the key was rejected.
        reason: String,
    },

    /// An address is not a well-formed 20-byte hex address.
    #[error("invalid {role} address")]
    InvalidAddress {
        /// Which address was rejected.
        role: AddressRole,
        /// The rejected input.
        value: String,
    },

    /// The transaction could not be submitted.
    #[error("transaction failed: {source}")]
    Transaction {
        /// Error returned by the contract binding.
        #[source]
        source: BindingError,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(endpoint: impl Into<String>, source: BindingError) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates a key parse error.
    #[must_use]
    pub fn key_parse(reason: impl Into<String>) -> Self {
        Self::KeyParse {
            reason: reason.into(),
        }
    }

    /// Creates an invalid address error.
    #[must_use]
    pub fn invalid_address(role: AddressRole, value: impl Into<String>) -> Self {
        Self::InvalidAddress {
            role,
            value: value.into(),
        }
    }

    /// Creates a transaction error wrapping the binding's cause.
    #[must_use]
    pub fn transaction(source: BindingError) -> Self {
        Self::Transaction { source }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection { .. } => ErrorKind::Connection,
            Self::KeyParse { .. } => ErrorKind::KeyParse,
            Self::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            Self::Transaction { .. } => ErrorKind::Transaction,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

/// Result type for deposit client operations.
pub type ClientResult<T> = Result<T, ClientError>;
