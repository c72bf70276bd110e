//! # Client Configuration
//!
//! Connection and gas settings loaded from a file and the environment.
//!
//! Sources are layered with the `config` crate: an optional file first,
//! then environment variables prefixed with `SPHERE_`, which override the
//! file. A `.env` file in the working directory is loaded into the
//! environment beforehand if present; a malformed one is an error.
//!
//! | Key | Environment variable | Default |
//! |---|---|---|
//! | `node_url` | `SPHERE_NODE_URL` | required |
//! | `contract_address` | `SPHERE_CONTRACT_ADDRESS` | required |
//! | `private_key` | `SPHERE_PRIVATE_KEY` | required |
//! | `gas_limit` | `SPHERE_GAS_LIMIT` | 210000 |
//! | `gas_price` | `SPHERE_GAS_PRICE` | unset |
//!
//! # Examples
//!
//! ```ignore
//! use sphere_client::infrastructure::blockchain::config::ClientConfig;
//!
//! let config = ClientConfig::load(Some("sphere.toml".as_ref()))?;
//! let client = sphere_client::DepositClient::from_config(&config).await?;
//! ```

use super::gas::{DEFAULT_GAS_LIMIT, GasSettings};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SPHERE";

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

/// Settings needed to build a client.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// HTTP or WebSocket JSON-RPC endpoint of the chain node.
    pub node_url: String,
    /// Deployed deposit contract address.
    pub contract_address: String,
    /// Hex-encoded signing key, without `0x`.
    pub private_key: String,
    /// Gas limit for every transaction.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    /// Legacy gas price in wei.
    #[serde(default)]
    pub gas_price: Option<u64>,
}

impl ClientConfig {
    /// Loads configuration from an optional file and `SPHERE_*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the `.env` file or the config file cannot
    /// be read, or a required key is missing or malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        env_file_loaded(dotenvy::dotenv())?;

        let mut base = Config::builder();
        if let Some(path) = path {
            base = base.add_source(File::from(path));
        }
        Self::from_sources(base, Environment::with_prefix(ENV_PREFIX))
    }

    /// Parses configuration from a TOML string, without the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is invalid or incomplete.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn from_sources(
        base: ConfigBuilder<DefaultState>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        base.add_source(env).build()?.try_deserialize()
    }

    /// Returns the gas settings described by this configuration.
    #[must_use]
    pub fn gas_settings(&self) -> GasSettings {
        let gas = GasSettings::new(self.gas_limit);
        match self.gas_price {
            Some(price) => gas.with_gas_price(price),
            None => gas,
        }
    }
}

fn env_file_loaded<T>(result: dotenvy::Result<T>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Message(format!("invalid .env file: {err}"))),
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("node_url", &self.node_url)
            .field("contract_address", &self.contract_address)
            .field("private_key", &"<redacted>")
            .field("gas_limit", &self.gas_limit)
            .field("gas_price", &self.gas_price)
            .finish()
    }
}
