//! # Deposit Client
//!
//! Signs and submits deposit contract transactions.
//!
//! [`DepositClient`] holds a signing key, a [`DepositBinding`] and the gas
//! settings. Each operation validates its inputs, builds
//! [`TransactOptions`] from the client state, hands the call to the
//! binding and returns the transaction hash. Calls return as soon as the
//! node accepts the transaction; they do not wait for it to be mined.
//!
//! Hashes are returned as [`TxHash`], the `0x`-prefixed lowercase hex
//! string form (`0x` + 64 digits). Use [`TxHash::as_str`] or
//! `String::from` to get at the string.
//!
//! # Examples
//!
//! ```ignore
//! use sphere_client::{DepositClient, Pricing};
//!
//! let client = DepositClient::connect(
//!     "fad9c8855b740a0b7ed4c221dbad0f33a83a49cad6b3fe8d5817ac83d38b6a19",
//!     "0x99665E952674a8ba03e8e91A09B0163be5DcfB5A",
//!     "http://localhost:8545",
//! )
//! .await?
//! .with_gas_price(20_000_000_000u64);
//!
//! let hash = client.deposit(1000u64).await?;
//! let hash = client.register_node(&Pricing::uniform(1u64)).await?;
//! ```

use crate::application::error::{AddressRole, ClientError, ClientResult};
use crate::domain::value_objects::{ChainAddress, Invoice, Pricing};
use crate::infrastructure::blockchain::{
    BindingResult, ClientConfig, DepositBinding, EthersDepositBinding, GasSettings,
    TransactOptions, TxHash,
};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, H256, U256};
use ethers::utils::hex;
use tracing::debug;

/// Value attached to `registerNode`, in wei.
pub const MEMBERSHIP_FEE: u64 = 100_000_000_000;

/// Length of a hex-encoded signing key.
const SIGNING_KEY_HEX_LEN: usize = 64;

/// Parses a bare hex secp256k1 private key.
///
/// A `0x` prefix is rejected as invalid hex.
fn parse_signing_key(key: &str) -> ClientResult<LocalWallet> {
    if key.len() % 2 != 0 || !key.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ClientError::key_parse("invalid hex string"));
    }
    if key.len() != SIGNING_KEY_HEX_LEN {
        return Err(ClientError::key_parse("invalid length, need 256 bits"));
    }

    let bytes = hex::decode(key).map_err(|_| ClientError::key_parse("invalid hex string"))?;
    LocalWallet::from_bytes(&bytes).map_err(|_| ClientError::key_parse("invalid private key"))
}

fn parse_address(value: &str, role: AddressRole) -> ClientResult<ChainAddress> {
    ChainAddress::parse(value).map_err(|_| ClientError::invalid_address(role, value))
}

/// Client for the deposit contract.
///
/// Generic over the binding so tests can substitute an in-memory one;
/// production code uses [`EthersDepositBinding`].
#[derive(Debug)]
pub struct DepositClient<B = EthersDepositBinding> {
    /// Contract binding.
    binding: B,
    /// Signing key.
    wallet: LocalWallet,
    /// Gas applied to every transaction.
    gas: GasSettings,
}

impl DepositClient<EthersDepositBinding> {
    /// Dials the node and binds the deposit contract.
    ///
    /// The key and contract address are validated before the node is
    /// contacted.
    ///
    /// # Arguments
    ///
    /// * `signing_key` - 64 hex digits, without `0x`
    /// * `contract_address` - Deployed contract address
    /// * `node_endpoint` - `http(s)://` or `ws(s)://` JSON-RPC endpoint URL
    ///
    /// # Errors
    ///
    /// - [`ClientError::KeyParse`] if the key is malformed
    /// - [`ClientError::InvalidAddress`] if the contract address is malformed
    /// - [`ClientError::Connection`] if the node cannot be dialed
    pub async fn connect(
        signing_key: &str,
        contract_address: &str,
        node_endpoint: &str,
    ) -> ClientResult<Self> {
        let wallet = parse_signing_key(signing_key)?;
        let contract = parse_address(contract_address, AddressRole::Contract)?;

        let binding = EthersDepositBinding::connect(node_endpoint, contract, wallet.clone())
            .await
            .map_err(|e| ClientError::connection(node_endpoint, e))?;

        debug!(
            endpoint = node_endpoint,
            chain_id = binding.chain_id(),
            contract = %contract,
            signer = ?wallet.address(),
            "connected deposit client"
        );

        Ok(Self::new(binding, wallet))
    }

    /// Connects using a loaded configuration and applies its gas settings.
    ///
    /// # Errors
    ///
    /// Same as [`DepositClient::connect`].
    pub async fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let client = Self::connect(
            &config.private_key,
            &config.contract_address,
            &config.node_url,
        )
        .await?;
        Ok(client.with_gas_settings(config.gas_settings()))
    }
}

impl<B: DepositBinding> DepositClient<B> {
    /// Creates a client over an existing binding with default gas settings.
    #[must_use]
    pub fn new(binding: B, wallet: LocalWallet) -> Self {
        Self {
            binding,
            wallet,
            gas: GasSettings::default(),
        }
    }

    /// Sets the gas price in wei.
    #[must_use]
    pub fn with_gas_price(mut self, gas_price: impl Into<U256>) -> Self {
        self.gas = self.gas.with_gas_price(gas_price);
        self
    }

    /// Sets the gas limit.
    #[must_use]
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas = self.gas.with_gas_limit(gas_limit);
        self
    }

    /// Replaces the gas settings.
    #[must_use]
    pub fn with_gas_settings(mut self, gas: GasSettings) -> Self {
        self.gas = gas;
        self
    }

    /// Returns the signer address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Returns the current gas settings.
    #[must_use]
    pub const fn gas_settings(&self) -> &GasSettings {
        &self.gas
    }

    /// Returns the binding.
    #[must_use]
    pub const fn binding(&self) -> &B {
        &self.binding
    }

    /// Returns the options a transaction attaching `value` would use.
    #[must_use]
    pub fn transact_options(&self, value: U256) -> TransactOptions {
        TransactOptions {
            from: self.wallet.address(),
            value,
            gas_limit: self.gas.gas_limit(),
            gas_price: self.gas.effective_gas_price(),
        }
    }

    /// Deposits `amount` wei without choosing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transaction`] if submission fails.
    pub async fn deposit(&self, amount: impl Into<U256>) -> ClientResult<TxHash> {
        let opts = self.transact_options(amount.into());
        let result = self
            .binding
            .deposit_with_nodes(&opts, U256::zero(), U256::zero())
            .await;
        finish("deposit", &opts, result)
    }

    /// Deposits `amount` wei into `pool`, spread over `places` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transaction`] if submission fails.
    pub async fn deposit_with_nodes(
        &self,
        amount: impl Into<U256>,
        pool: impl Into<U256>,
        places: impl Into<U256>,
    ) -> ClientResult<TxHash> {
        let opts = self.transact_options(amount.into());
        let result = self
            .binding
            .deposit_with_nodes(&opts, pool.into(), places.into())
            .await;
        finish("deposit_with_nodes", &opts, result)
    }

    /// Proposes new network pricing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transaction`] if submission fails.
    pub async fn propose_pricing(&self, pricing: &Pricing) -> ClientResult<TxHash> {
        let opts = self.transact_options(U256::zero());
        let result = self.binding.propose_pricing(&opts, pricing).await;
        finish("propose_pricing", &opts, result)
    }

    /// Moves the signer's deposit to `pool` over `places` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transaction`] if submission fails.
    pub async fn change_pool(
        &self,
        pool: impl Into<U256>,
        places: impl Into<U256>,
    ) -> ClientResult<TxHash> {
        let opts = self.transact_options(U256::zero());
        let result = self
            .binding
            .change_pool(&opts, pool.into(), places.into())
            .await;
        finish("change_pool", &opts, result)
    }

    /// Submits an invoice.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidAddress`] if the invoice user is malformed
    /// - [`ClientError::Transaction`] if submission fails
    pub async fn create_invoice(&self, invoice: &Invoice) -> ClientResult<TxHash> {
        let user = invoice
            .user_address()
            .map_err(|_| ClientError::invalid_address(AddressRole::User, invoice.user()))?;

        let opts = self.transact_options(U256::zero());
        let result = self
            .binding
            .create_invoice(
                &opts,
                invoice.height_start(),
                invoice.height_end(),
                user.as_address(),
                invoice.resources(),
            )
            .await;
        finish("create_invoice", &opts, result)
    }

    /// Registers the signer as a node, paying [`MEMBERSHIP_FEE`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transaction`] if submission fails.
    pub async fn register_node(&self, pricing: &Pricing) -> ClientResult<TxHash> {
        let node = self.wallet.address();
        let opts = self.transact_options(U256::from(MEMBERSHIP_FEE));
        let result = self.binding.register_node(&opts, node, pricing).await;
        finish("register_node", &opts, result)
    }

    /// Changes the signer node's pricing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transaction`] if submission fails.
    pub async fn change_node_pricing(&self, pricing: &Pricing) -> ClientResult<TxHash> {
        let opts = self.transact_options(U256::zero());
        let result = self.binding.change_node_pricing(&opts, pricing).await;
        finish("change_node_pricing", &opts, result)
    }

    /// Withdraws the balance of the node at `address`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidAddress`] if `address` is malformed
    /// - [`ClientError::Transaction`] if submission fails
    pub async fn withdraw(&self, address: &str) -> ClientResult<TxHash> {
        let node = parse_address(address, AddressRole::Node)?;

        let opts = self.transact_options(U256::zero());
        let result = self.binding.withdraw(&opts, node.as_address()).await;
        finish("withdraw", &opts, result)
    }
}

fn finish(
    operation: &'static str,
    opts: &TransactOptions,
    result: BindingResult<H256>,
) -> ClientResult<TxHash> {
    let hash = TxHash::from(result.map_err(ClientError::transaction)?);
    debug!(
        operation,
        tx_hash = %hash,
        value = %opts.value,
        gas_limit = opts.gas_limit,
        "transaction submitted"
    );
    Ok(hash)
}
