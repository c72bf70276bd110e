//! # Ethereum Binding
//!
//! [`DepositBinding`] implementation using ethers-rs.
//!
//! The contract interface is generated with `abigen!` from its
//! human-readable ABI. Transactions are signed locally by a
//! [`SignerMiddleware`] over a [`NodeTransport`] (HTTP or WebSocket,
//! chosen from the endpoint) and submitted with `eth_sendRawTransaction`.
//! Every call is sent as a legacy transaction with the caller's gas limit
//! and gas price, so the middleware never estimates gas or queries fee
//! data; the only extra round trip is the nonce lookup.

use super::binding::{BindingResult, DepositBinding, TransactOptions};
use super::transport::NodeTransport;
use crate::domain::value_objects::{ChainAddress, Pricing};
use async_trait::async_trait;
use self::contract::EthDepositContract;
use ethers::contract::builders::ContractCall;
use ethers::prelude::*;
use std::fmt;
use std::sync::Arc;

mod contract {
    #![allow(missing_docs, dead_code)]

    ethers::contract::abigen!(
        EthDepositContract,
        r#"[
            function depositWithNodes(uint256 pool, uint256 places) external payable
            function proposePricing(uint256 keepPerByte, uint256 writePerByte, uint256 cpuPerCycle, uint256 gpuPerCycle) external
            function changePool(uint256 pool, uint256 places) external
            function createInvoice(uint256 heightStart, uint256 heightEnd, address user, uint256 keepPerByte, uint256 writePerByte, uint256 cpuPerCycle, uint256 gpuPerCycle) external
            function registerNode(address node, uint256 keepPerByte, uint256 writePerByte, uint256 cpuPerCycle, uint256 gpuPerCycle) external payable
            function changeNodePricing(uint256 keepPerByte, uint256 writePerByte, uint256 cpuPerCycle, uint256 gpuPerCycle) external
            function withdraw(address node) external
        ]"#
    );
}

/// Signing middleware stack used for submissions.
pub type SignerClient = SignerMiddleware<Provider<NodeTransport>, LocalWallet>;

/// Deposit contract binding backed by a JSON-RPC node.
#[derive(Clone)]
pub struct EthersDepositBinding {
    /// Generated contract binding.
    contract: EthDepositContract<SignerClient>,
    /// Chain ID reported by the node at connect time.
    chain_id: u64,
}

impl EthersDepositBinding {
    /// Dials the node and binds the contract at `address`.
    ///
    /// Queries the node's chain ID so the wallet signs with replay
    /// protection for that chain.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - `http(s)://` or `ws(s)://` JSON-RPC endpoint URL
    /// * `address` - Deployed contract address
    /// * `wallet` - Signing key
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL, the WebSocket
    /// handshake fails, or the node does not answer `eth_chainId`.
    pub async fn connect(
        endpoint: &str,
        address: ChainAddress,
        wallet: LocalWallet,
    ) -> BindingResult<Self> {
        let provider = Provider::new(NodeTransport::connect(endpoint).await?);
        let client = SignerMiddleware::new_with_provider_chain(provider, wallet).await?;
        let chain_id = client.signer().chain_id();

        Ok(Self {
            contract: EthDepositContract::new(address.as_address(), Arc::new(client)),
            chain_id,
        })
    }

    /// Returns the chain ID the node reported.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Returns the bound contract address.
    #[must_use]
    pub fn contract_address(&self) -> Address {
        self.contract.address()
    }

    /// Applies the options and submits the call, returning its hash.
    async fn submit(
        call: ContractCall<SignerClient, ()>,
        opts: &TransactOptions,
    ) -> BindingResult<H256> {
        let call = call
            .legacy()
            .from(opts.from)
            .value(opts.value)
            .gas(opts.gas_limit)
            .gas_price(opts.gas_price);

        let pending = call.send().await?;
        Ok(*pending)
    }
}

impl fmt::Debug for EthersDepositBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthersDepositBinding")
            .field("contract", &self.contract.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

#[async_trait]
impl DepositBinding for EthersDepositBinding {
    async fn deposit_with_nodes(
        &self,
        opts: &TransactOptions,
        pool: U256,
        places: U256,
    ) -> BindingResult<H256> {
        Self::submit(self.contract.deposit_with_nodes(pool, places), opts).await
    }

    async fn propose_pricing(
        &self,
        opts: &TransactOptions,
        pricing: &Pricing,
    ) -> BindingResult<H256> {
        let (keep, write, cpu, gpu) = pricing.contract_args();
        Self::submit(self.contract.propose_pricing(keep, write, cpu, gpu), opts).await
    }

    async fn change_pool(
        &self,
        opts: &TransactOptions,
        pool: U256,
        places: U256,
    ) -> BindingResult<H256> {
        Self::submit(self.contract.change_pool(pool, places), opts).await
    }

    async fn create_invoice(
        &self,
        opts: &TransactOptions,
        height_start: U256,
        height_end: U256,
        user: Address,
        resources: &Pricing,
    ) -> BindingResult<H256> {
        let (keep, write, cpu, gpu) = resources.contract_args();
        let call = self
            .contract
            .create_invoice(height_start, height_end, user, keep, write, cpu, gpu);
        Self::submit(call, opts).await
    }

    async fn register_node(
        &self,
        opts: &TransactOptions,
        node: Address,
        pricing: &Pricing,
    ) -> BindingResult<H256> {
        let (keep, write, cpu, gpu) = pricing.contract_args();
        Self::submit(self.contract.register_node(node, keep, write, cpu, gpu), opts).await
    }

    async fn change_node_pricing(
        &self,
        opts: &TransactOptions,
        pricing: &Pricing,
    ) -> BindingResult<H256> {
        let (keep, write, cpu, gpu) = pricing.contract_args();
        Self::submit(self.contract.change_node_pricing(keep, write, cpu, gpu), opts).await
    }

    async fn withdraw(&self, opts: &TransactOptions, node: Address) -> BindingResult<H256> {
        Self::submit(self.contract.withdraw(node), opts).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use ethers::types::transaction::eip2718::TypedTransaction;
    use ethers::utils::{hex, rlp::Rlp};
    use futures::{SinkExt, StreamExt};
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) const TEST_KEY: &str =
        "fad9c8855b740a0b7ed4c221dbad0f33a83a49cad6b3fe8d5817ac83d38b6a19";
    pub(crate) const CONTRACT: &str = "0x99665E952674a8ba03e8e91A09B0163be5DcfB5A";
    pub(crate) const NODE_TX_HASH: &str =
        "0x5e1d3a76fbf824220eafba8f2b9ea4a3d5b9d5a1a2c7e8d1c4d3e2f1a0b9c8d7";

    async fn mount_rpc(server: &MockServer, rpc_method: &str, result: Value) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": result,
            })))
            .mount(server)
            .await;
    }

    /// Starts a mock node that accepts any raw transaction.
    pub(crate) async fn mock_node() -> MockServer {
        let server = MockServer::start().await;
        for rpc_method in ["eth_chainId", "eth_getTransactionCount", "eth_sendRawTransaction"] {
            mount_rpc(&server, rpc_method, rpc_result(rpc_method)).await;
        }
        server
    }

    fn rpc_result(rpc_method: &str) -> Value {
        match rpc_method {
            "eth_chainId" => json!("0x539"),
            "eth_getTransactionCount" => json!("0x0"),
            "eth_sendRawTransaction" => json!(NODE_TX_HASH),
            _ => Value::Null,
        }
    }

    /// WebSocket node answering the same calls as [`mock_node`].
    pub(crate) struct WsNode {
        pub(crate) url: String,
        methods: Arc<Mutex<Vec<String>>>,
    }

    impl WsNode {
        /// Methods received so far, in order.
        pub(crate) fn methods(&self) -> Vec<String> {
            self.methods.lock().unwrap().clone()
        }
    }

    pub(crate) async fn ws_node() -> WsNode {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        let methods = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&methods);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let Ok(mut socket) = tokio_tungstenite::accept_async(stream).await else {
                        return;
                    };
                    while let Some(Ok(message)) = socket.next().await {
                        let Message::Text(text) = message else {
                            continue;
                        };
                        let request: Value = serde_json::from_str(&text).unwrap();
                        let rpc_method = request["method"].as_str().unwrap_or_default();
                        log.lock().unwrap().push(rpc_method.to_string());

                        let reply = json!({
                            "jsonrpc": "2.0",
                            "id": request["id"],
                            "result": rpc_result(rpc_method),
                        });
                        if socket.send(Message::Text(reply.to_string())).await.is_err() {
                            break;
                        }
                    }
                });
            }
        });

        WsNode { url, methods }
    }

    /// Decodes the raw transactions the mock node received.
    pub(crate) async fn sent_transactions(server: &MockServer) -> Vec<TypedTransaction> {
        let requests = server.received_requests().await.unwrap();
        requests
            .iter()
            .filter_map(|req| req.body_json::<Value>().ok())
            .filter(|body| body["method"] == "eth_sendRawTransaction")
            .map(|body| {
                let raw = hex::decode(body["params"][0].as_str().unwrap()).unwrap();
                TypedTransaction::decode_signed(&Rlp::new(&raw)).unwrap().0
            })
            .collect()
    }

    fn wallet() -> LocalWallet {
        TEST_KEY.parse().unwrap()
    }

    fn options(wallet: &LocalWallet, value: u64) -> TransactOptions {
        TransactOptions {
            from: wallet.address(),
            value: U256::from(value),
            gas_limit: 210_000,
            gas_price: U256::zero(),
        }
    }

    #[tokio::test]
    async fn connect_reads_chain_id() {
        let server = mock_node().await;
        let contract = ChainAddress::parse(CONTRACT).unwrap();
        let binding = EthersDepositBinding::connect(&server.uri(), contract, wallet())
            .await
            .unwrap();

        assert_eq!(binding.chain_id(), 1337);
        assert_eq!(binding.contract_address(), contract.as_address());
    }

    #[tokio::test]
    async fn connect_fails_on_bad_url() {
        let contract = ChainAddress::parse(CONTRACT).unwrap();
        let result = EthersDepositBinding::connect("not a url", contract, wallet()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn connect_fails_when_node_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let contract = ChainAddress::parse(CONTRACT).unwrap();
        let result = EthersDepositBinding::connect(&server.uri(), contract, wallet()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn deposit_submits_legacy_transaction() {
        let server = mock_node().await;
        let wallet = wallet();
        let contract = ChainAddress::parse(CONTRACT).unwrap();
        let binding = EthersDepositBinding::connect(&server.uri(), contract, wallet.clone())
            .await
            .unwrap();

        let hash = binding
            .deposit_with_nodes(&options(&wallet, 1000), U256::from(3), U256::from(4))
            .await
            .unwrap();
        assert_eq!(format!("{hash:#x}"), NODE_TX_HASH);

        let sent = sent_transactions(&server).await;
        assert_eq!(sent.len(), 1);
        let tx = &sent[0];
        assert!(matches!(tx, TypedTransaction::Legacy(_)));
        assert_eq!(tx.value(), Some(&U256::from(1000)));
        assert_eq!(tx.gas(), Some(&U256::from(210_000)));
        assert_eq!(tx.gas_price(), Some(U256::zero()));

        let expected = binding
            .contract
            .deposit_with_nodes(U256::from(3), U256::from(4))
            .calldata()
            .unwrap();
        assert_eq!(tx.data(), Some(&expected));
    }

    #[tokio::test]
    async fn connect_over_websocket() {
        let node = ws_node().await;
        let wallet = wallet();
        let contract = ChainAddress::parse(CONTRACT).unwrap();
        let binding = EthersDepositBinding::connect(&node.url, contract, wallet.clone())
            .await
            .unwrap();
        assert_eq!(binding.chain_id(), 1337);

        let hash = binding
            .deposit_with_nodes(&options(&wallet, 1000), U256::zero(), U256::zero())
            .await
            .unwrap();
        assert_eq!(format!("{hash:#x}"), NODE_TX_HASH);
        assert_eq!(
            node.methods(),
            ["eth_chainId", "eth_getTransactionCount", "eth_sendRawTransaction"]
        );
    }

    #[tokio::test]
    async fn node_rejection_is_an_error() {
        let server = MockServer::start().await;
        mount_rpc(&server, "eth_chainId", json!("0x539")).await;
        mount_rpc(&server, "eth_getTransactionCount", json!("0x0")).await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_sendRawTransaction" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32000, "message": "insufficient funds for gas * price + value" },
            })))
            .mount(&server)
            .await;

        let wallet = wallet();
        let contract = ChainAddress::parse(CONTRACT).unwrap();
        let binding = EthersDepositBinding::connect(&server.uri(), contract, wallet.clone())
            .await
            .unwrap();

        let err = binding
            .withdraw(&options(&wallet, 0), contract.as_address())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("insufficient funds"));
    }
}
