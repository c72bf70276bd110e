//! # Node Transport
//!
//! JSON-RPC transport to the chain node, chosen from the endpoint scheme.
//!
//! `ws://` and `wss://` endpoints open a WebSocket connection that stays up
//! for the life of the client. Anything else is treated as an HTTP
//! endpoint. Both transports surface failures as [`ProviderError`], so the
//! contract binding has a single concrete provider type.

use super::binding::BindingResult;
use async_trait::async_trait;
use ethers::providers::{Http, JsonRpcClient, ProviderError, Ws};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;

/// Transport used to reach a node.
#[derive(Debug)]
pub enum NodeTransport {
    /// Request/response over HTTP.
    Http(Http),
    /// Persistent WebSocket connection.
    Ws(Ws),
}

impl NodeTransport {
    /// Opens a transport for `endpoint`.
    ///
    /// HTTP transports are lazy; nothing is sent until the first request.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the
    /// WebSocket handshake fails.
    pub async fn connect(endpoint: &str) -> BindingResult<Self> {
        if is_websocket(endpoint) {
            Ok(Self::Ws(Ws::connect(endpoint).await?))
        } else {
            Ok(Self::Http(Http::from_str(endpoint)?))
        }
    }

    /// Returns `true` for a WebSocket transport.
    #[must_use]
    pub const fn is_websocket(&self) -> bool {
        matches!(self, Self::Ws(_))
    }
}

fn is_websocket(endpoint: &str) -> bool {
    endpoint
        .split_once("://")
        .is_some_and(|(scheme, _)| {
            scheme.eq_ignore_ascii_case("ws") || scheme.eq_ignore_ascii_case("wss")
        })
}

#[async_trait]
impl JsonRpcClient for NodeTransport {
    type Error = ProviderError;

    async fn request<T, R>(&self, method: &str, params: T) -> Result<R, ProviderError>
    where
        T: fmt::Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        match self {
            Self::Http(http) => Ok(http.request(method, params).await?),
            Self::Ws(ws) => Ok(ws.request(method, params).await?),
        }
    }
}
