//! Ethereum RPC client.

use alloy::{
    primitives::{Address, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    transports::http::reqwest::Url,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::{
    error::{AppError, Result},
    ethereum::WalletManager,
};

/// Source of the signer's current balance.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Current balance of the signing account, in wei.
    async fn balance(&self) -> Result<U256>;
}

/// Source of the connected network's chain ID.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Chain ID reported by the node.
    async fn chain_id(&self) -> Result<u64>;
}

/// Wallet-backed Ethereum RPC client with lazy initialization.
#[derive(Clone)]
pub struct EthereumClient {
    /// Provider that signs outgoing transactions with the wallet.
    provider: DynProvider,
    /// Address of the signing wallet.
    address: Address,
    /// RPC URL for logging.
    rpc_url: String,
    /// Lazily initialized chain ID.
    chain_id: Arc<OnceCell<u64>>,
}

impl EthereumClient {
    /// Create a new Ethereum client signing with `wallet`.
    ///
    /// Note: This does NOT make any network calls. The connection is
    /// established lazily when the first operation is performed.
    pub fn new(rpc_url: &str, wallet: &WalletManager) -> Result<Self> {
        let url: Url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        let provider =
            ProviderBuilder::new().wallet(wallet.network_wallet()).connect_http(url).erased();

        tracing::info!(
            rpc_url = %rpc_url,
            address = %wallet.address(),
            "Ethereum client created (lazy initialization)"
        );

        Ok(Self {
            provider,
            address: wallet.address(),
            rpc_url: rpc_url.to_string(),
            chain_id: Arc::new(OnceCell::new()),
        })
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Address transactions are signed with.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get native ETH balance for an address.
    pub async fn get_eth_balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }
}

#[async_trait]
impl BalanceSource for EthereumClient {
    async fn balance(&self) -> Result<U256> {
        tracing::debug!(address = %self.address, "Querying signer balance");
        self.get_eth_balance(self.address).await
    }
}

#[async_trait]
impl ChainSource for EthereumClient {
    /// Fetched from the node on first call, cached afterwards.
    async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| async {
                let chain_id = self.provider.get_chain_id().await?;
                tracing::info!(chain_id = chain_id, rpc_url = %self.rpc_url, "Connected to Ethereum node");
                Ok(chain_id)
            })
            .await
            .copied()
    }
}

impl std::fmt::Debug for EthereumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumClient")
            .field("rpc_url", &self.rpc_url)
            .field("address", &self.address)
            .finish()
    }
}
