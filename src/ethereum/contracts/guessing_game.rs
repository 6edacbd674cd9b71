//! GuessingGame contract bindings.

use alloy::{
    network::ReceiptResponse,
    primitives::{Address, TxHash, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider},
    rpc::types::Log,
    sol,
};
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::EthereumClient,
    types::{GuessReceipt, ReceiptEvent},
};

// GuessingGame contract interface
sol! {
    #[sol(rpc)]
    contract GuessingGame {
        event GuessResult(bool success, string feedback);

        function MAX_GUESS() external view returns (uint256);
        function guess(uint256 value) external payable;
    }
}

/// Operations the guess flow needs from the deployed contract.
///
/// Sending and confirming are separate calls: the first returns once the
/// node accepts the transaction, the second once it is mined.
#[async_trait]
pub trait GuessingGameContract: Send + Sync {
    /// Largest guess the contract accepts.
    async fn max_guess(&self) -> Result<U256>;

    /// Broadcast `guess(value)` paying `fee` wei.
    async fn send_guess(&self, value: U256, fee: U256) -> Result<TxHash>;

    /// Wait for the guess transaction to be mined and decode its receipt.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<GuessReceipt>;
}

/// On-chain GuessingGame contract reached through the wallet-backed client.
#[derive(Clone)]
pub struct GuessingGameClient {
    client: Arc<EthereumClient>,
    contract: GuessingGame::GuessingGameInstance<DynProvider>,
}

impl GuessingGameClient {
    /// Bind the contract deployed at `address`.
    pub fn new(client: Arc<EthereumClient>, address: Address) -> Self {
        let contract = GuessingGame::new(address, client.provider().clone());
        Self { client, contract }
    }

    /// Address of the bound contract.
    pub fn address(&self) -> Address {
        *self.contract.address()
    }
}

fn decode_event(log: &Log) -> ReceiptEvent {
    match log.log_decode::<GuessingGame::GuessResult>() {
        Ok(decoded) => {
            let event = decoded.inner.data;
            ReceiptEvent::GuessResult { success: event.success, feedback: event.feedback }
        }
        Err(_) => ReceiptEvent::Unrecognized,
    }
}

#[async_trait]
impl GuessingGameContract for GuessingGameClient {
    async fn max_guess(&self) -> Result<U256> {
        let max_guess = self.contract.MAX_GUESS().call().await?;
        tracing::debug!(max_guess = %max_guess, "Read MAX_GUESS");
        Ok(max_guess)
    }

    async fn send_guess(&self, value: U256, fee: U256) -> Result<TxHash> {
        let pending = self.contract.guess(value).value(fee).send().await?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, value = %value, fee = %fee, "Guess transaction sent");
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<GuessReceipt> {
        let receipt = PendingTransactionBuilder::new(self.client.provider().root().clone(), tx_hash)
            .get_receipt()
            .await?;

        if !receipt.status() {
            return Err(AppError::Reverted("transaction failed".to_string()));
        }

        let events = receipt.inner.logs().iter().map(decode_event).collect();

        tracing::info!(
            tx_hash = %receipt.transaction_hash,
            block = ?receipt.block_number,
            "Guess transaction mined"
        );

        Ok(GuessReceipt { transaction_hash: receipt.transaction_hash, events })
    }
}
