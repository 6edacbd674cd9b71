//! Common utilities for integration tests.
#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use guessing_game_mcp::{
    ethereum::{BalanceSource, ChainSource, GuessingGameContract},
    mcp::GameServices,
    services::{Analytics, MessageLog},
    types::{GuessReceipt, ReceiptEvent},
    AppError, Config, GuessSubmitter, GuessingGameServer, Result,
};
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

/// 0.01 ETH in wei.
pub const GUESS_FEE: u64 = 10_000_000_000_000_000;
pub const GUESS_COST: &str = "0.01";
pub const TX_HASH: TxHash = TxHash::repeat_byte(0xab);
/// Anvil's default chain ID.
pub const CHAIN_ID: u64 = 31337;

/// Scripted result of a collaborator call.
#[derive(Debug, Clone)]
pub enum Step<T> {
    Ok(T),
    /// Fails with a revert reason.
    Revert(&'static str),
    /// Fails without a reason, like a dropped connection.
    Fail(&'static str),
}

impl<T: Clone> Step<T> {
    fn run(&self) -> Result<T> {
        match self {
            Step::Ok(value) => Ok(value.clone()),
            Step::Revert(reason) => Err(AppError::Reverted(reason.to_string())),
            Step::Fail(message) => Err(AppError::Transport(message.to_string())),
        }
    }
}

/// In-memory GuessingGame contract.
pub struct MockGame {
    pub max_guess: Step<U256>,
    pub send: Step<TxHash>,
    pub receipt: Step<GuessReceipt>,
    /// `(value, fee)` of every guess sent.
    pub sent: Mutex<Vec<(U256, U256)>>,
}

impl MockGame {
    pub fn new(max_guess: u64) -> Self {
        Self {
            max_guess: Step::Ok(U256::from(max_guess)),
            send: Step::Ok(TX_HASH),
            receipt: Step::Ok(GuessReceipt { transaction_hash: TX_HASH, events: vec![] }),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Mined receipt whose first event is a guess result.
    pub fn with_result(mut self, success: bool, feedback: &str) -> Self {
        self.receipt = Step::Ok(GuessReceipt {
            transaction_hash: TX_HASH,
            events: vec![ReceiptEvent::GuessResult { success, feedback: feedback.to_string() }],
        });
        self
    }

    pub fn sent(&self) -> Vec<(U256, U256)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuessingGameContract for MockGame {
    async fn max_guess(&self) -> Result<U256> {
        self.max_guess.run()
    }

    async fn send_guess(&self, value: U256, fee: U256) -> Result<TxHash> {
        let tx_hash = self.send.run()?;
        self.sent.lock().unwrap().push((value, fee));
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<GuessReceipt> {
        assert_eq!(tx_hash, TX_HASH, "waited on a hash that was never sent");
        self.receipt.run()
    }
}

/// In-memory signer balance.
pub struct MockSigner {
    pub balance: Step<U256>,
    pub calls: AtomicUsize,
}

impl MockSigner {
    pub fn with_balance(balance: U256) -> Self {
        Self { balance: Step::Ok(balance), calls: AtomicUsize::new(0) }
    }

    pub fn funded() -> Self {
        Self::with_balance(U256::from(GUESS_FEE) * U256::from(100))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceSource for MockSigner {
    async fn balance(&self) -> Result<U256> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.balance.run()
    }
}

#[async_trait]
impl ChainSource for MockSigner {
    async fn chain_id(&self) -> Result<u64> {
        Ok(CHAIN_ID)
    }
}

/// Analytics sink that keeps every event.
#[derive(Default)]
pub struct RecordingAnalytics {
    pub events: Mutex<Vec<(String, Value)>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &str, payload: Value) {
        self.events.lock().unwrap().push((event.to_string(), payload));
    }
}

/// A submitter wired to test doubles.
pub struct Harness {
    pub game: Arc<MockGame>,
    pub signer: Arc<MockSigner>,
    pub messages: Arc<MessageLog>,
    pub analytics: Arc<RecordingAnalytics>,
    pub submitter: GuessSubmitter,
}

impl Harness {
    pub fn new(game: MockGame, signer: MockSigner) -> Self {
        let game = Arc::new(game);
        let signer = Arc::new(signer);
        let messages = Arc::new(MessageLog::new());
        let analytics = Arc::new(RecordingAnalytics::default());

        let submitter = GuessSubmitter::new(
            game.clone(),
            signer.clone(),
            messages.clone(),
            analytics.clone(),
            GUESS_COST,
            U256::from(GUESS_FEE),
        );

        Self { game, signer, messages, analytics, submitter }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.messages()
    }
}

/// Server wired to test doubles.
pub fn mock_server(game: MockGame, signer: MockSigner) -> GuessingGameServer {
    let signer = Arc::new(signer);
    GuessingGameServer::with_services(GameServices {
        contract: Arc::new(game),
        signer: signer.clone(),
        chain: signer,
        analytics: Arc::new(RecordingAnalytics::default()),
        contract_address: Address::repeat_byte(0x11),
        wallet_address: Address::repeat_byte(0x22),
        guess_cost: GUESS_COST.to_string(),
        guess_fee: U256::from(GUESS_FEE),
    })
}

/// Shared buffer collecting formatted log output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture ERROR-level events on the current thread until the guard drops.
pub fn capture_error_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

/// Helper to create a live server from environment variables.
pub fn create_test_server() -> Option<GuessingGameServer> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let rpc_url = std::env::var("ETHEREUM_RPC_URL").ok()?;
    let private_key = std::env::var("ETHEREUM_PRIVATE_KEY").ok()?;
    let contract_address = std::env::var("GUESSING_GAME_ADDRESS").ok()?.parse().ok()?;

    if rpc_url.is_empty() || private_key.is_empty() {
        return None;
    }

    let config = Config {
        rpc_url,
        private_key,
        contract_address,
        guess_cost: GUESS_COST.to_string(),
        log_level: "warn".to_string(),
    };

    GuessingGameServer::new(config).ok()
}

/// Skip test if server cannot be created (missing env vars).
#[macro_export]
macro_rules! skip_if_no_server {
    () => {
        match common::create_test_server() {
            Some(server) => server,
            None => {
                eprintln!(
                    "Skipping test: ETHEREUM_RPC_URL, ETHEREUM_PRIVATE_KEY or GUESSING_GAME_ADDRESS not set"
                );
                return;
            }
        }
    };
}
