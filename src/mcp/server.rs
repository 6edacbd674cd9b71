//! MCP server implementation.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};

use crate::{
    config::Config,
    error::AppError,
    ethereum::{
        constants::ETH_DECIMALS, BalanceSource, ChainSource, EthereumClient, GuessingGameClient,
        GuessingGameContract, WalletManager,
    },
    services::{Analytics, GuessSubmitter, MessageLog, TracingAnalytics},
    types::{format_units, GameInfo, GuessReport},
};

/// Collaborators the server builds a [`GuessSubmitter`] from.
#[derive(Clone)]
pub struct GameServices {
    /// Contract proxy.
    pub contract: Arc<dyn GuessingGameContract>,
    /// Signer balance lookup.
    pub signer: Arc<dyn BalanceSource>,
    /// Chain ID lookup, reported by `get_game_info`.
    pub chain: Arc<dyn ChainSource>,
    /// Analytics sink.
    pub analytics: Arc<dyn Analytics>,
    /// Contract address, reported by `get_game_info`.
    pub contract_address: Address,
    /// Signer address, reported by `get_game_info`.
    pub wallet_address: Address,
    /// Guess cost in ether.
    pub guess_cost: String,
    /// Guess cost in wei.
    pub guess_fee: U256,
}

/// GuessingGame MCP Server.
///
/// Provides tools for submitting guesses and inspecting the game.
#[derive(Clone)]
pub struct GuessingGameServer {
    services: GameServices,
    tool_router: ToolRouter<Self>,
}

impl GuessingGameServer {
    /// Create a new GuessingGame MCP Server.
    ///
    /// Note: This uses lazy initialization - no network calls are made during
    /// server startup. The Ethereum connection is established when the first
    /// tool is invoked.
    pub fn new(config: Config) -> Result<Self, AppError> {
        tracing::info!("Initializing GuessingGame MCP Server");

        let wallet = WalletManager::from_private_key(&config.private_key)?;

        // Initialize Ethereum client (lazy - no network call yet)
        let client = Arc::new(EthereumClient::new(&config.rpc_url, &wallet)?);
        let contract = Arc::new(GuessingGameClient::new(client.clone(), config.contract_address));

        let services = GameServices {
            contract_address: contract.address(),
            wallet_address: client.address(),
            contract,
            signer: client.clone(),
            chain: client,
            analytics: Arc::new(TracingAnalytics),
            guess_fee: config.guess_fee()?,
            guess_cost: config.guess_cost,
        };

        tracing::info!(
            contract = %services.contract_address,
            guess_cost = %services.guess_cost,
            "GuessingGame MCP Server initialized successfully"
        );

        Ok(Self::with_services(services))
    }

    /// Create a server from already-built collaborators.
    pub fn with_services(services: GameServices) -> Self {
        Self { services, tool_router: Self::tool_router() }
    }

    fn submitter(&self, messages: Arc<MessageLog>) -> GuessSubmitter {
        GuessSubmitter::new(
            self.services.contract.clone(),
            self.services.signer.clone(),
            messages,
            self.services.analytics.clone(),
            self.services.guess_cost.clone(),
            self.services.guess_fee,
        )
    }
}

/// Input parameters for the submit_guess tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct SubmitGuessInput {
    /// Guess as a non-negative integer (e.g., "42").
    pub value: String,
}

#[tool_router]
impl GuessingGameServer {
    /// Submit a guess to the GuessingGame contract.
    ///
    /// Pays the configured guess cost. Returns the outcome and every status
    /// message produced along the way.
    #[tool(
        description = "Submit a guess to the GuessingGame contract. Pays the configured guess cost and returns the outcome plus status messages."
    )]
    pub async fn submit_guess(
        &self,
        Parameters(input): Parameters<SubmitGuessInput>,
    ) -> Result<String, McpError> {
        tracing::info!(value = %input.value, "submit_guess called");

        // Fresh log per call so concurrent calls do not mix messages
        let messages = Arc::new(MessageLog::new());
        let outcome = self.submitter(messages.clone()).submit_guess(&input.value).await;

        let report = GuessReport { outcome, messages: messages.messages() };

        serde_json::to_string_pretty(&report)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    /// Read the game limits and the wallet's ability to pay for a guess.
    #[tool(description = "Get the chain ID, MAX_GUESS, the guess cost, and the wallet balance")]
    pub async fn get_game_info(&self) -> Result<String, McpError> {
        tracing::info!("get_game_info called");

        let max_guess = self.services.contract.max_guess().await.map_err(McpError::from)?;
        let balance = self.services.signer.balance().await.map_err(McpError::from)?;
        let chain_id = self.services.chain.chain_id().await.map_err(McpError::from)?;

        let info = GameInfo {
            chain_id,
            contract_address: format!("{:?}", self.services.contract_address),
            wallet_address: format!("{:?}", self.services.wallet_address),
            max_guess: max_guess.to_string(),
            guess_cost: self.services.guess_cost.clone(),
            guess_fee_wei: self.services.guess_fee.to_string(),
            wallet_balance: format_units(balance, ETH_DECIMALS),
            wallet_balance_wei: balance.to_string(),
            can_afford_guess: balance >= self.services.guess_fee,
        };

        serde_json::to_string_pretty(&info)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GuessingGameServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "guessing-game-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "GuessingGame MCP Server. Provides tools for submitting guesses to the \
                 GuessingGame contract and reading its limits."
                    .to_string(),
            ),
        }
    }
}
