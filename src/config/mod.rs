//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::env;

use alloy::primitives::{Address, U256};

use crate::{
    error::AppError,
    ethereum::constants::ETH_DECIMALS,
    types::parse_units,
};

/// Guess cost in ether used when `GUESS_COST` is not set.
pub const DEFAULT_GUESS_COST: &str = "0.01";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Private key for wallet (hex string with 0x prefix).
    pub private_key: String,
    /// Deployed GuessingGame contract address.
    pub contract_address: Address,
    /// Cost of a single guess, in ether (e.g. "0.01").
    pub guess_cost: String,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ETHEREUM_RPC_URL`: Ethereum JSON-RPC endpoint
    /// - `ETHEREUM_PRIVATE_KEY`: Private key for wallet (hex)
    /// - `GUESSING_GAME_ADDRESS`: Deployed GuessingGame contract
    ///
    /// Optional environment variables:
    /// - `GUESS_COST`: Guess cost in ether (default: 0.01)
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let rpc_url = env::var("ETHEREUM_RPC_URL").map_err(|_| {
            AppError::Config("ETHEREUM_RPC_URL environment variable not set".into())
        })?;

        let private_key = env::var("ETHEREUM_PRIVATE_KEY").map_err(|_| {
            AppError::Config("ETHEREUM_PRIVATE_KEY environment variable not set".into())
        })?;

        let contract_address = env::var("GUESSING_GAME_ADDRESS").map_err(|_| {
            AppError::Config("GUESSING_GAME_ADDRESS environment variable not set".into())
        })?;
        let contract_address = parse_contract_address(&contract_address)?;

        let guess_cost = env::var("GUESS_COST").unwrap_or_else(|_| DEFAULT_GUESS_COST.to_string());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let config = Self { rpc_url, private_key, contract_address, guess_cost, log_level };
        config.guess_fee()?;

        Ok(config)
    }

    /// Guess cost converted to wei.
    pub fn guess_fee(&self) -> Result<U256, AppError> {
        parse_units(&self.guess_cost, ETH_DECIMALS)
            .map_err(|e| AppError::Config(format!("Invalid GUESS_COST '{}': {}", self.guess_cost, e)))
    }
}

fn parse_contract_address(s: &str) -> Result<Address, AppError> {
    let trimmed = s.trim();
    trimmed.parse::<Address>().map_err(|e| AppError::InvalidAddress(format!("{trimmed}: {e}")))
}
