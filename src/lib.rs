//! GuessingGame MCP Server Library
//!
//! Submits guesses to the GuessingGame smart contract and turns every
//! outcome into human-readable status messages.
//!
//! # Features
//!
//! - **Guess Submission**: Validate a guess against `MAX_GUESS` and the
//!   wallet balance, pay the guess cost, and decode the contract's verdict
//! - **Rejection Handling**: Known revert reasons map to tailored messages
//! - **Game Info**: Read the contract limits and the wallet's balance
//!
//! # Example
//!
//! ```rust,ignore
//! use guessing_game_mcp::{Config, GuessingGameServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = GuessingGameServer::new(config)?;
//!     // Run server...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ethereum;
pub mod mcp;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{AppError, Result};
pub use mcp::GuessingGameServer;
pub use services::GuessSubmitter;
pub use types::{GuessOutcome, RejectReason};
