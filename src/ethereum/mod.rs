//! Ethereum interaction module.
//!
//! Contains the Ethereum client, wallet management, and contract bindings.

pub mod client;
pub mod constants;
pub mod contracts;
pub mod wallet;

pub use client::{BalanceSource, ChainSource, EthereumClient};
pub use contracts::guessing_game::{GuessingGameClient, GuessingGameContract};
pub use wallet::WalletManager;
