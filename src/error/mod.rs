//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions.

use alloy::{
    sol_types::{Revert, SolError},
    transports::{RpcError, TransportErrorKind},
};
use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Prefix nodes put in front of decoded revert strings.
const EXECUTION_REVERTED: &str = "execution reverted";

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Pending transaction error.
    #[error("Pending transaction error: {0}")]
    PendingTransaction(String),

    /// The contract or the node rejected the call with a reason string.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Guess text that is not an unsigned integer.
    #[error("Invalid guess value: {0:?}")]
    InvalidGuess(String),

    /// Receipt did not carry the expected guess result event.
    #[error("Unexpected receipt: {0}")]
    UnexpectedReceipt(String),
}

impl AppError {
    /// Human-readable rejection reason, if the failure carries one.
    ///
    /// Failures without a reason (network faults, malformed receipts) are
    /// reported to users generically and only logged in full.
    pub fn reason(&self) -> Option<String> {
        match self {
            AppError::Reverted(reason) => Some(reason.clone()),
            AppError::InvalidGuess(value) => Some(format!("invalid guess value {value:?}")),
            _ => None,
        }
    }
}

/// Extract a revert reason from an RPC error.
///
/// ABI-encoded `Error(string)` data wins over the node's message, since not
/// every node formats the message the same way.
fn rpc_revert_reason(err: &RpcError<TransportErrorKind>) -> Option<String> {
    let payload = err.as_error_resp()?;

    if let Some(data) = payload.as_revert_data() {
        if let Ok(revert) = Revert::abi_decode(&data) {
            return Some(format!("{EXECUTION_REVERTED}: {}", revert.reason));
        }
    }

    Some(payload.message.to_string())
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        match rpc_revert_reason(&err) {
            Some(reason) => AppError::Reverted(reason),
            None => AppError::Transport(err.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for AppError {
    fn from(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(err) => match rpc_revert_reason(&err) {
                Some(reason) => AppError::Reverted(reason),
                None => AppError::Transport(err.to_string()),
            },
            other => AppError::Rpc(other.to_string()),
        }
    }
}

impl From<alloy::providers::PendingTransactionError> for AppError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        AppError::PendingTransaction(err.to_string())
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::hex::FromHexError> for AppError {
    fn from(err: alloy::hex::FromHexError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<AppError> for McpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidAddress(_) | AppError::Parse(_) | AppError::InvalidGuess(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            AppError::Config(_) => McpError::invalid_request(err.to_string(), None),
            _ => McpError::internal_error(err.to_string(), None),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
