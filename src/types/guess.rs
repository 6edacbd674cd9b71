//! Guess-related types.

use alloy::primitives::{TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Result of a single guess submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GuessOutcome {
    /// Guess exceeded the contract's `MAX_GUESS`; nothing was submitted.
    TooHigh,
    /// Wallet cannot cover the guess cost; nothing was submitted.
    InsufficientBalance,
    /// The contract accepted the guess as correct.
    Won,
    /// The guess was mined but was not the answer.
    Lost {
        /// Feedback text from the contract event.
        feedback: String,
    },
    /// The contract or node refused the guess.
    Rejected {
        /// Why it was refused.
        reason: RejectReason,
    },
    /// Failure without a reason; details went to the diagnostic log.
    UnexpectedError,
}

/// Known rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Guessing round has not been opened.
    RoundNotOpen,
    /// Player is not whitelisted.
    NotWhitelisted,
    /// Player has used all guesses for the current round.
    GuessesExhausted,
    /// Any other reason string.
    Other(String),
}

/// Revert strings the contract is known to emit, matched exactly.
const KNOWN_REVERTS: &[(&str, RejectReason)] = &[
    ("execution reverted: Guessing is not open yet", RejectReason::RoundNotOpen),
    ("execution reverted: Only whitelisted players can make guesses", RejectReason::NotWhitelisted),
    (
        "execution reverted: You have exhausted your guesses for this round",
        RejectReason::GuessesExhausted,
    ),
];

impl RejectReason {
    /// Classify a reason string.
    pub fn from_reason(reason: &str) -> Self {
        KNOWN_REVERTS
            .iter()
            .find(|(known, _)| *known == reason)
            .map(|(_, code)| code.clone())
            .unwrap_or_else(|| RejectReason::Other(reason.to_string()))
    }

    /// User-facing message for this rejection.
    pub fn message(&self) -> String {
        match self {
            RejectReason::RoundNotOpen => {
                "[GuessingGame Contract] The round hasn't started yet, keep an eye at our Discord!"
                    .to_string()
            }
            RejectReason::NotWhitelisted => "[GuessingGame Contract] Only whitelisted players can \
                 make guesses. Please register in Discord to participate."
                .to_string(),
            RejectReason::GuessesExhausted => "[GuessingGame Contract] You have exhausted your \
                 guesses for this round, stay tuned for the next round start!"
                .to_string(),
            RejectReason::Other(reason) => format!("Failed to issue Guess - {reason} ..."),
        }
    }
}

/// A decoded receipt log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptEvent {
    /// The contract's `GuessResult` event.
    GuessResult {
        /// Whether the guess was correct.
        success: bool,
        /// Contract feedback (e.g. "too low").
        feedback: String,
    },
    /// A log this client has no ABI for.
    Unrecognized,
}

/// Confirmed guess transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReceipt {
    /// Hash of the mined transaction.
    pub transaction_hash: TxHash,
    /// Receipt logs, in emission order.
    pub events: Vec<ReceiptEvent>,
}

impl GuessReceipt {
    /// The guess result carried by the first event of the receipt.
    pub fn first_guess_result(&self) -> Result<(bool, &str)> {
        match self.events.first() {
            Some(ReceiptEvent::GuessResult { success, feedback }) => Ok((*success, feedback)),
            Some(ReceiptEvent::Unrecognized) => Err(AppError::UnexpectedReceipt(format!(
                "first event of {:?} is not a guess result",
                self.transaction_hash
            ))),
            None => Err(AppError::UnexpectedReceipt(format!(
                "receipt {:?} has no events",
                self.transaction_hash
            ))),
        }
    }
}

/// Result of the `submit_guess` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessReport {
    /// How the guess ended.
    pub outcome: GuessOutcome,
    /// Messages emitted while processing the guess, oldest first.
    pub messages: Vec<String>,
}

/// Game and wallet state response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    /// Chain ID of the connected network.
    pub chain_id: u64,
    /// GuessingGame contract address.
    pub contract_address: String,
    /// Signing wallet address.
    pub wallet_address: String,
    /// Largest accepted guess.
    pub max_guess: String,
    /// Guess cost in ETH (human-readable).
    pub guess_cost: String,
    /// Guess cost in wei.
    pub guess_fee_wei: String,
    /// Wallet balance in ETH (human-readable).
    pub wallet_balance: String,
    /// Wallet balance in wei.
    pub wallet_balance_wei: String,
    /// Whether the wallet can pay for a guess.
    pub can_afford_guess: bool,
}

/// Parse guess text as an unsigned 256-bit integer.
pub fn parse_guess(value: &str) -> Result<U256> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidGuess(value.to_string()));
    }
    trimmed.parse::<U256>().map_err(|_| AppError::InvalidGuess(value.to_string()))
}
