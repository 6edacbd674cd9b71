//! Guess submission service.

use alloy::primitives::U256;
use serde_json::json;
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::{constants::NATIVE_SYMBOL, BalanceSource, GuessingGameContract},
    services::{analytics::GUESS_SUCCESS_EVENT, Analytics, Notifier},
    types::{parse_guess, GuessOutcome, RejectReason},
};

const ISSUING_GUESS: &str = "Issuing Guess...";
const UNEXPECTED_ERROR: &str =
    "Failed to issue Guess - unexpected error occurred, check the logs...";

/// Validates and submits guesses, reporting progress through a [`Notifier`].
///
/// Every call emits at least one message. Failures never escape
/// [`GuessSubmitter::submit_guess`]; they are turned into messages and a
/// [`GuessOutcome`].
#[derive(Clone)]
pub struct GuessSubmitter {
    contract: Arc<dyn GuessingGameContract>,
    signer: Arc<dyn BalanceSource>,
    notifier: Arc<dyn Notifier>,
    analytics: Arc<dyn Analytics>,
    /// Guess cost as configured, in ether.
    guess_cost: String,
    /// Guess cost in wei.
    guess_fee: U256,
}

impl GuessSubmitter {
    /// Create a submitter charging `guess_fee` wei per guess.
    ///
    /// `guess_cost` is the same amount in ether, used in messages.
    pub fn new(
        contract: Arc<dyn GuessingGameContract>,
        signer: Arc<dyn BalanceSource>,
        notifier: Arc<dyn Notifier>,
        analytics: Arc<dyn Analytics>,
        guess_cost: impl Into<String>,
        guess_fee: U256,
    ) -> Self {
        Self { contract, signer, notifier, analytics, guess_cost: guess_cost.into(), guess_fee }
    }

    /// Submit one guess and report the result.
    pub async fn submit_guess(&self, guess_value: &str) -> GuessOutcome {
        tracing::info!(guess = %guess_value, "Submitting guess");

        match self.try_submit(guess_value).await {
            Ok(outcome) => {
                tracing::info!(outcome = ?outcome, "Guess finished");
                outcome
            }
            Err(err) => self.report_failure(err),
        }
    }

    async fn try_submit(&self, guess_value: &str) -> Result<GuessOutcome> {
        let max_guess = self.contract.max_guess().await?;

        self.notify(ISSUING_GUESS);

        let guess = parse_guess(guess_value)?;
        if guess > max_guess {
            self.notify(format!(
                "Guess value is too high. You can only guess up to {max_guess}."
            ));
            return Ok(GuessOutcome::TooHigh);
        }

        let balance = self.signer.balance().await?;
        if balance < self.guess_fee {
            tracing::debug!(balance = %balance, fee = %self.guess_fee, "Balance below guess fee");
            self.notify(format!(
                "Insufficient balance. You need at least {} {NATIVE_SYMBOL} to submit a guess.",
                self.guess_cost
            ));
            return Ok(GuessOutcome::InsufficientBalance);
        }

        let tx_hash = self.contract.send_guess(guess, self.guess_fee).await?;
        let receipt = self.contract.wait_for_receipt(tx_hash).await?;
        self.notify(format!("Issued Guess tx: {:?}", receipt.transaction_hash));

        // Echo the guess as typed, not the parsed number
        let typed = guess_value.trim();
        let (success, feedback) = receipt.first_guess_result()?;
        if success {
            self.analytics.track(GUESS_SUCCESS_EVENT, json!({ "value": typed }));
            self.notify(format!(
                "[GuessingGame Contract] {typed} was the right answer ! You won!"
            ));
            Ok(GuessOutcome::Won)
        } else {
            self.notify(format!("[GuessingGame Contract] {feedback}"));
            self.notify(format!(
                "[GuessingGame Contract] {typed} was not the right answer. Try again..."
            ));
            Ok(GuessOutcome::Lost { feedback: feedback.to_string() })
        }
    }

    fn report_failure(&self, err: AppError) -> GuessOutcome {
        match err.reason() {
            Some(reason) => {
                tracing::warn!(reason = %reason, "Guess rejected");
                let reason = RejectReason::from_reason(&reason);
                self.notify(reason.message());
                GuessOutcome::Rejected { reason }
            }
            None => {
                tracing::error!(error = ?err, "Unexpected error while issuing guess");
                self.notify(UNEXPECTED_ERROR);
                GuessOutcome::UnexpectedError
            }
        }
    }

    fn notify(&self, text: impl Into<String>) {
        self.notifier.add_message(text.into());
    }
}
