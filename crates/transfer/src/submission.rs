use {
    crate::{
        balance::BalanceWatcher,
        error::TransferError,
        intent::{Attempt, Completion, TransferIntent},
    },
    alloy::primitives::TxHash,
    std::time::Duration,
    tokio::task::JoinHandle,
};

/// Result of a single send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { transaction_hash: TxHash },
    Failure { message: String },
}

impl SubmissionOutcome {
    pub fn from_result(result: anyhow::Result<TxHash>) -> Self {
        match result {
            Ok(transaction_hash) => Self::Success { transaction_hash },
            Err(err) => Self::Failure {
                message: format!("{err:#}"),
            },
        }
    }
}

/// A transfer that made it on chain.
#[derive(Debug)]
pub struct Settlement {
    pub transaction_hash: TxHash,
    /// Page of the transaction in the block explorer.
    pub explorer_url: String,
    /// Delayed balance refresh scheduled for the settled transfer.
    pub balance_refresh: JoinHandle<()>,
}

/// Closes a submission attempt: settles or fails the intent and reconciles
/// the balance afterwards.
#[derive(Clone)]
pub struct SubmissionHandler {
    balances: BalanceWatcher,
    explorer_tx_url: String,
    refresh_delay: Duration,
}

impl SubmissionHandler {
    pub fn new(balances: BalanceWatcher, explorer_tx_url: String, refresh_delay: Duration) -> Self {
        Self {
            balances,
            explorer_tx_url,
            refresh_delay,
        }
    }

    pub fn explorer_url(&self, transaction_hash: &TxHash) -> String {
        format!("{}{transaction_hash}", self.explorer_tx_url)
    }

    /// Applies `outcome` to `intent`. On success the intent is cleared and a
    /// balance refresh is scheduled. On failure the fields are kept and the
    /// error is returned for display. Outcomes of superseded attempts yield
    /// `Ok(None)`.
    pub fn handle(
        &self,
        intent: &mut TransferIntent,
        attempt: Attempt,
        outcome: SubmissionOutcome,
    ) -> Result<Option<Settlement>, TransferError> {
        match outcome {
            SubmissionOutcome::Success { transaction_hash } => {
                // the funds moved either way, so the balance is stale
                let balance_refresh = self.balances.refresh_after(self.refresh_delay);
                if intent.settle(attempt, transaction_hash) == Completion::Discarded {
                    return Ok(None);
                }
                tracing::info!(%transaction_hash, "transfer submitted");
                intent.reset();
                Ok(Some(Settlement {
                    transaction_hash,
                    explorer_url: self.explorer_url(&transaction_hash),
                    balance_refresh,
                }))
            }
            SubmissionOutcome::Failure { message } => {
                if intent.fail_submission(attempt) == Completion::Discarded {
                    return Ok(None);
                }
                tracing::warn!(%message, "transfer failed");
                Err(TransferError::submission(message))
            }
        }
    }
}
