use {
    crate::{
        amount::Amount,
        balance::BalanceWatcher,
        config::Config,
        error::TransferError,
        fee::FeeEstimator,
        intent::{Completion, IntentState, PrimaryAction, TransferIntent},
        submission::{Settlement, SubmissionHandler, SubmissionOutcome},
    },
    alloy::primitives::Address,
    std::sync::{Mutex, MutexGuard, PoisonError},
    tracing::instrument,
};

/// What the user is asked to acknowledge before the transfer is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub to: Address,
    pub amount: Amount,
    pub fee: Amount,
}

/// Drives a [`TransferIntent`] through its network calls.
///
/// The intent is only locked around state transitions, never across an
/// await, so edits stay possible while a request is in flight. Results of
/// requests that were overtaken by such edits are dropped.
pub struct TransferFlow {
    intent: Mutex<TransferIntent>,
    balances: BalanceWatcher,
    estimator: FeeEstimator,
    submissions: SubmissionHandler,
}

impl TransferFlow {
    pub fn new(balances: BalanceWatcher, config: &Config) -> Self {
        Self {
            intent: Default::default(),
            estimator: FeeEstimator::new(balances.wallet().clone()),
            submissions: SubmissionHandler::new(
                balances.clone(),
                config.explorer_tx_url.clone(),
                config.balance_refresh_delay,
            ),
            balances,
        }
    }

    pub fn balances(&self) -> &BalanceWatcher {
        &self.balances
    }

    /// Copy of the current draft.
    pub fn intent(&self) -> TransferIntent {
        self.lock().clone()
    }

    /// Applies a user edit, e.g. `flow.edit(|intent| intent.set_amount("1"))`.
    pub fn edit<R>(&self, edit: impl FnOnce(&mut TransferIntent) -> R) -> R {
        edit(&mut self.lock())
    }

    pub fn primary_action(&self) -> PrimaryAction {
        self.lock().primary_action(&self.balances.snapshot())
    }

    /// Validates the input and estimates the fee. Returns what needs to be
    /// confirmed, or `None` if the input changed before the estimate arrived.
    #[instrument(skip_all)]
    pub async fn request_transfer(&self) -> Result<Option<Confirmation>, TransferError> {
        let snapshot = self.balances.snapshot();
        let ticket = self.lock().begin(&snapshot)?;

        let fee = self.estimator.estimate(&ticket.transfer).await;

        let mut intent = self.lock();
        if intent.estimation_finished(ticket.attempt, fee)? == Completion::Discarded {
            return Ok(None);
        }
        match intent.state() {
            IntentState::Confirming { transfer, fee } => Ok(Some(Confirmation {
                to: transfer.to,
                amount: transfer.amount.clone(),
                fee: fee.clone(),
            })),
            _ => Ok(None),
        }
    }

    /// Abandons the pending confirmation.
    pub fn cancel(&self) -> Result<(), TransferError> {
        self.lock().cancel()
    }

    /// Sends the confirmed transfer. Returns `None` if the outcome no longer
    /// applies to the intent.
    #[instrument(skip_all)]
    pub async fn confirm(&self) -> Result<Option<Settlement>, TransferError> {
        let ticket = self.lock().confirm()?;

        let wallet = self.balances.wallet();
        let result = async {
            let request =
                wallet.prepare_transfer(ticket.transfer.to, ticket.transfer.amount.value)?;
            wallet.send(&request).await
        }
        .await;
        let outcome = SubmissionOutcome::from_result(result);

        self.submissions
            .handle(&mut self.lock(), ticket.attempt, outcome)
    }

    fn lock(&self) -> MutexGuard<'_, TransferIntent> {
        // the intent is valid after every transition, so a poisoned lock is
        // still usable
        self.intent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
