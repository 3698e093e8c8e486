//! The draft of a pending transfer and the states it moves through until the
//! transaction is on chain.
//!
//! ```text
//! Editing -> Estimating -> Confirming -> Submitting -> Settled
//!    ^           |             |             |            |
//!    +-----------+-------------+-------------+------------+
//! ```
//!
//! Network calls are not made here. [`TransferIntent::begin`] and
//! [`TransferIntent::confirm`] hand out a [`Ticket`] naming the attempt; the
//! caller performs the call and reports back with that attempt. Reports for an
//! attempt that is no longer current are discarded, so results that arrive
//! after the user edited or cancelled never leak into the draft.

use {
    crate::{
        amount::Amount,
        error::{InputProblem, TransferError},
        validation,
        wallet::WalletSnapshot,
    },
    alloy::primitives::{Address, TxHash},
};

/// Identifies one estimation or submission request.
pub type Attempt = u64;

/// Validated inputs of a transfer, captured when the user asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub to: Address,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentState {
    Editing,
    Estimating {
        attempt: Attempt,
        transfer: Transfer,
    },
    Confirming {
        transfer: Transfer,
        fee: Amount,
    },
    Submitting {
        attempt: Attempt,
        transfer: Transfer,
        fee: Amount,
    },
    Settled {
        transaction_hash: TxHash,
    },
}

impl IntentState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Estimating { .. } => "estimating",
            Self::Confirming { .. } => "confirming",
            Self::Submitting { .. } => "submitting",
            Self::Settled { .. } => "settled",
        }
    }
}

/// Permission to run one network request for a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub attempt: Attempt,
    pub transfer: Transfer,
}

/// Whether a reported result was applied to the draft.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The attempt was superseded; the result was dropped.
    Discarded,
}

/// Model of the primary action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryAction {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
    recipient: String,
    amount_text: String,
    state: IntentState,
    last_attempt: Attempt,
}

impl Default for TransferIntent {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            amount_text: String::new(),
            state: IntentState::Editing,
            last_attempt: 0,
        }
    }
}

impl TransferIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn state(&self) -> &IntentState {
        &self.state
    }

    /// Fee of the transfer awaiting confirmation or being submitted.
    pub fn estimated_fee(&self) -> Option<&Amount> {
        match &self.state {
            IntentState::Confirming { fee, .. } | IntentState::Submitting { fee, .. } => Some(fee),
            _ => None,
        }
    }

    pub fn set_recipient(&mut self, text: impl Into<String>) {
        self.recipient = text.into();
        self.invalidate_estimate();
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.amount_text = text.into();
        self.invalidate_estimate();
    }

    /// Takes a recipient from the clipboard or a scanned QR code. Text that is
    /// not an address is rejected and the current recipient is kept.
    pub fn paste_recipient(&mut self, text: &str) -> Result<(), TransferError> {
        if !validation::is_valid_address(text) {
            return Err(TransferError::InvalidRecipient(InputProblem::Malformed));
        }
        self.set_recipient(text);
        Ok(())
    }

    /// Fills the amount with the whole balance. Returns `false` when the
    /// balance is not known yet.
    pub fn fill_max(&mut self, snapshot: &WalletSnapshot) -> bool {
        match &snapshot.balance {
            Some(balance) => {
                self.set_amount(balance.display_value.clone());
                true
            }
            None => false,
        }
    }

    /// Runs every local check on the current input, in the order the user is
    /// told about them.
    pub fn validate(&self, snapshot: &WalletSnapshot) -> Result<Transfer, TransferError> {
        if !snapshot.is_connected() {
            return Err(TransferError::NotConnected);
        }

        let recipient = self.recipient.as_str();
        if recipient.trim().is_empty() {
            return Err(TransferError::InvalidRecipient(InputProblem::Empty));
        }
        if !validation::is_valid_address(recipient) {
            return Err(TransferError::InvalidRecipient(InputProblem::Malformed));
        }
        let to: Address = recipient
            .parse()
            .map_err(|_| TransferError::InvalidRecipient(InputProblem::Malformed))?;

        let amount_text = self.amount_text.as_str();
        if amount_text.trim().is_empty() {
            return Err(TransferError::InvalidAmount(InputProblem::Empty));
        }
        if !validation::is_valid_amount(amount_text) {
            return Err(TransferError::InvalidAmount(InputProblem::Malformed));
        }
        if !validation::has_sufficient_balance(amount_text, snapshot) {
            return Err(TransferError::InsufficientBalance);
        }
        let amount = Amount::parse(amount_text)
            .map_err(|_| TransferError::InvalidAmount(InputProblem::Malformed))?;

        Ok(Transfer { to, amount })
    }

    /// `Editing -> Estimating`. On error nothing changes.
    pub fn begin(&mut self, snapshot: &WalletSnapshot) -> Result<Ticket, TransferError> {
        if self.state != IntentState::Editing {
            return Err(self.busy());
        }
        let transfer = self.validate(snapshot)?;
        let attempt = self.next_attempt();
        tracing::debug!(attempt, to = %transfer.to, amount = %transfer.amount, "estimating fee");
        self.state = IntentState::Estimating {
            attempt,
            transfer: transfer.clone(),
        };
        Ok(Ticket { attempt, transfer })
    }

    /// `Estimating -> Confirming` on success, `Estimating -> Editing` on
    /// failure. A failure is returned only if it was applied.
    pub fn estimation_finished(
        &mut self,
        attempt: Attempt,
        result: Result<Amount, TransferError>,
    ) -> Result<Completion, TransferError> {
        let transfer = match &self.state {
            IntentState::Estimating {
                attempt: current,
                transfer,
            } if *current == attempt => transfer.clone(),
            _ => {
                tracing::debug!(attempt, state = self.state.name(), "discarding stale estimation");
                return Ok(Completion::Discarded);
            }
        };

        match result {
            Ok(fee) => {
                tracing::debug!(attempt, %fee, "awaiting confirmation");
                self.state = IntentState::Confirming { transfer, fee };
                Ok(Completion::Applied)
            }
            Err(err) => {
                tracing::warn!(attempt, ?err, "fee estimation failed");
                self.state = IntentState::Editing;
                Err(err)
            }
        }
    }

    /// `Confirming -> Editing`. Cancelling while editing is a no-op.
    pub fn cancel(&mut self) -> Result<(), TransferError> {
        match self.state {
            IntentState::Editing => Ok(()),
            IntentState::Confirming { .. } => {
                tracing::debug!("confirmation cancelled");
                self.state = IntentState::Editing;
                Ok(())
            }
            _ => Err(self.busy()),
        }
    }

    /// `Confirming -> Submitting`. The ticket carries the inputs that were
    /// validated in [`Self::begin`], not whatever the fields hold now.
    pub fn confirm(&mut self) -> Result<Ticket, TransferError> {
        let IntentState::Confirming { transfer, fee } = &self.state else {
            return Err(self.busy());
        };
        let (transfer, fee) = (transfer.clone(), fee.clone());
        let attempt = self.next_attempt();
        tracing::debug!(attempt, "submitting transfer");
        self.state = IntentState::Submitting {
            attempt,
            transfer: transfer.clone(),
            fee,
        };
        Ok(Ticket { attempt, transfer })
    }

    /// `Submitting -> Settled`.
    pub fn settle(&mut self, attempt: Attempt, transaction_hash: TxHash) -> Completion {
        if !self.is_submitting(attempt) {
            tracing::debug!(attempt, state = self.state.name(), "discarding stale submission");
            return Completion::Discarded;
        }
        tracing::debug!(attempt, %transaction_hash, "transfer settled");
        self.state = IntentState::Settled { transaction_hash };
        Completion::Applied
    }

    /// `Submitting -> Editing`. The fields are kept so the user can retry.
    pub fn fail_submission(&mut self, attempt: Attempt) -> Completion {
        if !self.is_submitting(attempt) {
            tracing::debug!(attempt, state = self.state.name(), "discarding stale submission");
            return Completion::Discarded;
        }
        self.state = IntentState::Editing;
        Completion::Applied
    }

    /// `Settled -> Editing` with all fields cleared. Does nothing in any other
    /// state, so it can be called more than once.
    pub fn reset(&mut self) {
        if let IntentState::Settled { .. } = self.state {
            self.recipient.clear();
            self.amount_text.clear();
            self.state = IntentState::Editing;
        }
    }

    /// Label and availability of the primary button.
    pub fn primary_action(&self, snapshot: &WalletSnapshot) -> PrimaryAction {
        if !snapshot.is_connected() {
            return PrimaryAction {
                label: "Connect Wallet",
                enabled: true,
            };
        }
        let label = match self.state {
            IntentState::Estimating { .. } => "Estimating...",
            IntentState::Submitting { .. } => "Transferring...",
            _ => "Transfer",
        };
        let enabled = matches!(self.state, IntentState::Editing)
            && validation::is_valid_address(&self.recipient)
            && validation::is_valid_amount(&self.amount_text);
        PrimaryAction { label, enabled }
    }

    fn invalidate_estimate(&mut self) {
        if let IntentState::Estimating { .. } | IntentState::Confirming { .. } = self.state {
            tracing::debug!(state = self.state.name(), "input changed, dropping estimate");
            self.state = IntentState::Editing;
        }
    }

    fn is_submitting(&self, attempt: Attempt) -> bool {
        matches!(self.state, IntentState::Submitting { attempt: current, .. } if current == attempt)
    }

    fn next_attempt(&mut self) -> Attempt {
        self.last_attempt += 1;
        self.last_attempt
    }

    fn busy(&self) -> TransferError {
        TransferError::Busy {
            state: self.state.name(),
        }
    }
}
