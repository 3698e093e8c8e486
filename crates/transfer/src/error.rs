use thiserror::Error;

/// Why a text field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProblem {
    Empty,
    Malformed,
}

/// Everything that can end a transfer attempt. None of these are fatal: the
/// user is shown the message and may trigger the action again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Please connect your wallet first")]
    NotConnected,

    #[error("{}", recipient_message(.0))]
    InvalidRecipient(InputProblem),

    #[error("{}", amount_message(.0))]
    InvalidAmount(InputProblem),

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("{message}")]
    EstimationFailed { message: String },

    #[error("{message}")]
    SubmissionFailed { message: String },

    /// The action is not available in the current state, e.g. a second
    /// transfer while one is still being submitted.
    #[error("a transfer is already {state}")]
    Busy { state: &'static str },
}

impl TransferError {
    /// Wraps a failed fee lookup, keeping the collaborator's message.
    pub fn estimation(err: anyhow::Error) -> Self {
        Self::EstimationFailed {
            message: non_empty(format!("{err:#}"), "Unable to estimate transaction fee"),
        }
    }

    /// Wraps a failed or rejected send, keeping the collaborator's message.
    pub fn submission(message: impl Into<String>) -> Self {
        Self::SubmissionFailed {
            message: non_empty(message.into(), "Unknown error occurred"),
        }
    }

    /// Heading under which the error is presented to the user.
    pub fn title(&self) -> &'static str {
        match self {
            Self::EstimationFailed { .. } => "Estimation Failed",
            Self::SubmissionFailed { .. } => "Transaction Failed",
            _ => "Error",
        }
    }

    /// Whether the error was raised by local input checks, before anything
    /// was sent to the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotConnected
                | Self::InvalidRecipient(_)
                | Self::InvalidAmount(_)
                | Self::InsufficientBalance
        )
    }
}

fn recipient_message(problem: &InputProblem) -> &'static str {
    match problem {
        InputProblem::Empty => "Please enter a recipient address",
        InputProblem::Malformed => "Please enter a valid Ethereum address",
    }
}

fn amount_message(problem: &InputProblem) -> &'static str {
    match problem {
        InputProblem::Empty => "Please enter an amount to transfer",
        InputProblem::Malformed => "Please enter a valid amount (must be greater than 0)",
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    match message.trim().is_empty() {
        true => fallback.to_string(),
        false => message,
    }
}
