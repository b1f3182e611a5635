use intent::IntentError;
use ledger::LedgerError;
use thiserror::Error;

use crate::constants::{emoji, text};

/// Failures a handler reports back to the chat
#[derive(Error, Debug)]
pub enum BotError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("intent error: {0}")]
    Intent(#[from] IntentError),
}

impl BotError {
    /// Errors the user caused and can fix, as opposed to infrastructure failures
    pub fn is_user_error(&self) -> bool {
        match self {
            BotError::Ledger(e) => e.is_user_error(),
            BotError::Intent(_) => false,
        }
    }
}

/// Helper trait to convert errors into user-friendly messages
pub trait UserMessage {
    fn user_message(&self) -> String;
}

impl UserMessage for BotError {
    fn user_message(&self) -> String {
        match self {
            BotError::Ledger(LedgerError::Invalid(msg)) => format!("{} {}", emoji::ERROR, msg),
            BotError::Ledger(LedgerError::NotFound(what)) => {
                format!("{} {} não encontrada.", emoji::ERROR, what)
            }
            BotError::Ledger(_) => text::GENERIC_ERROR.to_string(),
            BotError::Intent(_) => text::NOT_UNDERSTOOD.to_string(),
        }
    }
}
