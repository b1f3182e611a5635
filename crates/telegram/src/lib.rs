//! Telegram front end of the finance bot
//!
//! Commands, reply/inline keyboards, free-text routing and the daily bills
//! notice, all on top of [`ledger::Ledger`] and [`intent::IntentExtractor`].

pub mod auth;
pub mod callbacks;
pub mod commands;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod keyboards;
pub mod rate_limit;
pub mod scheduler;
pub mod telegram;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

pub use error::{BotError, UserMessage};
pub use teloxide::prelude::Dispatcher;
pub use types::{BotSettings, Command, HandlerResult, MyDialogue, State};
