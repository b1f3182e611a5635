//! Command handler functions for the Telegram bot
//!
//! This module contains all handler functions organized by area:
//! - `basic`: start/linking, help, menu, cancel
//! - `transactions`: expenses, income, undo
//! - `goals`: goal cards, creation and deposits
//! - `bills`: recurring bills and the bills-due-today notice
//! - `reports`: monthly balance and statement
//! - `text`: free text, menu buttons and intent execution

mod basic;
mod bills;
mod goals;
mod reports;
mod text;
mod transactions;

pub use basic::*;
pub use bills::*;
pub use goals::*;
pub use reports::*;
pub use text::*;
pub use transactions::*;
