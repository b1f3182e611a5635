//! Personal finance ledger backed by a hosted PostgREST database
//!
//! This crate owns the data model mirrored from the backend tables, the
//! [`FinanceStore`] seam the bot talks through, a Supabase implementation of
//! it, and the [`Ledger`] service that turns user intents into reads and
//! writes.

pub mod categorizer;
pub mod error;
pub mod memory;
pub mod models;
pub mod query;
pub mod service;
pub mod store;
pub mod supabase;

pub use error::{LedgerError, Result};
pub use memory::MemoryStore;
pub use models::{
    Category, Goal, Integration, NewGoal, NewGoalDeposit, NewRecurringBill, NewTransaction,
    RecurringBill, Transaction, TransactionKind,
};
pub use service::{
    AddedTransaction, Balance, BillStatus, BillsDue, GoalDeposit, GoalSelector, Ledger,
    LinkOutcome, LinkedUser,
};
pub use store::FinanceStore;
pub use supabase::SupabaseStore;
