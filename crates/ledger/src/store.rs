//! Storage seam between the ledger service and the backend

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{
    Category, Goal, Integration, NewGoal, NewGoalDeposit, NewRecurringBill, NewTransaction,
    RecurringBill, Transaction,
};

/// Table-level operations the bot performs against the backend
///
/// Every read is scoped to a single `user_id` except the integration lookups,
/// which are how a chat gets mapped to a user in the first place.
#[async_trait]
pub trait FinanceStore: Send + Sync {
    async fn integration_by_chat(&self, chat_id: &str) -> Result<Option<Integration>>;
    async fn integration_by_token(&self, token: &str) -> Result<Option<Integration>>;
    /// Store the chat on the integration and burn its connection token
    async fn link_integration(
        &self,
        integration_id: &str,
        chat_id: &str,
        username: Option<&str>,
    ) -> Result<()>;
    /// Integrations that have a Telegram chat attached
    async fn linked_integrations(&self) -> Result<Vec<Integration>>;

    async fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction>;
    async fn transactions_since(&self, user_id: &str, since: NaiveDate) -> Result<Vec<Transaction>>;
    /// Most recent first
    async fn recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
    async fn set_transaction_category(
        &self,
        user_id: &str,
        transaction_id: &str,
        category_id: &str,
    ) -> Result<()>;

    /// The user's own categories plus the global ones
    async fn categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Oldest first
    async fn goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    async fn insert_goal(&self, goal: &NewGoal) -> Result<Goal>;
    async fn insert_goal_deposit(&self, deposit: &NewGoalDeposit) -> Result<()>;
    async fn set_goal_amount(&self, user_id: &str, goal_id: &str, amount: f64) -> Result<()>;

    /// Ordered by due day
    async fn recurring_bills(&self, user_id: &str) -> Result<Vec<RecurringBill>>;
    async fn insert_recurring_bill(&self, bill: &NewRecurringBill) -> Result<RecurringBill>;
}
