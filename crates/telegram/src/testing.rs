//! Store double for handler tests: a [`MemoryStore`] that can be told to fail

use async_trait::async_trait;
use chrono::NaiveDate;
use ledger::{
    Category, FinanceStore, Goal, Integration, LedgerError, MemoryStore, NewGoal, NewGoalDeposit,
    NewRecurringBill, NewTransaction, RecurringBill, Result, Transaction,
};

#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    /// Every call fails, as during a backend outage
    pub down: bool,
    /// Only this user's reads and writes fail
    pub failing_user: Option<String>,
}

impl FlakyStore {
    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    pub fn failing_for(user_id: &str) -> Self {
        Self {
            failing_user: Some(user_id.to_string()),
            ..Self::default()
        }
    }

    fn check(&self, user_id: Option<&str>) -> Result<()> {
        let user_fails = matches!((user_id, &self.failing_user), (Some(u), Some(f)) if u == f);
        if self.down || user_fails {
            return Err(LedgerError::Backend {
                status: 503,
                message: "Service Unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FinanceStore for FlakyStore {
    async fn integration_by_chat(&self, chat_id: &str) -> Result<Option<Integration>> {
        self.check(None)?;
        self.inner.integration_by_chat(chat_id).await
    }

    async fn integration_by_token(&self, token: &str) -> Result<Option<Integration>> {
        self.check(None)?;
        self.inner.integration_by_token(token).await
    }

    async fn link_integration(
        &self,
        integration_id: &str,
        chat_id: &str,
        username: Option<&str>,
    ) -> Result<()> {
        self.check(None)?;
        self.inner.link_integration(integration_id, chat_id, username).await
    }

    async fn linked_integrations(&self) -> Result<Vec<Integration>> {
        self.check(None)?;
        self.inner.linked_integrations().await
    }

    async fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        self.check(Some(&tx.user_id))?;
        self.inner.insert_transaction(tx).await
    }

    async fn transactions_since(&self, user_id: &str, since: NaiveDate) -> Result<Vec<Transaction>> {
        self.check(Some(user_id))?;
        self.inner.transactions_since(user_id, since).await
    }

    async fn recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        self.check(Some(user_id))?;
        self.inner.recent_transactions(user_id, limit).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        self.check(Some(user_id))?;
        self.inner.delete_transaction(user_id, transaction_id).await
    }

    async fn set_transaction_category(
        &self,
        user_id: &str,
        transaction_id: &str,
        category_id: &str,
    ) -> Result<()> {
        self.check(Some(user_id))?;
        self.inner
            .set_transaction_category(user_id, transaction_id, category_id)
            .await
    }

    async fn categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.check(Some(user_id))?;
        self.inner.categories(user_id).await
    }

    async fn goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.check(Some(user_id))?;
        self.inner.goals(user_id).await
    }

    async fn insert_goal(&self, goal: &NewGoal) -> Result<Goal> {
        self.check(Some(&goal.user_id))?;
        self.inner.insert_goal(goal).await
    }

    async fn insert_goal_deposit(&self, deposit: &NewGoalDeposit) -> Result<()> {
        self.check(Some(&deposit.user_id))?;
        self.inner.insert_goal_deposit(deposit).await
    }

    async fn set_goal_amount(&self, user_id: &str, goal_id: &str, amount: f64) -> Result<()> {
        self.check(Some(user_id))?;
        self.inner.set_goal_amount(user_id, goal_id, amount).await
    }

    async fn recurring_bills(&self, user_id: &str) -> Result<Vec<RecurringBill>> {
        self.check(Some(user_id))?;
        self.inner.recurring_bills(user_id).await
    }

    async fn insert_recurring_bill(&self, bill: &NewRecurringBill) -> Result<RecurringBill> {
        self.check(Some(&bill.user_id))?;
        self.inner.insert_recurring_bill(bill).await
    }
}
