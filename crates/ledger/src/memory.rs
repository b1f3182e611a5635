//! In-process [`FinanceStore`] used by tests and by local runs without a backend

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::categorizer;
use crate::error::{LedgerError, Result};
use crate::models::{
    Category, CategoryRef, Goal, Integration, NewGoal, NewGoalDeposit, NewRecurringBill,
    NewTransaction, RecurringBill, Transaction,
};
use crate::store::FinanceStore;

#[derive(Default)]
struct Tables {
    next_id: u64,
    integrations: Vec<Integration>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    goals: Vec<Goal>,
    deposits: Vec<NewGoalDeposit>,
    bills: Vec<RecurringBill>,
}

impl Tables {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// Thread-safe store keeping every table in memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a web account waiting to be linked with `token`
    pub fn add_pending_integration(&self, user_id: &str, token: &str) -> String {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.integrations.push(Integration {
            id: id.clone(),
            user_id: user_id.to_string(),
            telegram_chat_id: None,
            telegram_username: None,
            connection_token: Some(token.to_string()),
        });
        id
    }

    /// Register a web account already linked to `chat_id`
    pub fn add_linked_integration(&self, user_id: &str, chat_id: &str) -> String {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.integrations.push(Integration {
            id: id.clone(),
            user_id: user_id.to_string(),
            telegram_chat_id: Some(chat_id.to_string()),
            telegram_username: None,
            connection_token: None,
        });
        id
    }

    /// Global rows for every category the keyword guesser can pick
    pub fn seed_global_categories(&self) {
        for name in categorizer::known_categories() {
            self.add_category(name, None);
        }
    }

    /// Add a category; `user_id: None` makes it global
    pub fn add_category(&self, name: &str, user_id: Option<&str>) -> String {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.categories.push(Category {
            id: id.clone(),
            name: name.to_string(),
            user_id: user_id.map(str::to_string),
        });
        id
    }

    /// Deposits recorded so far, oldest first
    #[cfg(test)]
    pub(crate) fn deposits(&self) -> Vec<NewGoalDeposit> {
        self.tables().deposits.clone()
    }
}

#[async_trait]
impl FinanceStore for MemoryStore {
    async fn integration_by_chat(&self, chat_id: &str) -> Result<Option<Integration>> {
        Ok(self
            .tables()
            .integrations
            .iter()
            .find(|i| i.telegram_chat_id.as_deref() == Some(chat_id))
            .cloned())
    }

    async fn integration_by_token(&self, token: &str) -> Result<Option<Integration>> {
        Ok(self
            .tables()
            .integrations
            .iter()
            .find(|i| i.connection_token.as_deref() == Some(token))
            .cloned())
    }

    async fn link_integration(
        &self,
        integration_id: &str,
        chat_id: &str,
        username: Option<&str>,
    ) -> Result<()> {
        let mut tables = self.tables();
        let integration = tables
            .integrations
            .iter_mut()
            .find(|i| i.id == integration_id)
            .ok_or_else(|| LedgerError::NotFound(format!("integration {}", integration_id)))?;
        integration.telegram_chat_id = Some(chat_id.to_string());
        integration.telegram_username = username.map(str::to_string);
        integration.connection_token = None;
        Ok(())
    }

    async fn linked_integrations(&self) -> Result<Vec<Integration>> {
        Ok(self
            .tables()
            .integrations
            .iter()
            .filter(|i| i.telegram_chat_id.is_some())
            .cloned()
            .collect())
    }

    async fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let category = tx.category_id.as_ref().and_then(|cid| {
            tables
                .categories
                .iter()
                .find(|c| &c.id == cid)
                .map(|c| CategoryRef { name: c.name.clone() })
        });
        let row = Transaction {
            id,
            user_id: tx.user_id.clone(),
            amount: tx.amount,
            kind: tx.kind,
            description: tx.description.clone(),
            category_id: tx.category_id.clone(),
            date: Some(tx.date),
            created_at: Some(Utc::now()),
            category,
        };
        tables.transactions.push(row.clone());
        Ok(row)
    }

    async fn transactions_since(&self, user_id: &str, since: NaiveDate) -> Result<Vec<Transaction>> {
        Ok(self
            .tables()
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id && t.day().is_some_and(|d| d >= since))
            .cloned()
            .collect())
    }

    async fn recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        // Insertion order is creation order
        Ok(self
            .tables()
            .transactions
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        self.tables()
            .transactions
            .retain(|t| !(t.user_id == user_id && t.id == transaction_id));
        Ok(())
    }

    async fn set_transaction_category(
        &self,
        user_id: &str,
        transaction_id: &str,
        category_id: &str,
    ) -> Result<()> {
        let mut tables = self.tables();
        let name = tables
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name.clone());
        if let Some(tx) = tables
            .transactions
            .iter_mut()
            .find(|t| t.user_id == user_id && t.id == transaction_id)
        {
            tx.category_id = Some(category_id.to_string());
            tx.category = name.map(|name| CategoryRef { name });
        }
        Ok(())
    }

    async fn categories(&self, user_id: &str) -> Result<Vec<Category>> {
        Ok(self
            .tables()
            .categories
            .iter()
            .filter(|c| c.user_id.as_deref().map_or(true, |owner| owner == user_id))
            .cloned()
            .collect())
    }

    async fn goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .tables()
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_goal(&self, goal: &NewGoal) -> Result<Goal> {
        let mut tables = self.tables();
        let row = Goal {
            id: tables.next_id(),
            user_id: goal.user_id.clone(),
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            created_at: Some(Utc::now()),
        };
        tables.goals.push(row.clone());
        Ok(row)
    }

    async fn insert_goal_deposit(&self, deposit: &NewGoalDeposit) -> Result<()> {
        self.tables().deposits.push(deposit.clone());
        Ok(())
    }

    async fn set_goal_amount(&self, user_id: &str, goal_id: &str, amount: f64) -> Result<()> {
        if let Some(goal) = self
            .tables()
            .goals
            .iter_mut()
            .find(|g| g.user_id == user_id && g.id == goal_id)
        {
            goal.current_amount = amount;
        }
        Ok(())
    }

    async fn recurring_bills(&self, user_id: &str) -> Result<Vec<RecurringBill>> {
        let mut bills: Vec<RecurringBill> = self
            .tables()
            .bills
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bills.sort_by_key(|b| b.due_day);
        Ok(bills)
    }

    async fn insert_recurring_bill(&self, bill: &NewRecurringBill) -> Result<RecurringBill> {
        let mut tables = self.tables();
        let row = RecurringBill {
            id: tables.next_id(),
            user_id: bill.user_id.clone(),
            description: bill.description.clone(),
            amount: bill.amount,
            due_day: bill.due_day,
            category_id: bill.category_id.clone(),
            kind: bill.kind,
        };
        tables.bills.push(row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_link_burns_token() {
        let store = MemoryStore::new();
        let id = store.add_pending_integration("u1", "tok-1");

        let found = store.integration_by_token("tok-1").await.unwrap().unwrap();
        assert_eq!(found.id, id);

        store.link_integration(&id, "555", Some("ana")).await.unwrap();
        assert!(store.integration_by_token("tok-1").await.unwrap().is_none());

        let linked = store.integration_by_chat("555").await.unwrap().unwrap();
        assert_eq!(linked.user_id, "u1");
        assert_eq!(linked.telegram_username.as_deref(), Some("ana"));
    }

    #[tokio::test]
    async fn test_seeded_categories_enable_guessing_and_picker() {
        use crate::models::TransactionKind;
        use crate::service::{Ledger, LinkedUser};

        let store = MemoryStore::new();
        store.seed_global_categories();
        let ledger = Ledger::with_store(store);
        let user = LinkedUser {
            user_id: "u1".into(),
            chat_id: "1".into(),
        };

        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let added = ledger
            .add_transaction(&user, TransactionKind::Expense, 45.0, "Pizza", today)
            .await
            .unwrap();
        assert_eq!(added.category.map(|c| c.name).as_deref(), Some("Alimentação"));

        let added = ledger
            .add_transaction(&user, TransactionKind::Income, 800.0, "Freela", today)
            .await
            .unwrap();
        assert_eq!(added.category.map(|c| c.name).as_deref(), Some("Renda Extra"));

        let options = ledger.category_options(&user).await.unwrap();
        assert_eq!(options.len(), categorizer::DEFAULT_CATEGORIES.len());
    }

    #[tokio::test]
    async fn test_categories_scoped_to_user_and_global() {
        let store = MemoryStore::new();
        store.add_category("Lazer", None);
        store.add_category("Pets", Some("u1"));
        store.add_category("Hobbies", Some("u2"));

        let names: Vec<String> = store
            .categories("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Lazer", "Pets"]);
    }
}
