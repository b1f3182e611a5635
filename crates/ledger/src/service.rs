//! Ledger operations, one per user intent
//!
//! [`Ledger`] is what the bot handlers and the scheduler talk to. It validates
//! input, resolves categories and goals, and issues the table operations on
//! the underlying [`FinanceStore`]. Dates are passed in by the caller so the
//! bot's configured timezone decides what "today" means.

use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;

use crate::categorizer::{self, DEFAULT_CATEGORIES};
use crate::error::{LedgerError, Result};
use crate::models::{
    Category, Goal, NewGoal, NewGoalDeposit, NewRecurringBill, NewTransaction, RecurringBill,
    Transaction, TransactionKind,
};
use crate::store::FinanceStore;

/// A Telegram chat resolved to a web account
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedUser {
    pub user_id: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkOutcome {
    Linked { user_id: String },
    InvalidToken,
}

#[derive(Debug, Clone)]
pub struct AddedTransaction {
    pub transaction: Transaction,
    /// `None` when the description matched no known category
    pub category: Option<Category>,
}

/// Income and expense totals for a period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    pub since: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

impl Balance {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Where a recurring bill stands relative to a given day of the month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    DueToday,
    Past,
    Upcoming,
}

impl BillStatus {
    /// Bills due on a day the month does not have fall on its last day
    pub fn of(bill: &RecurringBill, today: NaiveDate) -> Self {
        let due = bill.due_day.min(days_in_month(today));
        match due.cmp(&today.day()) {
            std::cmp::Ordering::Equal => BillStatus::DueToday,
            std::cmp::Ordering::Less => BillStatus::Past,
            std::cmp::Ordering::Greater => BillStatus::Upcoming,
        }
    }
}

/// Bills falling due on one day
#[derive(Debug, Clone)]
pub struct BillsDue {
    pub day: u32,
    pub bills: Vec<RecurringBill>,
}

impl BillsDue {
    pub fn total(&self) -> f64 {
        self.bills.iter().map(|b| b.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct GoalDeposit {
    /// The goal with its updated `current_amount`
    pub goal: Goal,
    pub amount: f64,
}

/// How a goal is referenced: by id from a button, by name from text
#[derive(Debug, Clone, Copy)]
pub enum GoalSelector<'a> {
    Id(&'a str),
    Name(&'a str),
}

/// Finance operations for linked users
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn FinanceStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self { store }
    }

    pub fn with_store<S: FinanceStore + 'static>(store: S) -> Self {
        Self::new(Arc::new(store))
    }

    /// Resolve a chat to its web account, if linked
    pub async fn linked_user(&self, chat_id: &str) -> Result<Option<LinkedUser>> {
        Ok(self
            .store
            .integration_by_chat(chat_id)
            .await?
            .map(|integration| LinkedUser {
                user_id: integration.user_id,
                chat_id: chat_id.to_string(),
            }))
    }

    /// Attach a chat to the account that issued `token`; tokens are single use
    pub async fn link_chat(
        &self,
        token: &str,
        chat_id: &str,
        username: Option<&str>,
    ) -> Result<LinkOutcome> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(LinkOutcome::InvalidToken);
        }

        let integration = match self.store.integration_by_token(token).await? {
            Some(integration) => integration,
            None => return Ok(LinkOutcome::InvalidToken),
        };

        self.store
            .link_integration(&integration.id, chat_id, username)
            .await?;
        tracing::info!("Linked chat {} to user {}", chat_id, integration.user_id);

        Ok(LinkOutcome::Linked {
            user_id: integration.user_id,
        })
    }

    /// Every account with a chat attached
    pub async fn linked_users(&self) -> Result<Vec<LinkedUser>> {
        Ok(self
            .store
            .linked_integrations()
            .await?
            .into_iter()
            .filter_map(|integration| {
                Some(LinkedUser {
                    chat_id: integration.telegram_chat_id?,
                    user_id: integration.user_id,
                })
            })
            .collect())
    }

    pub async fn add_transaction(
        &self,
        user: &LinkedUser,
        kind: TransactionKind,
        amount: f64,
        description: &str,
        today: NaiveDate,
    ) -> Result<AddedTransaction> {
        let amount = validate_amount(amount)?;
        let description = clean_description(description);
        let category = self.guess_category(&user.user_id, &description).await?;

        let transaction = self
            .store
            .insert_transaction(&NewTransaction {
                user_id: user.user_id.clone(),
                amount,
                kind,
                description,
                category_id: category.as_ref().map(|c| c.id.clone()),
                date: today,
            })
            .await?;

        tracing::info!(
            "Recorded {} of {:.2} for user {}",
            kind.as_str(),
            amount,
            user.user_id
        );
        Ok(AddedTransaction {
            transaction,
            category,
        })
    }

    /// Remove the most recent transaction, returning it
    pub async fn delete_last(&self, user: &LinkedUser) -> Result<Option<Transaction>> {
        let last = match self
            .store
            .recent_transactions(&user.user_id, 1)
            .await?
            .into_iter()
            .next()
        {
            Some(tx) => tx,
            None => return Ok(None),
        };

        self.store.delete_transaction(&user.user_id, &last.id).await?;
        tracing::info!("Deleted transaction {} for user {}", last.id, user.user_id);
        Ok(Some(last))
    }

    /// Month-to-date totals
    pub async fn monthly_balance(&self, user: &LinkedUser, today: NaiveDate) -> Result<Balance> {
        let since = first_of_month(today);
        let transactions = self.store.transactions_since(&user.user_id, since).await?;
        Ok(summarize(since, &transactions))
    }

    /// Latest transactions, most recent first
    pub async fn statement(&self, user: &LinkedUser, limit: usize) -> Result<Vec<Transaction>> {
        self.store.recent_transactions(&user.user_id, limit).await
    }

    /// The default categories available to the user, in display order
    pub async fn category_options(&self, user: &LinkedUser) -> Result<Vec<Category>> {
        let categories = self.store.categories(&user.user_id).await?;
        Ok(DEFAULT_CATEGORIES
            .iter()
            .filter_map(|name| pick_category(&categories, name))
            .collect())
    }

    /// Assign a category the user can see to one of their transactions
    pub async fn set_category(
        &self,
        user: &LinkedUser,
        transaction_id: &str,
        category_id: &str,
    ) -> Result<Category> {
        let category = self
            .store
            .categories(&user.user_id)
            .await?
            .into_iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| LedgerError::NotFound("Categoria".to_string()))?;

        self.store
            .set_transaction_category(&user.user_id, transaction_id, category_id)
            .await?;
        Ok(category)
    }

    pub async fn goals(&self, user: &LinkedUser) -> Result<Vec<Goal>> {
        self.store.goals(&user.user_id).await
    }

    pub async fn create_goal(&self, user: &LinkedUser, name: &str, target: f64) -> Result<Goal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::invalid("Informe o nome da meta."));
        }
        let target = validate_amount(target)?;

        let goal = self
            .store
            .insert_goal(&NewGoal {
                user_id: user.user_id.clone(),
                name: name.to_string(),
                target_amount: target,
                current_amount: 0.0,
            })
            .await?;
        tracing::info!("Created goal {} for user {}", goal.id, user.user_id);
        Ok(goal)
    }

    /// Find a goal by id, or by name (exact first, then partial, ignoring case and accents)
    pub async fn find_goal(&self, user: &LinkedUser, selector: GoalSelector<'_>) -> Result<Option<Goal>> {
        let goals = self.store.goals(&user.user_id).await?;
        Ok(match selector {
            GoalSelector::Id(id) => goals.into_iter().find(|g| g.id == id),
            GoalSelector::Name(name) => {
                let wanted = categorizer::normalize(name);
                if wanted.is_empty() {
                    return Ok(None);
                }
                let exact = goals
                    .iter()
                    .position(|g| categorizer::normalize(&g.name) == wanted);
                let partial = || {
                    goals
                        .iter()
                        .position(|g| categorizer::normalize(&g.name).contains(&wanted))
                };
                exact.or_else(partial).map(|i| goals[i].clone())
            }
        })
    }

    /// Record a deposit and bump the goal's current amount
    pub async fn deposit_to_goal(
        &self,
        user: &LinkedUser,
        selector: GoalSelector<'_>,
        amount: f64,
    ) -> Result<GoalDeposit> {
        let amount = validate_amount(amount)?;
        let mut goal = self.find_goal(user, selector).await?.ok_or_else(|| match selector {
            GoalSelector::Name(name) => LedgerError::NotFound(format!("Meta \"{}\"", name.trim())),
            GoalSelector::Id(_) => LedgerError::NotFound("Meta".to_string()),
        })?;

        self.store
            .insert_goal_deposit(&NewGoalDeposit {
                goal_id: goal.id.clone(),
                user_id: user.user_id.clone(),
                amount,
                created_at: Utc::now(),
            })
            .await?;

        let new_total = round_cents(goal.current_amount + amount);
        self.store
            .set_goal_amount(&user.user_id, &goal.id, new_total)
            .await?;
        goal.current_amount = new_total;

        tracing::info!("Deposited {:.2} into goal {} for user {}", amount, goal.id, user.user_id);
        Ok(GoalDeposit { goal, amount })
    }

    /// Recurring expenses ordered by due day; recurring income rows are not bills
    pub async fn recurring_bills(&self, user: &LinkedUser) -> Result<Vec<RecurringBill>> {
        let mut bills: Vec<RecurringBill> = self
            .store
            .recurring_bills(&user.user_id)
            .await?
            .into_iter()
            .filter(|b| b.kind == TransactionKind::Expense)
            .collect();
        bills.sort_by_key(|b| b.due_day);
        Ok(bills)
    }

    pub async fn add_recurring_bill(
        &self,
        user: &LinkedUser,
        due_day: u32,
        amount: f64,
        description: &str,
    ) -> Result<RecurringBill> {
        if !(1..=31).contains(&due_day) {
            return Err(LedgerError::invalid("Dia inválido (use entre 1 e 31)."));
        }
        let amount = validate_amount(amount)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::invalid("Informe a descrição da conta."));
        }
        let category = self.guess_category(&user.user_id, description).await?;

        self.store
            .insert_recurring_bill(&NewRecurringBill {
                user_id: user.user_id.clone(),
                description: description.to_string(),
                amount,
                due_day,
                category_id: category.map(|c| c.id),
                kind: TransactionKind::Expense,
            })
            .await
    }

    /// Recurring bills falling due on `today`
    pub async fn bills_due(&self, user: &LinkedUser, today: NaiveDate) -> Result<BillsDue> {
        let bills = self
            .recurring_bills(user)
            .await?
            .into_iter()
            .filter(|b| BillStatus::of(b, today) == BillStatus::DueToday)
            .collect();
        Ok(BillsDue {
            day: today.day(),
            bills,
        })
    }

    async fn guess_category(&self, user_id: &str, description: &str) -> Result<Option<Category>> {
        let name = match categorizer::guess_category(description) {
            Some(name) => name,
            None => return Ok(None),
        };
        let categories = self.store.categories(user_id).await?;
        Ok(pick_category(&categories, name))
    }
}

/// Prefer the user's own category over a global one with the same name
fn pick_category(categories: &[Category], name: &str) -> Option<Category> {
    let mut matches = categories
        .iter()
        .filter(|c| categorizer::same_name(&c.name, name));
    let first = matches.next()?;
    if first.user_id.is_some() {
        return Some(first.clone());
    }
    Some(matches.find(|c| c.user_id.is_some()).unwrap_or(first).clone())
}

fn summarize(since: NaiveDate, transactions: &[Transaction]) -> Balance {
    let (income, expense) = transactions
        .iter()
        .fold((0.0, 0.0), |(income, expense), tx| match tx.kind {
            // Older rows stored expenses as negative amounts
            TransactionKind::Income => (income + tx.amount.abs(), expense),
            TransactionKind::Expense => (income, expense + tx.amount.abs()),
        });
    Balance {
        since,
        income: round_cents(income),
        expense: round_cents(expense),
    }
}

fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::invalid(
            "Valor inválido. Use um número maior que zero.",
        ));
    }
    let rounded = round_cents(amount);
    if rounded <= 0.0 {
        return Err(LedgerError::invalid(
            "Valor inválido. Use um número maior que zero.",
        ));
    }
    Ok(rounded)
}

fn clean_description(description: &str) -> String {
    let description = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if description.is_empty() {
        "Sem descrição".to_string()
    } else {
        description
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

pub fn days_in_month(day: NaiveDate) -> u32 {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}
