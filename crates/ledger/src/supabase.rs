//! Supabase (PostgREST) implementation of [`FinanceStore`]

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::error::{LedgerError, Result};
use crate::models::{
    Category, Goal, Integration, NewGoal, NewGoalDeposit, NewRecurringBill, NewTransaction,
    RecurringBill, Transaction,
};
use crate::query::Query;
use crate::store::FinanceStore;

const INTEGRATIONS: &str = "user_integrations";
const TRANSACTIONS: &str = "transactions";
const CATEGORIES: &str = "categories";
const GOALS: &str = "goals";
const GOAL_DEPOSITS: &str = "goal_deposits";
const RECURRING_BILLS: &str = "recurring_bills";

/// Wrapper around the Supabase REST endpoint, authenticated with the service key
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    service_key: String,
}

impl SupabaseStore {
    /// Create a store for the project at `base_url` (e.g. `https://xyz.supabase.co`)
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            service_key: service_key.into(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: Query) -> Result<Vec<T>> {
        tracing::debug!("GET {}?{}", table, query.to_query_string());
        let response = self
            .request(Method::GET, table)
            .query(query.pairs())
            .send()
            .await?;
        decode(table, response).await
    }

    async fn select_one<T: DeserializeOwned>(&self, table: &str, query: Query) -> Result<Option<T>> {
        let rows = self.select(table, query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a row and return it as stored
    async fn insert<B, T>(&self, table: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let rows: Vec<T> = decode(table, response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| LedgerError::EmptyResponse(table.to_string()))
    }

    async fn insert_minimal<B: Serialize + Sync>(&self, table: &str, body: &B) -> Result<()> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        check(table, response).await
    }

    async fn update<B: Serialize + Sync>(&self, table: &str, query: Query, body: &B) -> Result<()> {
        let response = self
            .request(Method::PATCH, table)
            .query(query.pairs())
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        check(table, response).await
    }

    async fn delete(&self, table: &str, query: Query) -> Result<()> {
        let response = self
            .request(Method::DELETE, table)
            .query(query.pairs())
            .send()
            .await?;
        check(table, response).await
    }
}

async fn check(table: &str, response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response.text().await.unwrap_or_default();
    tracing::error!("Backend error on {}: {} {}", table, status, message);
    Err(LedgerError::Backend {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(table: &str, response: Response) -> Result<Vec<T>> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::error!("Backend error on {}: {} {}", table, status, message);
        return Err(LedgerError::Backend {
            status: status.as_u16(),
            message,
        });
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Failed to decode {} rows: {}", table, e);
        LedgerError::Decode(e)
    })
}

#[async_trait]
impl FinanceStore for SupabaseStore {
    async fn integration_by_chat(&self, chat_id: &str) -> Result<Option<Integration>> {
        self.select_one(INTEGRATIONS, Query::new().select("*").eq("telegram_chat_id", chat_id))
            .await
    }

    async fn integration_by_token(&self, token: &str) -> Result<Option<Integration>> {
        self.select_one(INTEGRATIONS, Query::new().select("*").eq("connection_token", token))
            .await
    }

    async fn link_integration(
        &self,
        integration_id: &str,
        chat_id: &str,
        username: Option<&str>,
    ) -> Result<()> {
        let body = json!({
            "telegram_chat_id": chat_id,
            "telegram_username": username,
            "connection_token": null,
        });
        self.update(INTEGRATIONS, Query::new().eq("id", integration_id), &body)
            .await
    }

    async fn linked_integrations(&self) -> Result<Vec<Integration>> {
        self.select(INTEGRATIONS, Query::new().select("*").not_null("telegram_chat_id"))
            .await
    }

    async fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        self.insert(TRANSACTIONS, tx).await
    }

    async fn transactions_since(&self, user_id: &str, since: NaiveDate) -> Result<Vec<Transaction>> {
        let query = Query::new()
            .select("*")
            .eq("user_id", user_id)
            .gte("date", since);
        self.select(TRANSACTIONS, query).await
    }

    async fn recent_transactions(&self, user_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        let query = Query::new()
            .select("*,categories(name)")
            .eq("user_id", user_id)
            .order("created_at", false)
            .order("date", false)
            .limit(limit);
        self.select(TRANSACTIONS, query).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        let query = Query::new().eq("id", transaction_id).eq("user_id", user_id);
        self.delete(TRANSACTIONS, query).await
    }

    async fn set_transaction_category(
        &self,
        user_id: &str,
        transaction_id: &str,
        category_id: &str,
    ) -> Result<()> {
        let query = Query::new().eq("id", transaction_id).eq("user_id", user_id);
        self.update(TRANSACTIONS, query, &json!({ "category_id": category_id }))
            .await
    }

    async fn categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let query = Query::new()
            .select("id,name,user_id")
            .or(&format!("user_id.eq.{},user_id.is.null", user_id))
            .order("name", true);
        self.select(CATEGORIES, query).await
    }

    async fn goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let query = Query::new()
            .select("*")
            .eq("user_id", user_id)
            .order("created_at", true);
        self.select(GOALS, query).await
    }

    async fn insert_goal(&self, goal: &NewGoal) -> Result<Goal> {
        self.insert(GOALS, goal).await
    }

    async fn insert_goal_deposit(&self, deposit: &NewGoalDeposit) -> Result<()> {
        self.insert_minimal(GOAL_DEPOSITS, deposit).await
    }

    async fn set_goal_amount(&self, user_id: &str, goal_id: &str, amount: f64) -> Result<()> {
        let query = Query::new().eq("id", goal_id).eq("user_id", user_id);
        self.update(GOALS, query, &json!({ "current_amount": amount }))
            .await
    }

    async fn recurring_bills(&self, user_id: &str) -> Result<Vec<RecurringBill>> {
        let query = Query::new()
            .select("*")
            .eq("user_id", user_id)
            .eq("type", "expense")
            .order("due_day", true);
        self.select(RECURRING_BILLS, query).await
    }

    async fn insert_recurring_bill(&self, bill: &NewRecurringBill) -> Result<RecurringBill> {
        self.insert(RECURRING_BILLS, bill).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url_normalization() {
        let store = SupabaseStore::new("https://demo.supabase.co/", "key").unwrap();
        assert_eq!(store.rest_url, "https://demo.supabase.co/rest/v1");

        let store = SupabaseStore::new("https://demo.supabase.co", "key").unwrap();
        assert_eq!(store.rest_url, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn test_requests_carry_service_key() {
        let store = SupabaseStore::new("https://demo.supabase.co", "secret-key").unwrap();
        let request = store.request(Method::GET, GOALS).build().unwrap();
        assert_eq!(request.url().as_str(), "https://demo.supabase.co/rest/v1/goals");
        assert_eq!(request.headers()["apikey"], "secret-key");
        assert_eq!(request.headers()["authorization"], "Bearer secret-key");
    }
}
