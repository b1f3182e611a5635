//! Rows mirrored from the backend tables
//!
//! PostgREST is loose about representations: ids may be bigints or UUIDs,
//! `numeric` columns may come back as strings, and date columns may be plain
//! dates or full timestamps. The deserializers here accept all of them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Primary key of any backend row, normalized to a string
pub type RowId = String;

/// Direction of a money movement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// Link between a web account and a Telegram chat (`user_integrations`)
#[derive(Debug, Clone, Deserialize)]
pub struct Integration {
    #[serde(deserialize_with = "de_id")]
    pub id: RowId,
    pub user_id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub telegram_chat_id: Option<String>,
    #[serde(default)]
    pub telegram_username: Option<String>,
    #[serde(default)]
    pub connection_token: Option<String>,
}

/// Name embedded through a foreign key, e.g. `categories(name)`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "de_id")]
    pub id: RowId,
    pub user_id: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub category_id: Option<RowId>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "categories")]
    pub category: Option<CategoryRef>,
}

impl Transaction {
    /// Booking date, falling back to the creation timestamp
    pub fn day(&self) -> Option<NaiveDate> {
        self.date.or_else(|| self.created_at.map(|ts| ts.date_naive()))
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    pub user_id: String,
    /// Always positive; the direction lives in `kind`
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub category_id: Option<RowId>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Category {
    #[serde(deserialize_with = "de_id")]
    pub id: RowId,
    pub name: String,
    /// `None` for categories shared by every user
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Goal {
    #[serde(deserialize_with = "de_id")]
    pub id: RowId,
    pub user_id: String,
    pub name: String,
    #[serde(deserialize_with = "de_amount")]
    pub target_amount: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub current_amount: f64,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Goal {
    /// Completion in `0.0..=1.0`; a goal without a positive target counts as empty
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount).clamp(0.0, 1.0)
    }

    pub fn percent(&self) -> u32 {
        (self.progress() * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGoalDeposit {
    pub goal_id: RowId,
    pub user_id: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecurringBill {
    #[serde(deserialize_with = "de_id")]
    pub id: RowId,
    pub user_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: f64,
    pub due_day: u32,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub category_id: Option<RowId>,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRecurringBill {
    pub user_id: String,
    pub description: String,
    pub amount: f64,
    pub due_day: u32,
    pub category_id: Option<RowId>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Text(String),
}

impl From<IdRepr> for String {
    fn from(id: IdRepr) -> Self {
        match id {
            IdRepr::Int(n) => n.to_string(),
            IdRepr::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Number(f64),
    Text(String),
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    IdRepr::deserialize(d).map(String::from)
}

fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<IdRepr>::deserialize(d)?.map(String::from))
}

/// Numeric columns; `null` reads as zero
fn de_amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    match Option::<NumberRepr>::deserialize(d)? {
        None => Ok(0.0),
        Some(NumberRepr::Number(n)) => Ok(n),
        Some(NumberRepr::Text(s)) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

fn de_opt_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = match Option::<String>::deserialize(d)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// `timestamptz` columns carry an offset, plain `timestamp` columns do not
fn de_opt_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = match Option::<String>::deserialize(d)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_from_postgrest_row() {
        let row = json!({
            "id": 42,
            "user_id": "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
            "amount": "150.90",
            "type": "expense",
            "description": "Internet",
            "category_id": 7,
            "date": "2024-05-03T00:00:00+00:00",
            "created_at": "2024-05-03T12:30:00.123456+00:00",
            "categories": { "name": "Moradia" }
        });
        let tx: Transaction = serde_json::from_value(row).unwrap();
        assert_eq!(tx.id, "42");
        assert_eq!(tx.amount, 150.90);
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.category_id.as_deref(), Some("7"));
        assert_eq!(tx.day(), NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(tx.category_name(), Some("Moradia"));
    }

    #[test]
    fn test_transaction_minimal_row() {
        let row = json!({
            "id": "3f1c",
            "user_id": "u1",
            "amount": 10,
            "type": "income",
            "created_at": "2024-01-31T23:59:59"
        });
        let tx: Transaction = serde_json::from_value(row).unwrap();
        assert_eq!(tx.kind, TransactionKind::Income);
        assert_eq!(tx.amount, 10.0);
        assert!(tx.date.is_none());
        assert_eq!(tx.day(), NaiveDate::from_ymd_opt(2024, 1, 31));
        assert!(tx.category_name().is_none());
    }

    #[test]
    fn test_goal_null_current_amount() {
        let row = json!({
            "id": 1,
            "user_id": "u1",
            "name": "Carro",
            "target_amount": 50000,
            "current_amount": null
        });
        let goal: Goal = serde_json::from_value(row).unwrap();
        assert_eq!(goal.current_amount, 0.0);
        assert_eq!(goal.percent(), 0);
    }

    #[test]
    fn test_goal_progress_is_clamped() {
        let goal = Goal {
            id: "1".into(),
            user_id: "u1".into(),
            name: "Viagem".into(),
            target_amount: 1000.0,
            current_amount: 1500.0,
            created_at: None,
        };
        assert_eq!(goal.progress(), 1.0);
        assert_eq!(goal.percent(), 100);

        let broken = Goal { target_amount: 0.0, ..goal };
        assert_eq!(broken.progress(), 0.0);
    }

    #[test]
    fn test_integration_numeric_chat_id() {
        let row = json!({
            "id": 9,
            "user_id": "u1",
            "telegram_chat_id": 123456789,
            "connection_token": null
        });
        let integration: Integration = serde_json::from_value(row).unwrap();
        assert_eq!(integration.telegram_chat_id.as_deref(), Some("123456789"));
        assert!(integration.connection_token.is_none());
    }

    #[test]
    fn test_new_transaction_serializes_type_and_date() {
        let tx = NewTransaction {
            user_id: "u1".into(),
            amount: 50.0,
            kind: TransactionKind::Expense,
            description: "Pizza".into(),
            category_id: None,
            date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["date"], "2024-05-03");
        assert!(value["category_id"].is_null());
    }

    #[test]
    fn test_bad_amount_is_rejected() {
        let row = json!({ "id": 1, "user_id": "u1", "amount": "abc", "due_day": 5 });
        assert!(serde_json::from_value::<RecurringBill>(row).is_err());
    }
}
