//! Validation of the model's JSON reply into an [`Intent`]

use ledger::TransactionKind;
use serde::Deserialize;
use serde_json::Value;

use crate::amount::parse_amount;
use crate::error::Result;
use crate::intent::Intent;

/// Raw shape the model is asked to produce
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Extraction {
    pub intent: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Value,
    pub description: Option<String>,
    pub goal_name: Option<String>,
    pub reply: Option<String>,
}

impl Extraction {
    /// Positive amount from a JSON number or a numeric string
    fn amount(&self) -> Option<f64> {
        match &self.amount {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite() && *v > 0.0),
            Value::String(s) => parse_amount(s),
            _ => None,
        }
    }

    fn text(field: &Option<String>) -> Option<String> {
        field
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn reply(&self) -> Option<String> {
        Self::text(&self.reply)
    }

    fn kind(&self) -> TransactionKind {
        match self.kind.as_deref().map(str::to_lowercase).as_deref() {
            Some("income") | Some("receita") | Some("ganho") => TransactionKind::Income,
            _ => TransactionKind::Expense,
        }
    }

    /// Turn the raw reply into an intent, degrading to `Unknown` whenever a
    /// write would be missing one of its fields
    pub fn into_intent(self) -> Intent {
        let unknown = Intent::Unknown { reply: self.reply() };
        let name = self.intent.trim().to_lowercase();

        match name.as_str() {
            "greeting" => Intent::Greeting,
            "delete_last" => Intent::DeleteLast,
            "check_balance" => Intent::CheckBalance,
            "check_bills" => Intent::CheckBills,
            "statement" => Intent::Statement,
            "list_goals" => Intent::ListGoals,
            "add_transaction" | "add_expense" | "add_income" => {
                let Some(amount) = self.amount() else {
                    return unknown;
                };
                let kind = match name.as_str() {
                    "add_income" => TransactionKind::Income,
                    "add_expense" => TransactionKind::Expense,
                    _ => self.kind(),
                };
                Intent::AddTransaction {
                    kind,
                    amount,
                    description: Self::text(&self.description).unwrap_or_default(),
                }
            }
            "create_goal" => {
                let name = Self::text(&self.goal_name).or_else(|| Self::text(&self.description));
                match (name, self.amount()) {
                    (Some(name), Some(target)) => Intent::CreateGoal { name, target },
                    _ => unknown,
                }
            }
            "deposit_goal" => match (Self::text(&self.goal_name), self.amount()) {
                (Some(goal), Some(amount)) => Intent::DepositGoal { goal, amount },
                _ => unknown,
            },
            _ => unknown,
        }
    }
}

/// Parse the model's text into an intent
///
/// The JSON object may be wrapped in Markdown fences or surrounded by prose;
/// everything outside the outermost braces is ignored.
pub fn parse_reply(raw: &str) -> Result<Intent> {
    let body = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw.trim(),
    };
    let extraction: Extraction = serde_json::from_str(body)?;
    Ok(extraction.into_intent())
}
