//! Minimal PostgREST query-string builder
//!
//! Only the operators the bot needs: `select`, `eq`, `gte`, `not.is.null`,
//! `or`, `order` and `limit`.

use std::fmt::Display;

/// Query parameters for a single PostgREST request
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.pairs.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("eq.{}", value))
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("gte.{}", value))
    }

    pub fn not_null(self, column: &str) -> Self {
        self.filter(column, "not.is.null".to_string())
    }

    /// Raw `or=(...)` group, e.g. `user_id.eq.X,user_id.is.null`
    pub fn or(self, expr: &str) -> Self {
        self.filter("or", format!("({})", expr))
    }

    /// Add a sort key; repeated calls extend the same `order` parameter
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let key = format!("{}.{}", column, if ascending { "asc" } else { "desc" });
        match self.pairs.iter_mut().find(|(name, _)| name == "order") {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(&key);
            }
            None => self.pairs.push(("order".to_string(), key)),
        }
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.pairs.push(("limit".to_string(), n.to_string()));
        self
    }

    fn filter(mut self, column: &str, op: String) -> Self {
        self.pairs.push((column.to_string(), op));
        self
    }

    /// Pairs ready for `reqwest::RequestBuilder::query`
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Percent-encoded query string, used in logs
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
