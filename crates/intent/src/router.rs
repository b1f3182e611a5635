//! Regex short-circuits for the most common messages
//!
//! These avoid an LLM round trip for greetings, balance and bill checks, and
//! simple `gastei 50 pizza` entries. Read-only intents only fire when the
//! message carries no digits, since a number usually means something should
//! be recorded (`paguei a conta de luz 150`).

use ledger::TransactionKind;
use regex::Regex;

use crate::amount::parse_amount;
use crate::error::Result;
use crate::intent::Intent;

pub struct Router {
    quick_entry: Regex,
    undo: Regex,
    greeting: Regex,
    balance: Regex,
    bills: Regex,
    statement: Regex,
    goals: Regex,
}

impl Router {
    pub fn new() -> Result<Self> {
        Ok(Self {
            quick_entry: Regex::new(
                r"(?i)^(gastei|paguei|comprei|recebi|ganhei)\s+(r\$\s*)?([\d.,]+)(\s*reais)?\s*(?:(?:em|no|na|nos|nas|de|do|da|com|pelo|pela)\s+)?(.*)$",
            )?,
            undo: Regex::new(
                r"(?i)^(desfaz(er)?|desfa[çc]a|apag(a|ar|ue)|exclu(i|ir|a)|delet(a|ar|e)|remov(e|er|a)|cancel(a|ar|e))\b.*\b([uú]ltim[oa]|lan[çc]amento|gasto|registro)\b",
            )?,
            greeting: Regex::new(
                r"(?i)^(oi+|ol[aá]|opa|bom dia|boa tarde|boa noite|e a[ií]|eai|hello|hi|hey)([\s,]+\p{L}+)?[\s!.,?]*$",
            )?,
            balance: Regex::new(r"(?i)\b(saldo|balan[çc]o|quanto (eu )?tenho|quanto sobrou)\b")?,
            bills: Regex::new(r"(?i)\b(contas?|boletos?|vencimentos?|fixas?)\b")?,
            statement: Regex::new(
                r"(?i)\b(extrato|hist[oó]rico|[uú]ltim[oa]s (lan[çc]amentos|movimenta[çc][oõ]es|gastos|transa[çc][oõ]es))\b",
            )?,
            goals: Regex::new(r"(?i)\b(metas?|objetivos?|cofrinhos?)\b")?,
        })
    }

    /// Classify `text` without the LLM, if one of the patterns applies
    pub fn route(&self, text: &str) -> Option<Intent> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(intent) = self.quick_entry(text) {
            return Some(intent);
        }
        if self.undo.is_match(text) {
            return Some(Intent::DeleteLast);
        }
        if self.greeting.is_match(text) {
            return Some(Intent::Greeting);
        }

        if text.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        if self.balance.is_match(text) {
            return Some(Intent::CheckBalance);
        }
        if self.statement.is_match(text) {
            return Some(Intent::Statement);
        }
        if self.bills.is_match(text) {
            return Some(Intent::CheckBills);
        }
        if self.goals.is_match(text) {
            return Some(Intent::ListGoals);
        }
        None
    }

    fn quick_entry(&self, text: &str) -> Option<Intent> {
        let caps = self.quick_entry.captures(text)?;
        let verb = caps.get(1)?.as_str().to_lowercase();
        let amount = parse_amount(caps.get(3)?.as_str())?;
        let description = caps.get(5).map(|m| m.as_str().trim()).unwrap_or_default();

        let kind = match verb.as_str() {
            "recebi" | "ganhei" => TransactionKind::Income,
            _ => TransactionKind::Expense,
        };

        Some(Intent::AddTransaction {
            kind,
            amount,
            description: description.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new().unwrap()
    }

    #[test]
    fn test_greetings() {
        let r = router();
        for text in ["oi", "Oiii", "Olá!", "bom dia", "Boa noite, bot", "e aí", "hello"] {
            assert_eq!(r.route(text), Some(Intent::Greeting), "{:?}", text);
        }
        // A greeting followed by a request is not just a greeting
        assert_ne!(r.route("oi, qual meu saldo agora por favor"), Some(Intent::Greeting));
        assert_eq!(r.route("Bom dia, Joana"), Some(Intent::Greeting));
    }

    #[test]
    fn test_greeting_with_number_is_left_for_llm() {
        let r = router();
        assert_eq!(r.route("oi 150"), None);
        assert_eq!(r.route("olá, 50"), None);
    }

    #[test]
    fn test_balance_and_bills() {
        let r = router();
        assert_eq!(r.route("qual meu saldo?"), Some(Intent::CheckBalance));
        assert_eq!(r.route("Quanto eu tenho"), Some(Intent::CheckBalance));
        assert_eq!(r.route("balanço do mês"), Some(Intent::CheckBalance));
        assert_eq!(r.route("quais contas vencem hoje"), Some(Intent::CheckBills));
        assert_eq!(r.route("meus boletos"), Some(Intent::CheckBills));
    }

    #[test]
    fn test_statement_and_goals() {
        let r = router();
        assert_eq!(r.route("extrato"), Some(Intent::Statement));
        assert_eq!(r.route("últimos lançamentos"), Some(Intent::Statement));
        assert_eq!(r.route("como estão minhas metas"), Some(Intent::ListGoals));
    }

    #[test]
    fn test_digits_disable_read_only_routes() {
        let r = router();
        assert_eq!(r.route("paguei a conta de luz 150"), None);
        assert_eq!(r.route("coloca 100 na meta viagem"), None);
    }

    #[test]
    fn test_word_boundaries() {
        let r = router();
        assert_eq!(r.route("contasse"), None);
        assert_eq!(r.route("metade do caminho"), None);
    }

    #[test]
    fn test_quick_entries() {
        let r = router();
        assert_eq!(
            r.route("gastei 50 em pizza"),
            Some(Intent::AddTransaction {
                kind: TransactionKind::Expense,
                amount: 50.0,
                description: "pizza".into()
            })
        );
        assert_eq!(
            r.route("Recebi R$ 1.500,00 do Salário"),
            Some(Intent::AddTransaction {
                kind: TransactionKind::Income,
                amount: 1500.0,
                description: "Salário".into()
            })
        );
        assert_eq!(
            r.route("paguei 12,90"),
            Some(Intent::AddTransaction {
                kind: TransactionKind::Expense,
                amount: 12.9,
                description: String::new()
            })
        );
    }

    #[test]
    fn test_undo() {
        let r = router();
        assert_eq!(r.route("apaga o último lançamento"), Some(Intent::DeleteLast));
        assert_eq!(r.route("desfazer último"), Some(Intent::DeleteLast));
        assert_eq!(r.route("apaga tudo"), None);
    }

    #[test]
    fn test_unmatched_and_empty() {
        let r = router();
        assert_eq!(r.route(""), None);
        assert_eq!(r.route("   "), None);
        assert_eq!(r.route("quero juntar dinheiro para um carro"), None);
    }
}
