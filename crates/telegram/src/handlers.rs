//! Reply formatting and sending helpers shared by the command handlers
//!
//! Every formatter returns Telegram HTML; user-provided text is escaped
//! before it is wrapped in tags.

use chrono::NaiveDate;
use ledger::{
    AddedTransaction, Balance, BillStatus, BillsDue, Goal, GoalDeposit, RecurringBill, Transaction,
    TransactionKind,
};
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyMarkup};
use teloxide::utils::html;

use crate::constants::emoji;
use crate::error::{BotError, UserMessage};
use crate::types::HandlerResult;
use crate::utils::{format_currency, format_day_month, month_of};

/// Send an HTML message, optionally with a keyboard
pub async fn send_html(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
    markup: Option<ReplyMarkup>,
) -> HandlerResult {
    let request = bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
    match markup {
        Some(markup) => request.reply_markup(markup).await?,
        None => request.await?,
    };
    Ok(())
}

/// Log a failed operation and tell the user what went wrong
pub async fn send_error(bot: &Bot, chat_id: ChatId, err: BotError) -> HandlerResult {
    if err.is_user_error() {
        tracing::debug!("Rejected input from chat {}: {}", chat_id.0, err);
    } else {
        tracing::error!("Operation failed for chat {}: {}", chat_id.0, err);
    }
    bot.send_message(chat_id, err.user_message()).await?;
    Ok(())
}

fn escape(text: &str) -> String {
    html::escape(text)
}

pub fn format_added(added: &AddedTransaction) -> String {
    let tx = &added.transaction;
    let (icon, label) = match tx.kind {
        TransactionKind::Expense => ("📉", "Despesa"),
        TransactionKind::Income => ("📈", "Receita"),
    };
    let mut text = format!(
        "{} {} de {} registrada!\n{} {}",
        icon,
        label,
        html::bold(&format_currency(tx.amount.abs())),
        emoji::MEMO,
        escape(&tx.description)
    );
    if let Some(category) = &added.category {
        text.push_str(&format!("\n{} {}", emoji::TAG, escape(&category.name)));
    }
    text
}

pub fn format_deleted(tx: &Transaction) -> String {
    let date = tx
        .day()
        .map(|d| format!(" ({})", format_day_month(d)))
        .unwrap_or_default();
    format!(
        "{} Lançamento removido: {} • {}{}",
        emoji::TRASH,
        html::bold(&format_currency(tx.amount.abs())),
        escape(&tx.description),
        date
    )
}

pub fn format_balance(balance: &Balance) -> String {
    format!(
        "{} {}\n\n\
         {} Entradas: {}\n\
         {} Saídas: {}\n\
         ───────────────\n\
         {} {}\n\n\
         {}",
        emoji::MONEY,
        html::bold(&format!("Balanço de {}", month_of(balance.since))),
        emoji::INCOME,
        format_currency(balance.income),
        emoji::EXPENSE,
        format_currency(balance.expense),
        emoji::CASH,
        html::bold(&format!("Saldo: {}", format_currency(balance.net()))),
        html::italic("Para análises detalhadas, acesse o painel web."),
    )
}

pub fn format_statement(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return format!("{} Nenhuma movimentação recente.", emoji::EMPTY);
    }

    let mut text = format!(
        "📄 {}\n\n",
        html::bold(&format!("Últimos {} lançamentos", transactions.len()))
    );
    for tx in transactions {
        let icon = match tx.kind {
            TransactionKind::Income => emoji::INCOME,
            TransactionKind::Expense => emoji::EXPENSE,
        };
        let category = tx
            .category_name()
            .map(|name| format!(" {}", html::italic(&escape(name))))
            .unwrap_or_default();
        let date = tx
            .day()
            .map(format_day_month)
            .unwrap_or_else(|| "--/--".to_string());
        text.push_str(&format!(
            "{} {} • {}{}\n   {} {}\n\n",
            icon,
            html::bold(&format_currency(tx.amount.abs())),
            escape(&tx.description),
            category,
            emoji::CALENDAR,
            date
        ));
    }
    text.trim_end().to_string()
}

/// `[█████░░░░░] 50%`
pub fn progress_bar(goal: &Goal) -> String {
    let percent = goal.percent().min(100);
    let filled = ((percent as f64) / 10.0).round() as usize;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        percent
    )
}

pub fn format_goal_card(goal: &Goal) -> String {
    format!(
        "{} {}\n{}\n{} {} de {}",
        emoji::PIN,
        html::bold(&escape(&goal.name)),
        progress_bar(goal),
        emoji::MONEY,
        format_currency(goal.current_amount),
        format_currency(goal.target_amount)
    )
}

pub fn format_goal_created(goal: &Goal) -> String {
    format!(
        "{} Meta {} criada!\nAlvo: {}",
        emoji::SUCCESS,
        html::bold(&escape(&goal.name)),
        format_currency(goal.target_amount)
    )
}

pub fn format_deposit(deposit: &GoalDeposit) -> String {
    format!(
        "{} {}\n\n{}: +{}\nTotal: {}\n{}",
        emoji::ROCKET,
        html::bold("Investimento confirmado!"),
        escape(&deposit.goal.name),
        format_currency(deposit.amount),
        format_currency(deposit.goal.current_amount),
        progress_bar(&deposit.goal)
    )
}

fn status_icon(status: BillStatus) -> &'static str {
    match status {
        BillStatus::DueToday => emoji::WARNING,
        BillStatus::Past => emoji::SUCCESS,
        BillStatus::Upcoming => emoji::PENDING,
    }
}

pub fn format_bills_list(bills: &[RecurringBill], today: NaiveDate) -> String {
    if bills.is_empty() {
        return format!(
            "{} Nenhuma conta fixa cadastrada.\nUse /fixa DIA VALOR DESCRIÇÃO para adicionar.",
            emoji::CALENDAR
        );
    }

    let mut text = format!("{} {}\n\n", emoji::CALENDAR, html::bold("Contas fixas do mês"));
    let mut total = 0.0;
    for bill in bills {
        total += bill.amount;
        text.push_str(&format!(
            "{} Dia {:02}: {} ({})\n",
            status_icon(BillStatus::of(bill, today)),
            bill.due_day,
            html::bold(&escape(&bill.description)),
            format_currency(bill.amount)
        ));
    }
    text.push_str(&format!(
        "\n{} {}",
        emoji::MONEY,
        html::bold(&format!("Total: {}", format_currency(total)))
    ));
    text
}

/// The morning notice, also sent by `/hoje`
pub fn format_due_bills_notice(due: &BillsDue) -> String {
    let header = match due.bills.len() {
        1 => "Bom dia! Hoje vence 1 conta:".to_string(),
        n => format!("Bom dia! Hoje vencem {} contas:", n),
    };

    let mut text = format!("{} {}\n\n", emoji::BELL, html::bold(&header));
    for bill in &due.bills {
        text.push_str(&format!(
            "• {}: {}\n",
            escape(&bill.description),
            format_currency(bill.amount)
        ));
    }
    text.push_str(&format!(
        "\n{} {}\n{}",
        emoji::MONEY,
        html::bold(&format!("Total: {}", format_currency(due.total()))),
        html::italic("Dica: se já pagou, lance o gasto com /gasto VALOR DESCRIÇÃO.")
    ));
    text
}

pub fn format_bill_added(bill: &RecurringBill) -> String {
    format!(
        "{} Conta fixa adicionada!\n\n{} {}\n{} {}\n🗓️ Vence todo dia {}",
        emoji::SUCCESS,
        emoji::MEMO,
        html::bold(&escape(&bill.description)),
        emoji::MONEY,
        format_currency(bill.amount),
        bill.due_day
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(current: f64, target: f64) -> Goal {
        Goal {
            id: "g1".into(),
            user_id: "u1".into(),
            name: "Viagem <Japão>".into(),
            target_amount: target,
            current_amount: current,
            created_at: None,
        }
    }

    fn bill(day: u32, amount: f64, description: &str) -> RecurringBill {
        RecurringBill {
            id: format!("b{}", day),
            user_id: "u1".into(),
            description: description.into(),
            amount,
            due_day: day,
            category_id: None,
            kind: TransactionKind::Expense,
        }
    }

    fn transaction(kind: TransactionKind, amount: f64, description: &str) -> Transaction {
        Transaction {
            id: "t1".into(),
            user_id: "u1".into(),
            amount,
            kind,
            description: description.into(),
            category_id: None,
            date: Some(date(2024, 3, 5)),
            created_at: None,
            category: None,
        }
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(&goal(0.0, 100.0)), "[░░░░░░░░░░] 0%");
        assert_eq!(progress_bar(&goal(50.0, 100.0)), "[█████░░░░░] 50%");
        assert_eq!(progress_bar(&goal(250.0, 100.0)), "[██████████] 100%");
        assert_eq!(progress_bar(&goal(10.0, 0.0)), "[░░░░░░░░░░] 0%");
    }

    #[test]
    fn test_goal_card_escapes_name() {
        let card = format_goal_card(&goal(1250.0, 5000.0));
        assert!(card.contains("<b>Viagem &lt;Japão&gt;</b>"));
        assert!(card.contains("[███░░░░░░░] 25%"));
        assert!(card.contains("R$ 1.250,00 de R$ 5.000,00"));
    }

    #[test]
    fn test_format_balance() {
        let balance = Balance {
            since: date(2024, 10, 1),
            income: 3000.0,
            expense: 1250.5,
        };
        let text = format_balance(&balance);
        assert!(text.contains("Balanço de outubro"));
        assert!(text.contains("Entradas: R$ 3.000,00"));
        assert!(text.contains("Saídas: R$ 1.250,50"));
        assert!(text.contains("Saldo: R$ 1.749,50"));
    }

    #[test]
    fn test_format_statement() {
        assert!(format_statement(&[]).contains("Nenhuma movimentação"));

        let mut pizza = transaction(TransactionKind::Expense, -45.0, "Pizza & refri");
        pizza.category = Some(ledger::models::CategoryRef {
            name: "Alimentação".into(),
        });
        let salary = transaction(TransactionKind::Income, 3000.0, "Salário");

        let text = format_statement(&[pizza, salary]);
        assert!(text.starts_with("📄 <b>Últimos 2 lançamentos</b>"));
        assert!(text.contains("🔴 <b>R$ 45,00</b> • Pizza &amp; refri <i>Alimentação</i>"));
        assert!(text.contains("🟢 <b>R$ 3.000,00</b> • Salário"));
        assert!(text.contains("📅 05/03"));
    }

    #[test]
    fn test_format_added() {
        let added = AddedTransaction {
            transaction: transaction(TransactionKind::Expense, 50.0, "Uber"),
            category: Some(Category {
                id: "c1".into(),
                name: "Transporte".into(),
                user_id: None,
            }),
        };
        let text = format_added(&added);
        assert!(text.starts_with("📉 Despesa de <b>R$ 50,00</b> registrada!"));
        assert!(text.ends_with("🏷️ Transporte"));

        let added = AddedTransaction {
            transaction: transaction(TransactionKind::Income, 99.9, "Freela"),
            category: None,
        };
        let text = format_added(&added);
        assert!(text.starts_with("📈 Receita de <b>R$ 99,90</b>"));
        assert!(text.ends_with("📝 Freela"));
    }

    #[test]
    fn test_format_bills_list_icons() {
        let bills = vec![bill(5, 100.0, "Luz"), bill(10, 150.0, "Internet"), bill(20, 1200.0, "Aluguel")];
        let text = format_bills_list(&bills, date(2024, 3, 10));

        assert!(text.contains("✅ Dia 05: <b>Luz</b> (R$ 100,00)"));
        assert!(text.contains("⚠️ Dia 10: <b>Internet</b> (R$ 150,00)"));
        assert!(text.contains("⏳ Dia 20: <b>Aluguel</b> (R$ 1.200,00)"));
        assert!(text.contains("Total: R$ 1.450,00"));

        assert!(format_bills_list(&[], date(2024, 3, 10)).contains("Nenhuma conta fixa"));
    }

    #[test]
    fn test_format_due_bills_notice() {
        let due = BillsDue {
            day: 10,
            bills: vec![bill(10, 150.0, "Internet"), bill(10, 50.0, "Streaming")],
        };
        let text = format_due_bills_notice(&due);
        assert!(text.starts_with("🔔 <b>Bom dia! Hoje vencem 2 contas:</b>"));
        assert!(text.contains("• Internet: R$ 150,00"));
        assert!(text.contains("Total: R$ 200,00"));

        let single = BillsDue {
            day: 10,
            bills: vec![bill(10, 150.0, "Internet")],
        };
        assert!(format_due_bills_notice(&single).contains("Hoje vence 1 conta:"));
    }

    #[test]
    fn test_format_deposit() {
        let deposit = GoalDeposit {
            goal: goal(600.0, 1000.0),
            amount: 100.0,
        };
        let text = format_deposit(&deposit);
        assert!(text.contains("+R$ 100,00"));
        assert!(text.contains("Total: R$ 600,00"));
        assert!(text.contains("60%"));
    }
}
