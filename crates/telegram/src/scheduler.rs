//! Daily bills-due notice
//!
//! Sleeps until the configured local hour, then pushes one message per linked
//! user that has recurring bills due that day.

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use ledger::{Ledger, LinkedUser};
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::task::JoinHandle;

use crate::handlers::format_due_bills_notice;
use crate::types::BotSettings;

/// Outcome of one notification run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NotifyReport {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Next `hour:00` local time strictly after `now`
pub fn next_run(now: DateTime<Tz>, hour: u32) -> DateTime<Tz> {
    let tz = now.timezone();
    let mut day = now.date_naive();
    // Two iterations always suffice, the loop guards against DST gaps
    for _ in 0..3 {
        if let Some(candidate) = local_time(tz, day, hour) {
            if candidate > now {
                return candidate;
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    now + chrono::Duration::hours(24)
}

fn local_time(tz: Tz, day: NaiveDate, hour: u32) -> Option<DateTime<Tz>> {
    let naive = day.and_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&naive).earliest()
}

/// Build the notice for every linked user with bills due on `today`
///
/// A failed lookup for one user is logged and counted, never fatal.
pub async fn collect_notices(
    ledger: &Ledger,
    today: NaiveDate,
    report: &mut NotifyReport,
) -> Vec<(LinkedUser, String)> {
    let users = match ledger.linked_users().await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to load linked users for bills notice: {}", e);
            report.failed += 1;
            return Vec::new();
        }
    };

    let mut notices = Vec::new();
    for user in users {
        match ledger.bills_due(&user, today).await {
            Ok(due) if due.is_empty() => report.skipped += 1,
            Ok(due) => notices.push((user, format_due_bills_notice(&due))),
            Err(e) => {
                tracing::error!("Failed to load bills for user {}: {}", user.user_id, e);
                report.failed += 1;
            }
        }
    }
    notices
}

/// Send today's notices
pub async fn notify_due_bills(bot: &Bot, ledger: &Ledger, today: NaiveDate) -> NotifyReport {
    let mut report = NotifyReport::default();

    for (user, text) in collect_notices(ledger, today, &mut report).await {
        let chat_id = match user.chat_id.trim().parse::<i64>() {
            Ok(id) => ChatId(id),
            Err(_) => {
                tracing::warn!("Skipping user {}: invalid chat id {:?}", user.user_id, user.chat_id);
                report.failed += 1;
                continue;
            }
        };

        match bot.send_message(chat_id, text).parse_mode(ParseMode::Html).await {
            Ok(_) => report.sent += 1,
            Err(e) => {
                tracing::error!("Failed to send bills notice to chat {}: {}", chat_id.0, e);
                report.failed += 1;
            }
        }
    }

    report
}

/// Run the notifier forever on a background task
pub fn spawn(bot: Bot, ledger: Ledger, settings: BotSettings) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(
            "Bills notifier scheduled daily at {:02}:00 ({})",
            settings.notify_hour,
            settings.tz.name()
        );
        loop {
            let now = settings.now();
            let next = next_run(now, settings.notify_hour);
            let wait = (next - now).to_std().unwrap_or_default();
            tracing::debug!("Next bills notice at {}", next);
            tokio::time::sleep(wait).await;

            let report = notify_due_bills(&bot, &ledger, next.date_naive()).await;
            tracing::info!(
                "Bills notice run: {} sent, {} without bills, {} failed",
                report.sent,
                report.skipped,
                report.failed
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use crate::testing::FlakyStore;
    use chrono_tz::America::Sao_Paulo;
    use ledger::{FinanceStore, MemoryStore, NewRecurringBill, TransactionKind};

    #[test]
    fn test_next_run_later_today() {
        let now = Sao_Paulo.with_ymd_and_hms(2024, 5, 10, 7, 30, 0).unwrap();
        let next = next_run(now, 8);
        assert_eq!(next, Sao_Paulo.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_next_run_tomorrow() {
        let now = Sao_Paulo.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
        assert_eq!(
            next_run(now, 8),
            Sao_Paulo.with_ymd_and_hms(2024, 5, 11, 8, 0, 0).unwrap()
        );

        let now = Sao_Paulo.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        let next = next_run(now, 8);
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(next.hour(), 8);
    }

    fn bill(user_id: &str, day: u32, amount: f64, description: &str) -> NewRecurringBill {
        NewRecurringBill {
            user_id: user_id.into(),
            description: description.into(),
            amount,
            due_day: day,
            category_id: None,
            kind: TransactionKind::Expense,
        }
    }

    #[tokio::test]
    async fn test_collect_notices_skips_users_without_bills() {
        let store = MemoryStore::new();
        store.add_linked_integration("alice", "1001");
        store.add_linked_integration("bob", "1002");
        store.add_pending_integration("carol", "tok");
        store.insert_recurring_bill(&bill("alice", 10, 150.0, "Internet")).await.unwrap();
        store.insert_recurring_bill(&bill("alice", 15, 90.0, "Academia")).await.unwrap();
        store.insert_recurring_bill(&bill("bob", 20, 1200.0, "Aluguel")).await.unwrap();
        store.insert_recurring_bill(&bill("carol", 10, 50.0, "Streaming")).await.unwrap();

        let ledger = Ledger::with_store(store);
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let mut report = NotifyReport::default();
        let notices = collect_notices(&ledger, today, &mut report).await;

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0.chat_id, "1001");
        assert!(notices[0].1.contains("Internet"));
        assert!(!notices[0].1.contains("Academia"));
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn test_one_failing_user_does_not_stop_the_run() {
        let store = FlakyStore::failing_for("bob");
        store.inner.add_linked_integration("alice", "1001");
        store.inner.add_linked_integration("bob", "1002");
        store.inner.insert_recurring_bill(&bill("alice", 10, 150.0, "Internet")).await.unwrap();
        store.inner.insert_recurring_bill(&bill("bob", 10, 1200.0, "Aluguel")).await.unwrap();

        let ledger = Ledger::with_store(store);
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let mut report = NotifyReport::default();
        let notices = collect_notices(&ledger, today, &mut report).await;

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0.user_id, "alice");
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 0);
    }

    #[tokio::test]
    async fn test_user_list_failure_yields_no_notices() {
        let ledger = Ledger::with_store(FlakyStore::down());
        let mut report = NotifyReport::default();
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert!(collect_notices(&ledger, today, &mut report).await.is_empty());
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn test_month_end_bills_fall_on_last_day() {
        let store = MemoryStore::new();
        store.add_linked_integration("alice", "1001");
        store.insert_recurring_bill(&bill("alice", 31, 80.0, "Cartão")).await.unwrap();

        let ledger = Ledger::with_store(store);
        let mut report = NotifyReport::default();
        let feb_end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let notices = collect_notices(&ledger, feb_end, &mut report).await;
        assert_eq!(notices.len(), 1);
        assert!(notices[0].1.contains("Hoje vence 1 conta"));
    }
}
