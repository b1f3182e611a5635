//! Recurring bills

use intent::amount::parse_bill;
use ledger::{Ledger, LinkedUser};
use teloxide::prelude::*;

use crate::commands::text::{leave_for_menu, reply_not_text};
use crate::constants::{emoji, usage};
use crate::handlers::{self, send_error, send_html};
use crate::keyboards::bills_menu_keyboard;
use crate::types::{BotSettings, HandlerResult, MyDialogue, State};

/// `/contas`
pub async fn list_bills(
    bot: Bot,
    msg: Message,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    send_bills(&bot, msg.chat.id, &user, &ledger, &settings).await
}

pub(crate) async fn send_bills(
    bot: &Bot,
    chat_id: ChatId,
    user: &LinkedUser,
    ledger: &Ledger,
    settings: &BotSettings,
) -> HandlerResult {
    match ledger.recurring_bills(user).await {
        Ok(bills) => {
            let text = handlers::format_bills_list(&bills, settings.today());
            send_html(bot, chat_id, text, Some(bills_menu_keyboard().into())).await
        }
        Err(e) => send_error(bot, chat_id, e.into()).await,
    }
}

/// `/fixa DIA VALOR DESCRIÇÃO`
pub async fn add_bill(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    args: String,
    user: LinkedUser,
    ledger: Ledger,
) -> HandlerResult {
    if args.trim().is_empty() {
        return prompt_bill(&bot, msg.chat.id, &dialogue).await;
    }
    match parse_bill(&args) {
        Some((day, amount, description)) => {
            save_bill(&bot, msg.chat.id, &user, &ledger, day, amount, &description).await
        }
        None => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "{} Formato incorreto. Como o dia de vencimento é obrigatório:\n{}",
                    emoji::ERROR,
                    usage::BILL
                ),
            )
            .await?;
            Ok(())
        }
    }
}

pub(crate) async fn prompt_bill(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue) -> HandlerResult {
    dialogue.update(State::AwaitingBill).await?;
    bot.send_message(
        chat_id,
        "📅 Envie o dia de vencimento, o valor e a descrição.\nEx: 10 150,00 Internet\n\n/cancelar para desistir.",
    )
    .await?;
    Ok(())
}

pub async fn receive_bill(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return reply_not_text(&bot, msg.chat.id).await;
    };
    if leave_for_menu(&bot, msg.chat.id, &dialogue, &user, &ledger, &settings, text).await? {
        return Ok(());
    }

    match parse_bill(text) {
        Some((day, amount, description)) => {
            dialogue.exit().await?;
            save_bill(&bot, msg.chat.id, &user, &ledger, day, amount, &description).await
        }
        None => {
            bot.send_message(
                msg.chat.id,
                format!("{} Não entendi. Ex: 10 150,00 Internet (ou /cancelar)", emoji::ERROR),
            )
            .await?;
            Ok(())
        }
    }
}

async fn save_bill(
    bot: &Bot,
    chat_id: ChatId,
    user: &LinkedUser,
    ledger: &Ledger,
    day: u32,
    amount: f64,
    description: &str,
) -> HandlerResult {
    match ledger.add_recurring_bill(user, day, amount, description).await {
        Ok(bill) => {
            send_html(
                bot,
                chat_id,
                handlers::format_bill_added(&bill),
                Some(bills_menu_keyboard().into()),
            )
            .await
        }
        Err(e) => send_error(bot, chat_id, e.into()).await,
    }
}

/// `/hoje`: the morning notice on demand
pub async fn bills_today(
    bot: Bot,
    msg: Message,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    match ledger.bills_due(&user, settings.today()).await {
        Ok(due) if due.is_empty() => {
            bot.send_message(msg.chat.id, format!("{} Nenhuma conta vence hoje.", emoji::SUCCESS))
                .await?;
            Ok(())
        }
        Ok(due) => send_html(&bot, msg.chat.id, handlers::format_due_bills_notice(&due), None).await,
        Err(e) => send_error(&bot, msg.chat.id, e.into()).await,
    }
}
