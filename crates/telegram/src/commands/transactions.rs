//! Expense and income entry, plus undo

use intent::amount::split_amount;
use ledger::{Ledger, LinkedUser, TransactionKind};
use teloxide::prelude::*;

use crate::commands::text::{leave_for_menu, reply_not_text};
use crate::constants::{emoji, usage};
use crate::handlers::{self, send_error, send_html};
use crate::keyboards::{category_keyboard, main_menu_keyboard};
use crate::types::{BotSettings, HandlerResult, MyDialogue, State};

/// `/gasto VALOR DESCRIÇÃO`
pub async fn expense(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    args: String,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    add_from_args(&bot, &msg, &dialogue, &user, &ledger, &settings, TransactionKind::Expense, &args).await
}

/// `/ganho VALOR DESCRIÇÃO`
pub async fn income(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    args: String,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    add_from_args(&bot, &msg, &dialogue, &user, &ledger, &settings, TransactionKind::Income, &args).await
}

#[allow(clippy::too_many_arguments)]
async fn add_from_args(
    bot: &Bot,
    msg: &Message,
    dialogue: &MyDialogue,
    user: &LinkedUser,
    ledger: &Ledger,
    settings: &BotSettings,
    kind: TransactionKind,
    args: &str,
) -> HandlerResult {
    if args.trim().is_empty() {
        return prompt(bot, msg.chat.id, dialogue, kind).await;
    }

    match split_amount(args) {
        Some((amount, description)) => {
            record(bot, msg.chat.id, dialogue, user, ledger, settings, kind, amount, &description).await
        }
        None => {
            bot.send_message(msg.chat.id, format!("{} Formato inválido.\n{}", emoji::ERROR, usage_for(kind)))
                .await?;
            Ok(())
        }
    }
}

fn usage_for(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => usage::EXPENSE,
        TransactionKind::Income => usage::INCOME,
    }
}

/// Ask for `VALOR DESCRIÇÃO` and wait for it
pub(crate) async fn prompt(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &MyDialogue,
    kind: TransactionKind,
) -> HandlerResult {
    let (state, question) = match kind {
        TransactionKind::Expense => (
            State::AwaitingExpense,
            "📉 Envie o valor e a descrição do gasto.\nEx: 50,00 Pizza",
        ),
        TransactionKind::Income => (
            State::AwaitingIncome,
            "📈 Envie o valor e a descrição do ganho.\nEx: 1500 Salário",
        ),
    };
    dialogue.update(state).await?;
    bot.send_message(chat_id, format!("{}\n\n/cancelar para desistir.", question))
        .await?;
    Ok(())
}

pub async fn receive_expense(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    receive(&bot, &msg, &dialogue, &user, &ledger, &settings, TransactionKind::Expense).await
}

pub async fn receive_income(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    receive(&bot, &msg, &dialogue, &user, &ledger, &settings, TransactionKind::Income).await
}

async fn receive(
    bot: &Bot,
    msg: &Message,
    dialogue: &MyDialogue,
    user: &LinkedUser,
    ledger: &Ledger,
    settings: &BotSettings,
    kind: TransactionKind,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return reply_not_text(bot, msg.chat.id).await;
    };
    if leave_for_menu(bot, msg.chat.id, dialogue, user, ledger, settings, text).await? {
        return Ok(());
    }

    match split_amount(text) {
        Some((amount, description)) => {
            dialogue.exit().await?;
            record(bot, msg.chat.id, dialogue, user, ledger, settings, kind, amount, &description).await
        }
        None => {
            bot.send_message(
                msg.chat.id,
                format!("{} Não encontrei o valor. Tente de novo ou /cancelar.\nEx: 50,00 Pizza", emoji::ERROR),
            )
            .await?;
            Ok(())
        }
    }
}

/// Store a transaction and confirm it; offer category buttons when none was guessed
#[allow(clippy::too_many_arguments)]
pub(crate) async fn record(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &MyDialogue,
    user: &LinkedUser,
    ledger: &Ledger,
    settings: &BotSettings,
    kind: TransactionKind,
    amount: f64,
    description: &str,
) -> HandlerResult {
    let added = match ledger
        .add_transaction(user, kind, amount, description, settings.today())
        .await
    {
        Ok(added) => added,
        Err(e) => return send_error(bot, chat_id, e.into()).await,
    };

    let text = handlers::format_added(&added);
    if added.category.is_some() {
        // A newer entry supersedes any pending category choice
        if let Some(State::ChoosingCategory { .. }) = dialogue.get().await? {
            dialogue.exit().await?;
        }
    } else {
        match ledger.category_options(user).await {
            Ok(options) if !options.is_empty() => {
                dialogue
                    .update(State::ChoosingCategory {
                        transaction_id: added.transaction.id.clone(),
                    })
                    .await?;
                let text = format!("{}\n\n{} Escolha uma categoria:", text, emoji::TAG);
                return send_html(bot, chat_id, text, Some(category_keyboard(&options).into())).await;
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Could not load categories for {}: {}", user.user_id, e),
        }
    }

    send_html(bot, chat_id, text, Some(main_menu_keyboard().into())).await
}

/// `/desfazer`
pub async fn undo(bot: Bot, msg: Message, user: LinkedUser, ledger: Ledger) -> HandlerResult {
    delete_last(&bot, msg.chat.id, &user, &ledger).await
}

pub(crate) async fn delete_last(
    bot: &Bot,
    chat_id: ChatId,
    user: &LinkedUser,
    ledger: &Ledger,
) -> HandlerResult {
    match ledger.delete_last(user).await {
        Ok(Some(tx)) => send_html(bot, chat_id, handlers::format_deleted(&tx), None).await,
        Ok(None) => {
            bot.send_message(chat_id, format!("{} Você ainda não tem lançamentos para apagar.", emoji::EMPTY))
                .await?;
            Ok(())
        }
        Err(e) => send_error(bot, chat_id, e.into()).await,
    }
}
