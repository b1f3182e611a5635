//! Monthly balance and statement

use ledger::{Ledger, LinkedUser};
use teloxide::prelude::*;

use crate::constants::STATEMENT_LIMIT;
use crate::handlers::{self, send_error, send_html};
use crate::keyboards::main_menu_keyboard;
use crate::types::{BotSettings, HandlerResult};

/// `/saldo`
pub async fn balance(
    bot: Bot,
    msg: Message,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    send_balance(&bot, msg.chat.id, &user, &ledger, &settings).await
}

pub(crate) async fn send_balance(
    bot: &Bot,
    chat_id: ChatId,
    user: &LinkedUser,
    ledger: &Ledger,
    settings: &BotSettings,
) -> HandlerResult {
    match ledger.monthly_balance(user, settings.today()).await {
        Ok(balance) => {
            send_html(
                bot,
                chat_id,
                handlers::format_balance(&balance),
                Some(main_menu_keyboard().into()),
            )
            .await
        }
        Err(e) => send_error(bot, chat_id, e.into()).await,
    }
}

/// `/extrato`
pub async fn statement(bot: Bot, msg: Message, user: LinkedUser, ledger: Ledger) -> HandlerResult {
    send_statement(&bot, msg.chat.id, &user, &ledger).await
}

pub(crate) async fn send_statement(
    bot: &Bot,
    chat_id: ChatId,
    user: &LinkedUser,
    ledger: &Ledger,
) -> HandlerResult {
    match ledger.statement(user, STATEMENT_LIMIT).await {
        Ok(transactions) => {
            send_html(
                bot,
                chat_id,
                handlers::format_statement(&transactions),
                Some(main_menu_keyboard().into()),
            )
            .await
        }
        Err(e) => send_error(bot, chat_id, e.into()).await,
    }
}
