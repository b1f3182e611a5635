//! Basic bot commands (start, help, menu, cancel)

use ledger::{Ledger, LinkOutcome};
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::auth;
use crate::constants::{emoji, text};
use crate::error::BotError;
use crate::handlers::{send_error, send_html};
use crate::keyboards::main_menu_keyboard;
use crate::types::{BotSettings, Command, HandlerResult, MyDialogue};

/// `/start [TOKEN]`: link the chat, or greet an already linked one
pub async fn start(
    bot: Bot,
    msg: Message,
    token: String,
    ledger: Ledger,
    settings: BotSettings,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let chat_key = chat_id.0.to_string();
    let token = token.trim();

    if token.is_empty() {
        return match ledger.linked_user(&chat_key).await {
            Ok(Some(_)) => {
                send_html(
                    &bot,
                    chat_id,
                    "👋 Bem-vindo de volta! Seu Telegram já está conectado ao Finan.AI.",
                    Some(main_menu_keyboard().into()),
                )
                .await
            }
            Ok(None) => send_html(&bot, chat_id, auth::link_instructions(&settings), None).await,
            Err(e) => send_error(&bot, chat_id, e.into()).await,
        };
    }

    let username = msg.from().and_then(|user| user.username.clone());
    match ledger.link_chat(token, &chat_key, username.as_deref()).await {
        Ok(LinkOutcome::Linked { .. }) => {
            send_html(
                &bot,
                chat_id,
                format!(
                    "{} <b>Sucesso!</b> Conta vinculada.\n\nAgora seus lançamentos aqui aparecem automaticamente no painel web.",
                    emoji::SUCCESS
                ),
                Some(main_menu_keyboard().into()),
            )
            .await
        }
        Ok(LinkOutcome::InvalidToken) => {
            tracing::info!("Invalid link token from chat {}", chat_id.0);
            bot.send_message(
                chat_id,
                format!("{} Código inválido ou expirado. Gere um novo no site.", emoji::ERROR),
            )
            .await?;
            Ok(())
        }
        Err(e) => send_error(&bot, chat_id, BotError::from(e)).await,
    }
}

/// Display the quick guide with the available commands
pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    send_help(&bot, msg.chat.id).await
}

pub(crate) async fn send_help(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(
        chat_id,
        format!("{}\n\n{}", text::HELP, Command::descriptions()),
    )
    .reply_markup(main_menu_keyboard())
    .await?;
    Ok(())
}

/// Show the main reply keyboard
pub async fn menu(bot: Bot, msg: Message) -> HandlerResult {
    send_menu(&bot, msg.chat.id).await
}

pub(crate) async fn send_menu(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, "🤖 Menu principal. Escolha uma ação:")
        .reply_markup(main_menu_keyboard())
        .await?;
    Ok(())
}

/// Cancel the current operation and reset dialogue state
pub async fn cancel(bot: Bot, dialogue: MyDialogue, msg: Message) -> HandlerResult {
    dialogue.exit().await?;
    bot.send_message(msg.chat.id, text::CANCELLED)
        .reply_markup(main_menu_keyboard())
        .await?;
    Ok(())
}
