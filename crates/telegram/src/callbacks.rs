//! Callback query handlers for inline keyboard interactions
//!
//! Data layouts (all within Telegram's 64-byte limit):
//! - `invest:<goal_id>:<amount>`: quick deposit
//! - `invest_custom:<goal_id>`: ask for a custom deposit amount
//! - `cat:<category_id>`: categorize the transaction held in the dialogue
//! - `cat_skip`: leave it uncategorized

use ledger::{GoalSelector, Ledger, LinkedUser};
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html;

use crate::commands::{deposit, prompt_deposit};
use crate::constants::{emoji, MAX_CALLBACK_DATA_LEN};
use crate::error::{BotError, UserMessage};
use crate::handlers::send_error;
use crate::rate_limit;
use crate::types::{HandlerResult, MyDialogue, State};

/// A parsed inline button press
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    Invest { goal_id: String, amount: f64 },
    InvestCustom { goal_id: String },
    SetCategory { category_id: String },
    SkipCategory,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        if data.len() > MAX_CALLBACK_DATA_LEN {
            return None;
        }

        let parts: Vec<&str> = data.split(':').collect();
        let action = match parts.as_slice() {
            ["invest", goal_id, amount] if !goal_id.is_empty() => CallbackAction::Invest {
                goal_id: goal_id.to_string(),
                amount: amount.parse::<u32>().ok().filter(|a| *a > 0)? as f64,
            },
            ["invest_custom", goal_id] if !goal_id.is_empty() => CallbackAction::InvestCustom {
                goal_id: goal_id.to_string(),
            },
            ["cat", category_id] if !category_id.is_empty() => CallbackAction::SetCategory {
                category_id: category_id.to_string(),
            },
            ["cat_skip"] => CallbackAction::SkipCategory,
            _ => return None,
        };
        Some(action)
    }
}

/// Handle all callback queries from inline keyboards
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    user: LinkedUser,
    ledger: Ledger,
) -> HandlerResult {
    // Answer callback query to remove loading state
    bot.answer_callback_query(&q.id).await?;

    let data = match q.data {
        Some(ref data) => data,
        None => return Ok(()),
    };

    let action = match CallbackAction::parse(data) {
        Some(action) => action,
        None => {
            tracing::warn!("Unknown callback data ({} bytes): {:?}", data.len(), data);
            return Ok(());
        }
    };

    // Rate limiting check
    if !rate_limit::check_callback(q.from.id.0) {
        tracing::debug!("Rate limited user: {}", q.from.id);
        return Ok(());
    }

    let message = match q.message {
        Some(msg) => msg,
        None => return Ok(()),
    };
    let chat_id = message.chat.id;

    match action {
        CallbackAction::Invest { goal_id, amount } => {
            deposit(&bot, chat_id, &user, &ledger, GoalSelector::Id(&goal_id), amount).await?;
        }
        CallbackAction::InvestCustom { goal_id } => {
            match ledger.find_goal(&user, GoalSelector::Id(&goal_id)).await {
                Ok(Some(goal)) => prompt_deposit(&bot, chat_id, &dialogue, &goal).await?,
                Ok(None) => {
                    let err = BotError::from(ledger::LedgerError::NotFound("Meta".into()));
                    bot.send_message(chat_id, err.user_message()).await?;
                }
                Err(e) => send_error(&bot, chat_id, e.into()).await?,
            }
        }
        CallbackAction::SetCategory { category_id } => {
            let transaction_id = match dialogue.get().await? {
                Some(State::ChoosingCategory { transaction_id }) => transaction_id,
                _ => {
                    bot.edit_message_text(chat_id, message.id, "⌛ Essa seleção expirou.")
                        .await?;
                    return Ok(());
                }
            };

            match ledger.set_category(&user, &transaction_id, &category_id).await {
                Ok(category) => {
                    dialogue.exit().await?;
                    bot.edit_message_text(
                        chat_id,
                        message.id,
                        format!(
                            "{} Categoria definida: {}",
                            emoji::TAG,
                            html::bold(&html::escape(&category.name))
                        ),
                    )
                    .parse_mode(ParseMode::Html)
                    .await?;
                }
                Err(e) => send_error(&bot, chat_id, e.into()).await?,
            }
        }
        CallbackAction::SkipCategory => {
            if let Some(State::ChoosingCategory { .. }) = dialogue.get().await? {
                dialogue.exit().await?;
            }
            bot.edit_message_text(chat_id, message.id, "Ok, lançamento mantido sem categoria.")
                .await?;
        }
    }

    Ok(())
}
