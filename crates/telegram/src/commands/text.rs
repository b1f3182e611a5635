//! Free text: menu buttons, pattern-routed phrases and LLM classification

use intent::{Intent, IntentExtractor};
use ledger::{GoalSelector, Ledger, LinkedUser, TransactionKind};
use teloxide::prelude::*;
use teloxide::types::ChatAction;

use crate::commands::{basic, bills, goals, reports, transactions};
use crate::constants::text;
use crate::handlers::{send_error, send_html};
use crate::keyboards::{main_menu_keyboard, MenuAction};
use crate::rate_limit;
use crate::types::{BotSettings, HandlerResult, MyDialogue};

type FlowResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Any text message outside a prompt
pub async fn handle_text(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    user: LinkedUser,
    ledger: Ledger,
    settings: BotSettings,
    extractor: IntentExtractor,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(text) = msg.text() else {
        return reply_not_text(&bot, chat_id).await;
    };

    if let Some(action) = MenuAction::from_label(text) {
        return run_menu(&bot, chat_id, &dialogue, &user, &ledger, &settings, action).await;
    }

    if text.starts_with('/') {
        bot.send_message(chat_id, "Comando não reconhecido. Veja /ajuda.")
            .await?;
        return Ok(());
    }

    if let Some(intent) = extractor.route(text) {
        tracing::debug!("Routed message to {} without LLM", intent.name());
        return execute_intent(&bot, chat_id, &dialogue, &user, &ledger, &settings, intent).await;
    }

    if !extractor.llm_enabled() {
        return not_understood(&bot, chat_id).await;
    }

    let sender = msg.from().map(|u| u.id.0).unwrap_or(chat_id.0.unsigned_abs());
    if !rate_limit::check_llm(sender) {
        tracing::debug!("LLM rate limited user: {}", sender);
        bot.send_message(chat_id, text::SLOW_DOWN).await?;
        return Ok(());
    }

    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
        tracing::debug!("Typing indicator failed: {}", e);
    }

    match extractor.ask_llm(text).await {
        Ok(intent) => execute_intent(&bot, chat_id, &dialogue, &user, &ledger, &settings, intent).await,
        Err(e) => send_error(&bot, chat_id, e.into()).await,
    }
}

/// Carry out a classified intent
pub(crate) async fn execute_intent(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &MyDialogue,
    user: &LinkedUser,
    ledger: &Ledger,
    settings: &BotSettings,
    intent: Intent,
) -> HandlerResult {
    match intent {
        Intent::Greeting => {
            send_html(bot, chat_id, text::GREETING, Some(main_menu_keyboard().into())).await
        }
        Intent::AddTransaction {
            kind,
            amount,
            description,
        } => {
            transactions::record(bot, chat_id, dialogue, user, ledger, settings, kind, amount, &description)
                .await
        }
        Intent::DeleteLast => transactions::delete_last(bot, chat_id, user, ledger).await,
        Intent::CreateGoal { name, target } => {
            goals::create_goal(bot, chat_id, user, ledger, &name, target).await
        }
        Intent::DepositGoal { goal, amount } => {
            goals::deposit(bot, chat_id, user, ledger, GoalSelector::Name(&goal), amount).await
        }
        Intent::CheckBalance => reports::send_balance(bot, chat_id, user, ledger, settings).await,
        Intent::CheckBills => bills::send_bills(bot, chat_id, user, ledger, settings).await,
        Intent::Statement => reports::send_statement(bot, chat_id, user, ledger).await,
        Intent::ListGoals => goals::send_goals(bot, chat_id, user, ledger).await,
        Intent::Unknown { reply: Some(reply) } => {
            bot.send_message(chat_id, reply)
                .reply_markup(main_menu_keyboard())
                .await?;
            Ok(())
        }
        Intent::Unknown { reply: None } => not_understood(bot, chat_id).await,
    }
}

/// Reply keyboard buttons
pub(crate) async fn run_menu(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &MyDialogue,
    user: &LinkedUser,
    ledger: &Ledger,
    settings: &BotSettings,
    action: MenuAction,
) -> HandlerResult {
    match action {
        MenuAction::Expense => transactions::prompt(bot, chat_id, dialogue, TransactionKind::Expense).await,
        MenuAction::Income => transactions::prompt(bot, chat_id, dialogue, TransactionKind::Income).await,
        MenuAction::Balance => reports::send_balance(bot, chat_id, user, ledger, settings).await,
        MenuAction::Statement => reports::send_statement(bot, chat_id, user, ledger).await,
        MenuAction::Goals => goals::send_goals(bot, chat_id, user, ledger).await,
        MenuAction::NewGoal => goals::prompt_goal(bot, chat_id, dialogue).await,
        MenuAction::Bills => bills::send_bills(bot, chat_id, user, ledger, settings).await,
        MenuAction::NewBill => bills::prompt_bill(bot, chat_id, dialogue).await,
        MenuAction::Help => basic::send_help(bot, chat_id).await,
        MenuAction::Back => basic::send_menu(bot, chat_id).await,
    }
}

/// Menu buttons always win over a pending prompt; returns `true` if `text` was one
pub(crate) async fn leave_for_menu(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &MyDialogue,
    user: &LinkedUser,
    ledger: &Ledger,
    settings: &BotSettings,
    text: &str,
) -> FlowResult<bool> {
    let Some(action) = MenuAction::from_label(text) else {
        return Ok(false);
    };
    dialogue.exit().await?;
    run_menu(bot, chat_id, dialogue, user, ledger, settings, action).await?;
    Ok(true)
}

pub(crate) async fn reply_not_text(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, text::NOT_TEXT).await?;
    Ok(())
}

async fn not_understood(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, text::NOT_UNDERSTOOD)
        .reply_markup(main_menu_keyboard())
        .await?;
    Ok(())
}
