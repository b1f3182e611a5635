//! Savings goals: cards with quick deposits, creation and deposits

use intent::amount::{parse_amount, split_amount};
use ledger::{Goal, GoalSelector, Ledger, LinkedUser};
use teloxide::prelude::*;
use teloxide::utils::html;

use crate::commands::text::{leave_for_menu, reply_not_text};
use crate::constants::{emoji, usage};
use crate::handlers::{self, send_error, send_html};
use crate::keyboards::{goal_actions_keyboard, goals_menu_keyboard};
use crate::types::{BotSettings, HandlerResult, MyDialogue, State};

/// `/metas`
pub async fn list_goals(bot: Bot, msg: Message, user: LinkedUser, ledger: Ledger) -> HandlerResult {
    send_goals(&bot, msg.chat.id, &user, &ledger).await
}

/// One card per goal, each with its own deposit buttons
pub(crate) async fn send_goals(
    bot: &Bot,
    chat_id: ChatId,
    user: &LinkedUser,
    ledger: &Ledger,
) -> HandlerResult {
    let goals = match ledger.goals(user).await {
        Ok(goals) => goals,
        Err(e) => return send_error(bot, chat_id, e.into()).await,
    };

    if goals.is_empty() {
        return send_html(
            bot,
            chat_id,
            format!(
                "{} {}\nCrie uma nova com o botão abaixo ou /nova_meta Viagem 5000.",
                emoji::GOAL,
                html::bold("Sem metas")
            ),
            Some(goals_menu_keyboard().into()),
        )
        .await;
    }

    send_html(
        bot,
        chat_id,
        format!("{} {}\nSelecione uma ação rápida:", emoji::GOAL, html::bold("Painel de metas")),
        Some(goals_menu_keyboard().into()),
    )
    .await?;

    for goal in &goals {
        send_html(
            bot,
            chat_id,
            handlers::format_goal_card(goal),
            Some(goal_actions_keyboard(&goal.id).into()),
        )
        .await?;
    }
    Ok(())
}

/// `/nova_meta NOME VALOR`
pub async fn new_goal(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    args: String,
    user: LinkedUser,
    ledger: Ledger,
) -> HandlerResult {
    if args.trim().is_empty() {
        return prompt_goal(&bot, msg.chat.id, &dialogue).await;
    }
    match split_amount(&args) {
        Some((target, name)) if !name.is_empty() => {
            create_goal(&bot, msg.chat.id, &user, &ledger, &name, target).await
        }
        _ => {
            bot.send_message(msg.chat.id, format!("{} Formato inválido.\n{}", emoji::ERROR, usage::NEW_GOAL))
                .await?;
            Ok(())
        }
    }
}

pub(crate) async fn prompt_goal(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue) -> HandlerResult {
    dialogue.update(State::AwaitingGoal).await?;
    bot.send_message(
        chat_id,
        "🎯 Envie o nome e o valor alvo da meta.\nEx: Viagem 5000\n\n/cancelar para desistir.",
    )
    .await?;
    Ok(())
}

pub async fn receive_goal(
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

    match split_amount(text) {
        Some((target, name)) if !name.is_empty() => {
            dialogue.exit().await?;
            create_goal(&bot, msg.chat.id, &user, &ledger, &name, target).await
        }
        _ => {
            bot.send_message(
                msg.chat.id,
                format!("{} Preciso do nome e do valor. Ex: Viagem 5000", emoji::ERROR),
            )
            .await?;
            Ok(())
        }
    }
}

pub(crate) async fn create_goal(
    bot: &Bot,
    chat_id: ChatId,
    user: &LinkedUser,
    ledger: &Ledger,
    name: &str,
    target: f64,
) -> HandlerResult {
    match ledger.create_goal(user, name, target).await {
        Ok(goal) => {
            send_html(
                bot,
                chat_id,
                handlers::format_goal_created(&goal),
                Some(goal_actions_keyboard(&goal.id).into()),
            )
            .await
        }
        Err(e) => send_error(bot, chat_id, e.into()).await,
    }
}

/// `/investir VALOR META`
pub async fn invest(bot: Bot, msg: Message, args: String, user: LinkedUser, ledger: Ledger) -> HandlerResult {
    match split_amount(&args) {
        Some((amount, name)) if !name.is_empty() => {
            deposit(&bot, msg.chat.id, &user, &ledger, GoalSelector::Name(&name), amount).await
        }
        _ => {
            bot.send_message(msg.chat.id, format!("{} Formato inválido.\n{}", emoji::ERROR, usage::DEPOSIT))
                .await?;
            Ok(())
        }
    }
}

/// Ask how much to put into `goal`
pub(crate) async fn prompt_deposit(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &MyDialogue,
    goal: &Goal,
) -> HandlerResult {
    dialogue
        .update(State::AwaitingDeposit {
            goal_id: goal.id.clone(),
            goal_name: goal.name.clone(),
        })
        .await?;
    send_html(
        bot,
        chat_id,
        format!(
            "✏️ Quanto deseja guardar em {}?\nEnvie só o valor, ex: 150,00\n\n/cancelar para desistir.",
            html::bold(&html::escape(&goal.name))
        ),
        None,
    )
    .await
}

pub async fn receive_deposit(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    (goal_id, goal_name): (String, String),
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

    match parse_amount(text) {
        Some(amount) => {
            dialogue.exit().await?;
            deposit(&bot, msg.chat.id, &user, &ledger, GoalSelector::Id(&goal_id), amount).await
        }
        None => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "{} Valor inválido para {}. Envie só o número, ex: 150,00",
                    emoji::ERROR,
                    goal_name
                ),
            )
            .await?;
            Ok(())
        }
    }
}

pub(crate) async fn deposit(
    bot: &Bot,
    chat_id: ChatId,
    user: &LinkedUser,
    ledger: &Ledger,
    selector: GoalSelector<'_>,
    amount: f64,
) -> HandlerResult {
    match ledger.deposit_to_goal(user, selector, amount).await {
        Ok(deposit) => {
            send_html(
                bot,
                chat_id,
                handlers::format_deposit(&deposit),
                Some(goals_menu_keyboard().into()),
            )
            .await
        }
        Err(e) => send_error(bot, chat_id, e.into()).await,
    }
}
