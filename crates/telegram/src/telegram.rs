use crate::auth::{self, Access};
use crate::types::Command;
use crate::{callbacks, commands};
use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
    utils::command::BotCommands,
};

pub use crate::types::State;

/// Register bot commands in Telegram menu
pub async fn set_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

/// Update routing
///
/// `/start` is reachable by anyone so chats can link themselves. Every other
/// message or button is looked up first: linked chats get the
/// [`ledger::LinkedUser`] injected, unlinked ones the linking instructions,
/// and a failed lookup a generic error.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let start_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start(token)].endpoint(commands::start));

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Menu].endpoint(commands::menu))
        .branch(case![Command::Ajuda].endpoint(commands::help))
        .branch(case![Command::Gasto(args)].endpoint(commands::expense))
        .branch(case![Command::Ganho(args)].endpoint(commands::income))
        .branch(case![Command::Saldo].endpoint(commands::balance))
        .branch(case![Command::Extrato].endpoint(commands::statement))
        .branch(case![Command::Desfazer].endpoint(commands::undo))
        .branch(case![Command::Metas].endpoint(commands::list_goals))
        .branch(case![Command::NovaMeta(args)].endpoint(commands::new_goal))
        .branch(case![Command::Investir(args)].endpoint(commands::invest))
        .branch(case![Command::Fixa(args)].endpoint(commands::add_bill))
        .branch(case![Command::Contas].endpoint(commands::list_bills))
        .branch(case![Command::Hoje].endpoint(commands::bills_today))
        .branch(case![Command::Cancelar].endpoint(commands::cancel));

    let linked_messages = dptree::filter_map(Access::linked)
        .branch(command_handler)
        .branch(case![State::AwaitingExpense].endpoint(commands::receive_expense))
        .branch(case![State::AwaitingIncome].endpoint(commands::receive_income))
        .branch(case![State::AwaitingGoal].endpoint(commands::receive_goal))
        .branch(case![State::AwaitingDeposit { goal_id, goal_name }].endpoint(commands::receive_deposit))
        .branch(case![State::AwaitingBill].endpoint(commands::receive_bill))
        .branch(dptree::endpoint(commands::handle_text));

    let gated_messages = dptree::entry()
        .map_async(auth::message_access)
        .branch(linked_messages)
        .branch(dptree::filter(|access: Access| access.is_unavailable()).endpoint(auth::unavailable_message))
        .branch(dptree::endpoint(auth::reject_message));

    let message_handler = Update::filter_message()
        .branch(start_handler)
        .branch(gated_messages);

    // Handle callback queries from inline keyboards
    let callback_handler = Update::filter_callback_query()
        .map_async(auth::callback_access)
        .branch(dptree::filter_map(Access::linked).endpoint(callbacks::handle_callback))
        .branch(dptree::filter(|access: Access| access.is_unavailable()).endpoint(auth::unavailable_callback))
        .branch(dptree::endpoint(auth::reject_callback));

    dialogue::enter::<Update, InMemStorage<State>, State, _>()
        .branch(message_handler)
        .branch(callback_handler)
}
