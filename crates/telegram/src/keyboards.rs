//! Keyboard builders for the bot menus
//!
//! Reply keyboards replace the phone keyboard and send their label back as a
//! plain message; inline keyboards sit under a message and answer with
//! callback data (see [`crate::callbacks`]).

use ledger::Category;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::constants::{menu, QUICK_DEPOSITS};
use crate::utils;

/// A reply keyboard button, recognised by its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Expense,
    Income,
    Balance,
    Statement,
    Goals,
    NewGoal,
    Bills,
    NewBill,
    Help,
    Back,
}

impl MenuAction {
    pub fn from_label(text: &str) -> Option<Self> {
        let action = match text.trim() {
            menu::EXPENSE => MenuAction::Expense,
            menu::INCOME => MenuAction::Income,
            menu::BALANCE => MenuAction::Balance,
            menu::STATEMENT => MenuAction::Statement,
            menu::GOALS => MenuAction::Goals,
            menu::NEW_GOAL => MenuAction::NewGoal,
            menu::BILLS => MenuAction::Bills,
            menu::NEW_BILL => MenuAction::NewBill,
            menu::HELP => MenuAction::Help,
            menu::BACK => MenuAction::Back,
            _ => return None,
        };
        Some(action)
    }
}

fn reply_keyboard(rows: &[&[&str]]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = rows
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(*label)).collect())
        .collect();
    KeyboardMarkup::new(rows).resize_keyboard(true)
}

/// Home menu
pub fn main_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[
        &[menu::EXPENSE, menu::INCOME],
        &[menu::BALANCE, menu::STATEMENT],
        &[menu::GOALS, menu::BILLS],
        &[menu::HELP],
    ])
}

pub fn goals_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[&[menu::NEW_GOAL, menu::BACK]])
}

pub fn bills_menu_keyboard() -> KeyboardMarkup {
    reply_keyboard(&[&[menu::NEW_BILL, menu::BACK]])
}

/// Quick deposit buttons under a goal card
pub fn goal_actions_keyboard(goal_id: &str) -> InlineKeyboardMarkup {
    let quick: Vec<InlineKeyboardButton> = QUICK_DEPOSITS
        .iter()
        .map(|amount| {
            InlineKeyboardButton::callback(
                format!("💵 +{}", amount),
                format!("invest:{}:{}", goal_id, amount),
            )
        })
        .collect();

    InlineKeyboardMarkup::new(vec![
        quick,
        vec![InlineKeyboardButton::callback(
            "✏️ Outro valor",
            format!("invest_custom:{}", goal_id),
        )],
    ])
}

/// Category choice for the transaction held in the dialogue, two per row
pub fn category_keyboard(categories: &[Category]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = categories
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|c| {
                    InlineKeyboardButton::callback(
                        utils::truncate(&c.name, 24),
                        format!("cat:{}", c.id),
                    )
                })
                .collect()
        })
        .collect();

    rows.push(vec![InlineKeyboardButton::callback("⏭️ Sem categoria", "cat_skip")]);
    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_CALLBACK_DATA_LEN;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
        keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_main_menu_keyboard() {
        let keyboard = main_menu_keyboard();
        assert_eq!(keyboard.keyboard.len(), 4);
        assert_eq!(keyboard.keyboard[0][0].text, menu::EXPENSE);
        assert_eq!(keyboard.keyboard[3][0].text, menu::HELP);
    }

    #[test]
    fn test_every_label_maps_back() {
        for row in main_menu_keyboard()
            .keyboard
            .iter()
            .chain(goals_menu_keyboard().keyboard.iter())
            .chain(bills_menu_keyboard().keyboard.iter())
        {
            for button in row {
                assert!(MenuAction::from_label(&button.text).is_some(), "{}", button.text);
            }
        }
        assert_eq!(MenuAction::from_label(" 💰 Saldo "), Some(MenuAction::Balance));
        assert_eq!(MenuAction::from_label("saldo"), None);
    }

    #[test]
    fn test_goal_actions_keyboard() {
        let keyboard = goal_actions_keyboard("42");
        assert_eq!(
            callback_data(&keyboard),
            vec!["invest:42:50", "invest:42:100", "invest:42:200", "invest_custom:42"]
        );
    }

    #[test]
    fn test_callback_data_fits_with_uuid_ids() {
        let uuid = "3f2b8c1e-9a7d-4e5f-b6a1-0c2d3e4f5a6b";
        let mut data = callback_data(&goal_actions_keyboard(uuid));
        data.extend(callback_data(&category_keyboard(&[category(uuid, "Alimentação")])));

        for d in data {
            assert!(d.len() <= MAX_CALLBACK_DATA_LEN, "{} is {} bytes", d, d.len());
        }
    }

    #[test]
    fn test_category_keyboard_layout() {
        let categories = vec![
            category("1", "Alimentação"),
            category("2", "Transporte"),
            category("3", "Lazer"),
        ];
        let keyboard = category_keyboard(&categories);
        // 2 + 1 categories, then the skip row
        assert_eq!(keyboard.inline_keyboard.len(), 3);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        assert_eq!(keyboard.inline_keyboard[1].len(), 1);
        assert_eq!(callback_data(&keyboard), vec!["cat:1", "cat:2", "cat:3", "cat_skip"]);
    }
}
