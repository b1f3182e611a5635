//! Access control: only chats linked to a web account may use the bot

use ledger::{Ledger, LinkedUser};
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html;

use crate::constants::{emoji, text};
use crate::types::{BotSettings, HandlerResult};

/// Outcome of looking a chat up in the integrations table
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Linked(LinkedUser),
    Unlinked,
    /// The lookup itself failed; the chat may well be linked
    Unavailable,
}

impl Access {
    pub fn linked(self) -> Option<LinkedUser> {
        match self {
            Access::Linked(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Access::Unavailable)
    }
}

pub(crate) async fn lookup(ledger: &Ledger, chat_id: ChatId) -> Access {
    match ledger.linked_user(&chat_id.0.to_string()).await {
        Ok(Some(user)) => Access::Linked(user),
        Ok(None) => Access::Unlinked,
        Err(e) => {
            tracing::error!("Failed to look up integration for chat {}: {}", chat_id.0, e);
            Access::Unavailable
        }
    }
}

/// Injects the [`Access`] of the chat a message came from
pub async fn message_access(msg: Message, ledger: Ledger) -> Access {
    lookup(&ledger, msg.chat.id).await
}

/// Same for inline keyboard presses; presses without a message are unlinked
pub async fn callback_access(q: CallbackQuery, ledger: Ledger) -> Access {
    match q.message.as_ref() {
        Some(msg) => lookup(&ledger, msg.chat.id).await,
        None => Access::Unlinked,
    }
}

/// How to link a chat, shown to anyone not linked yet
pub fn link_instructions(settings: &BotSettings) -> String {
    format!(
        "{} {}\n\n\
         Para sua segurança, este bot só funciona vinculado à sua conta Finan.AI.\n\n\
         🛠 {}\n\
         1. Acesse o painel: {}\n\
         2. Vá em {}\n\
         3. Clique em \"Conectar Telegram\" ou copie o código e envie aqui (ex: /start 123)\n\n\
         {}",
        emoji::LOCK,
        html::bold("Dispositivo não vinculado"),
        html::bold("Como conectar:"),
        html::escape(&settings.web_app_url),
        html::bold("Configurações &gt; Integrações"),
        html::italic("Dica: o site gera um botão que abre este chat já conectado."),
    )
}

/// Fallback for messages from chats without a linked account
pub async fn reject_message(bot: Bot, msg: Message, settings: BotSettings) -> HandlerResult {
    tracing::info!("Rejected message from unlinked chat {}", msg.chat.id.0);
    bot.send_message(msg.chat.id, link_instructions(&settings))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Fallback for button presses from chats without a linked account
pub async fn reject_callback(bot: Bot, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(&q.id)
        .text("🔒 Conecte sua conta com /start")
        .show_alert(true)
        .await?;
    Ok(())
}

/// The account lookup failed: apologise instead of asking to re-link
pub async fn unavailable_message(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, text::GENERIC_ERROR).await?;
    Ok(())
}

pub async fn unavailable_callback(bot: Bot, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(&q.id)
        .text(text::GENERIC_ERROR)
        .show_alert(true)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FlakyStore;
    use ledger::MemoryStore;

    #[test]
    fn test_link_instructions_mention_dashboard() {
        let settings = BotSettings {
            web_app_url: "https://example.com/app?a=1&b=2".into(),
            ..BotSettings::default()
        };
        let text = link_instructions(&settings);
        assert!(text.contains("<b>Dispositivo não vinculado</b>"));
        assert!(text.contains("https://example.com/app?a=1&amp;b=2"));
        assert!(text.contains("Configurações &gt; Integrações"));
        assert!(text.contains("/start 123"));
    }

    #[tokio::test]
    async fn test_lookup_linked_and_unlinked() {
        let store = MemoryStore::new();
        store.add_linked_integration("u1", "777");
        let ledger = Ledger::with_store(store);

        let access = lookup(&ledger, ChatId(777)).await;
        assert_eq!(
            access.clone().linked(),
            Some(LinkedUser {
                user_id: "u1".into(),
                chat_id: "777".into()
            })
        );
        assert!(!access.is_unavailable());

        let access = lookup(&ledger, ChatId(778)).await;
        assert_eq!(access, Access::Unlinked);
        assert_eq!(access.linked(), None);
    }

    #[tokio::test]
    async fn test_backend_outage_is_not_treated_as_unlinked() {
        let store = FlakyStore::down();
        store.inner.add_linked_integration("u1", "777");
        let ledger = Ledger::with_store(store);

        let access = lookup(&ledger, ChatId(777)).await;
        assert_eq!(access, Access::Unavailable);
        assert!(access.is_unavailable());
    }
}
