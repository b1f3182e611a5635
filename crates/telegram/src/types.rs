use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use teloxide::{
    dispatching::dialogue::{Dialogue, InMemStorage},
    macros::BotCommands,
};

/// Type alias for dialogue management with State and InMemStorage
pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

/// Type alias for handler result types
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// What the next plain-text message from a chat is expected to be
#[derive(Clone, Default, Debug, PartialEq)]
pub enum State {
    #[default]
    Start,
    /// `VALOR DESCRIÇÃO` for a new expense
    AwaitingExpense,
    /// `VALOR DESCRIÇÃO` for a new income
    AwaitingIncome,
    /// `NOME VALOR` for a new goal
    AwaitingGoal,
    /// A bare amount to put into a known goal
    AwaitingDeposit { goal_id: String, goal_name: String },
    /// `DIA VALOR DESCRIÇÃO` for a new recurring bill
    AwaitingBill,
    /// A transaction waiting for a category button
    ChoosingCategory { transaction_id: String },
}

/// Available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "Comandos disponíveis:")]
pub enum Command {
    #[command(description = "Vincular sua conta (use o código do site)")]
    Start(String),
    #[command(description = "Mostrar o menu principal")]
    Menu,
    #[command(description = "Guia rápido")]
    Ajuda,
    #[command(description = "Lançar gasto: /gasto 50 Pizza")]
    Gasto(String),
    #[command(description = "Lançar ganho: /ganho 1500 Salário")]
    Ganho(String),
    #[command(description = "Balanço do mês")]
    Saldo,
    #[command(description = "Últimos lançamentos")]
    Extrato,
    #[command(description = "Apagar o último lançamento")]
    Desfazer,
    #[command(description = "Ver suas metas")]
    Metas,
    #[command(description = "Criar meta: /nova_meta Viagem 5000")]
    NovaMeta(String),
    #[command(description = "Guardar em uma meta: /investir 200 Viagem")]
    Investir(String),
    #[command(description = "Conta fixa: /fixa DIA VALOR DESCRIÇÃO")]
    Fixa(String),
    #[command(description = "Listar contas fixas")]
    Contas,
    #[command(description = "Contas que vencem hoje")]
    Hoje,
    #[command(description = "Cancelar a operação atual")]
    Cancelar,
}

/// Bot-wide settings shared with every handler
#[derive(Clone, Debug)]
pub struct BotSettings {
    /// Timezone that decides what "today" and "this month" mean
    pub tz: Tz,
    /// Local hour of the daily bills notice
    pub notify_hour: u32,
    /// Web dashboard where accounts are created and linked
    pub web_app_url: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            tz: chrono_tz::America::Sao_Paulo,
            notify_hour: 8,
            web_app_url: "https://finan-ai-nine.vercel.app".to_string(),
        }
    }
}

impl BotSettings {
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
