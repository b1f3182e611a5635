//! Constants used throughout the telegram bot

/// Telegram rejects callback data longer than this
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Minimum seconds between two button presses from the same user
pub const RATE_LIMIT_SECONDS: u64 = 1;

/// Minimum seconds between two LLM-classified messages from the same user
pub const LLM_RATE_LIMIT_SECONDS: u64 = 3;

/// Transactions shown by the statement
pub const STATEMENT_LIMIT: usize = 10;

/// Quick deposit buttons under each goal card
pub const QUICK_DEPOSITS: [u32; 3] = [50, 100, 200];

/// Emoji constants for consistent UI
pub mod emoji {
    pub const SUCCESS: &str = "✅";
    pub const ERROR: &str = "❌";
    pub const WARNING: &str = "⚠️";
    pub const PENDING: &str = "⏳";
    pub const INCOME: &str = "🟢";
    pub const EXPENSE: &str = "🔴";
    pub const MONEY: &str = "💰";
    pub const CASH: &str = "💵";
    pub const GOAL: &str = "🎯";
    pub const PIN: &str = "📌";
    pub const CALENDAR: &str = "📅";
    pub const BELL: &str = "🔔";
    pub const LOCK: &str = "🔒";
    pub const ROCKET: &str = "🚀";
    pub const MEMO: &str = "📝";
    pub const TAG: &str = "🏷️";
    pub const TRASH: &str = "🗑️";
    pub const EMPTY: &str = "📭";
}

/// Reply keyboard labels; pressing one sends the label as a text message
pub mod menu {
    pub const EXPENSE: &str = "📉 Lançar Gasto";
    pub const INCOME: &str = "📈 Lançar Ganho";
    pub const BALANCE: &str = "💰 Saldo";
    pub const STATEMENT: &str = "📄 Extrato";
    pub const GOALS: &str = "🎯 Metas";
    pub const BILLS: &str = "📅 Contas Fixas";
    pub const HELP: &str = "❓ Ajuda";
    pub const NEW_GOAL: &str = "➕ Nova Meta";
    pub const NEW_BILL: &str = "➕ Nova Conta Fixa";
    pub const BACK: &str = "🔙 Voltar ao Menu";
}

/// Usage messages for commands
pub mod usage {
    pub const EXPENSE: &str = "Use: /gasto VALOR DESCRIÇÃO\nEx: /gasto 50,00 Pizza";
    pub const INCOME: &str = "Use: /ganho VALOR DESCRIÇÃO\nEx: /ganho 1500 Salário";
    pub const NEW_GOAL: &str = "Use: /nova_meta NOME VALOR\nEx: /nova_meta Viagem 5000";
    pub const DEPOSIT: &str = "Use: /investir VALOR META\nEx: /investir 200 Viagem";
    pub const BILL: &str = "Use: /fixa DIA VALOR DESCRIÇÃO\nEx: /fixa 10 150,00 Internet";
}

/// Fixed replies
pub mod text {
    pub const GENERIC_ERROR: &str = "⚠️ Ocorreu um erro interno. Tente novamente mais tarde.";
    pub const NOT_UNDERSTOOD: &str = "🤔 Não entendi. Tente algo como \"gastei 50 no mercado\" ou use o menu abaixo.";
    pub const SLOW_DOWN: &str = "⏳ Calma! Aguarde alguns segundos antes de mandar outra mensagem.";
    pub const NOT_TEXT: &str = "Por enquanto eu só entendo mensagens de texto.";
    pub const CANCELLED: &str = "Operação cancelada.";
    pub const GREETING: &str = "Olá! 🤖 Sou seu assistente financeiro do Finan.AI.\n\nMe conte seus gastos e ganhos em texto livre ou use o menu abaixo.";
    pub const HELP: &str = "💡 Guia rápido Finan.AI\n\n\
        • Lançar Gasto / Lançar Ganho: registra uma saída ou entrada.\n\
        • Saldo: balanço do mês atual.\n\
        • Extrato: últimos 10 lançamentos.\n\
        • Metas: acompanhe e invista nas suas metas.\n\
        • Contas Fixas: vencimentos do mês.\n\n\
        Você também pode escrever livremente, como \"gastei 32 no uber\" ou \"recebi 1500 de salário\".";
}
