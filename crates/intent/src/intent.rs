use ledger::TransactionKind;

/// What the user wants done with a message
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Greeting,
    AddTransaction {
        kind: TransactionKind,
        amount: f64,
        description: String,
    },
    DeleteLast,
    CreateGoal {
        name: String,
        target: f64,
    },
    DepositGoal {
        goal: String,
        amount: f64,
    },
    CheckBalance,
    CheckBills,
    Statement,
    ListGoals,
    /// Nothing actionable; `reply` is a short answer the model may have offered
    Unknown {
        reply: Option<String>,
    },
}

impl Intent {
    pub fn unknown() -> Self {
        Intent::Unknown { reply: None }
    }

    /// Stable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::AddTransaction { .. } => "add_transaction",
            Intent::DeleteLast => "delete_last",
            Intent::CreateGoal { .. } => "create_goal",
            Intent::DepositGoal { .. } => "deposit_goal",
            Intent::CheckBalance => "check_balance",
            Intent::CheckBills => "check_bills",
            Intent::Statement => "statement",
            Intent::ListGoals => "list_goals",
            Intent::Unknown { .. } => "unknown",
        }
    }
}
