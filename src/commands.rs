// src/commands.rs
// Typed money commands and their execution against an Account.

pub mod bank;
pub mod general;
pub mod goal;
pub mod instalment;
pub mod ledger;
pub mod loan;

use std::fmt::Display;

use jiff::civil::Date;

use crate::{
    domain::{
        Account, BankTracker, EntryKind, Expenditure, Goal, Income, Instalment, Loan, LoanKind,
    },
    error::MoneyError,
    ui::Ui,
    undo::{History, UndoRecord},
};

/// Notice shown in the output pane when a listing goes to the detail pane.
pub const LIST_NOTICE: &str = "Got it, list will be printed in the other pane!\n";

/// Which entries a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    CurrentMonth,
    Month { year: i16, month: i8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Deposit,
    Withdraw,
}

/// How a settle command names the loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanTarget {
    /// 1-based position among the loans of the matching kind.
    Index(usize),
    /// Counterparty name.
    Name(String),
}

/// One user intent. Indices are kept 1-based as typed and checked on execution.
#[derive(Debug, Clone, PartialEq)]
pub enum MoneyCommand {
    Start,
    Init {
        savings: f64,
        avg_monthly_exp: f64,
    },
    Exit,
    CreateBankAccount(BankTracker),
    ListBankTrackers,
    CheckFutureBalance {
        name: String,
        date: Date,
    },
    Transfer {
        direction: TransferDirection,
        amount: f64,
        name: String,
        date: Date,
    },
    DeleteBankAccount {
        name: String,
    },
    AddGoal(Goal),
    ListGoals,
    DeleteGoal {
        index: usize,
    },
    CommitGoal {
        indices: Vec<usize>,
    },
    DoneGoal {
        index: usize,
    },
    Find {
        keyword: String,
    },
    AddIncome(Income),
    AddExpenditure(Expenditure),
    SettleSplit {
        index: usize,
        party: usize,
    },
    ListIncome(Period),
    ListExpenditure(Period),
    DeleteIncome {
        index: usize,
    },
    DeleteExpenditure {
        index: usize,
    },
    Graph,
    Undo,
    AddInstalment(Instalment),
    DeleteInstalment {
        index: usize,
    },
    ListInstalments,
    AddLoan(Loan),
    ListLoans(Option<LoanKind>),
    SettleLoan {
        kind: LoanKind,
        amount: Option<f64>,
        target: LoanTarget,
    },
    DeleteLoan {
        index: usize,
    },
}

/// State a command runs against.
pub struct Context<'a> {
    pub account: &'a mut Account,
    pub ui: &'a mut Ui,
    pub history: &'a mut History,
    pub today: Date,
}

/// What executing a command did.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The account changed and must be written back.
    pub changed: bool,
    /// How to reverse the change, when it can be reversed.
    pub undo: Option<UndoRecord>,
    pub exit: bool,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            undo: None,
            exit: false,
        }
    }

    pub fn undoable(undo: UndoRecord) -> Self {
        Self {
            changed: true,
            undo: Some(undo),
            exit: false,
        }
    }

    pub fn permanent() -> Self {
        Self {
            changed: true,
            undo: None,
            exit: false,
        }
    }

    pub fn exit() -> Self {
        Self {
            changed: true,
            undo: None,
            exit: true,
        }
    }
}

impl MoneyCommand {
    pub fn is_undo(&self) -> bool {
        matches!(self, MoneyCommand::Undo)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            MoneyCommand::Start => "start",
            MoneyCommand::Init { .. } => "init",
            MoneyCommand::Exit => "bye",
            MoneyCommand::CreateBankAccount(_) => "bank-account",
            MoneyCommand::ListBankTrackers => "list bank trackers",
            MoneyCommand::CheckFutureBalance { .. } => "check-balance",
            MoneyCommand::Transfer {
                direction: TransferDirection::Deposit,
                ..
            } => "deposit",
            MoneyCommand::Transfer {
                direction: TransferDirection::Withdraw,
                ..
            } => "withdraw",
            MoneyCommand::DeleteBankAccount { .. } => "delete bank-account",
            MoneyCommand::AddGoal(_) => "goal",
            MoneyCommand::ListGoals => "list goals",
            MoneyCommand::DeleteGoal { .. } => "delete goal",
            MoneyCommand::CommitGoal { .. } => "commit goal",
            MoneyCommand::DoneGoal { .. } => "done goal",
            MoneyCommand::Find { .. } => "find",
            MoneyCommand::AddIncome(_) => "add income",
            MoneyCommand::AddExpenditure(e) if e.split.is_some() => "split",
            MoneyCommand::AddExpenditure(_) => "spent",
            MoneyCommand::SettleSplit { .. } => "settle",
            MoneyCommand::ListIncome(_) => "list income",
            MoneyCommand::ListExpenditure(_) => "list expenditure",
            MoneyCommand::DeleteIncome { .. } => "delete income",
            MoneyCommand::DeleteExpenditure { .. } => "delete expenditure",
            MoneyCommand::Graph => "graph",
            MoneyCommand::Undo => "undo",
            MoneyCommand::AddInstalment(_) => "add instalment",
            MoneyCommand::DeleteInstalment { .. } => "delete instalment",
            MoneyCommand::ListInstalments => "list all instalments",
            MoneyCommand::AddLoan(_) => "add loan",
            MoneyCommand::ListLoans(_) => "list loans",
            MoneyCommand::SettleLoan { .. } => "settle loan",
            MoneyCommand::DeleteLoan { .. } => "delete loan",
        }
    }

    pub fn execute(self, ctx: &mut Context<'_>) -> Result<Outcome, MoneyError> {
        match self {
            MoneyCommand::Start => general::start(ctx),
            MoneyCommand::Init {
                savings,
                avg_monthly_exp,
            } => general::init(ctx, savings, avg_monthly_exp),
            MoneyCommand::Exit => general::exit(ctx),
            MoneyCommand::Find { keyword } => general::find(ctx, &keyword),
            MoneyCommand::Graph => general::graph(ctx),
            MoneyCommand::Undo => general::undo(ctx),

            MoneyCommand::CreateBankAccount(tracker) => bank::create(ctx, tracker),
            MoneyCommand::ListBankTrackers => bank::list(ctx),
            MoneyCommand::CheckFutureBalance { name, date } => {
                bank::check_future_balance(ctx, &name, date)
            }
            MoneyCommand::Transfer {
                direction,
                amount,
                name,
                date,
            } => bank::transfer(ctx, direction, amount, &name, date),
            MoneyCommand::DeleteBankAccount { name } => bank::delete(ctx, &name),

            MoneyCommand::AddGoal(g) => goal::add(ctx, g),
            MoneyCommand::ListGoals => goal::list(ctx),
            MoneyCommand::DeleteGoal { index } => goal::delete(ctx, index),
            MoneyCommand::CommitGoal { indices } => goal::commit(ctx, &indices),
            MoneyCommand::DoneGoal { index } => goal::done(ctx, index),

            MoneyCommand::AddIncome(income) => ledger::add_income(ctx, income),
            MoneyCommand::AddExpenditure(expenditure) => {
                ledger::add_expenditure(ctx, expenditure)
            }
            MoneyCommand::SettleSplit { index, party } => ledger::settle_split(ctx, index, party),
            MoneyCommand::ListIncome(period) => ledger::list_income(ctx, period),
            MoneyCommand::ListExpenditure(period) => ledger::list_expenditure(ctx, period),
            MoneyCommand::DeleteIncome { index } => ledger::delete_income(ctx, index),
            MoneyCommand::DeleteExpenditure { index } => ledger::delete_expenditure(ctx, index),

            MoneyCommand::AddInstalment(ins) => instalment::add(ctx, ins),
            MoneyCommand::DeleteInstalment { index } => instalment::delete(ctx, index),
            MoneyCommand::ListInstalments => instalment::list(ctx),

            MoneyCommand::AddLoan(l) => loan::add(ctx, l),
            MoneyCommand::ListLoans(kind) => loan::list(ctx, kind),
            MoneyCommand::SettleLoan {
                kind,
                amount,
                target,
            } => loan::settle(ctx, kind, amount, target),
            MoneyCommand::DeleteLoan { index } => loan::delete(ctx, index),
        }
    }
}

/// Convert a 1-based index typed by the user into a position in a list of `len`.
pub(crate) fn checked_position(
    index: usize,
    len: usize,
    kind: EntryKind,
) -> Result<usize, MoneyError> {
    if index == 0 || index > len {
        return Err(MoneyError::OutOfBounds(kind));
    }
    Ok(index - 1)
}

pub(crate) fn added_message(kind: EntryKind, item: &impl Display, count: usize) -> String {
    format!(
        " Got it. I've added this {}:\n  {}\n Now you have {} {} listed\n",
        kind.label().to_lowercase(),
        item,
        count,
        kind.plural()
    )
}

pub(crate) fn removed_message(kind: EntryKind, item: &impl Display, count: usize) -> String {
    format!(
        " Noted. I've removed this {}:\n  {}\n Now you have {} {} listed\n",
        kind.label().to_lowercase(),
        item,
        count,
        kind.plural()
    )
}

/// Render entries as a numbered list, one per line.
pub(crate) fn numbered<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!(" {}.{}\n", i + 1, item))
        .collect()
}
