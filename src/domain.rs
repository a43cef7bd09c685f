pub mod account;
pub mod bank_tracker;
pub mod expenditure;
pub mod goal;
pub mod income;
pub mod instalment;
pub mod loan;

use std::fmt;

pub use account::Account;
pub use bank_tracker::BankTracker;
pub use expenditure::{Expenditure, Party, Split};
pub use goal::{Goal, Priority};
pub use income::Income;
pub use instalment::Instalment;
pub use loan::{Loan, LoanKind};

/// Render an amount the way every listing shows money.
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    // adding zero turns -0.0 into 0.0
    format!("${:.2}", rounded + 0.0)
}

/// The lists held by an [`Account`], used when reporting on entries
/// generically (undo, search, bounds errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expenditure,
    Goal,
    Instalment,
    Loan,
    BankTracker,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expenditure => "Expenditure",
            EntryKind::Goal => "Goal",
            EntryKind::Instalment => "Instalment",
            EntryKind::Loan => "Loan",
            EntryKind::BankTracker => "Bank Account",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            EntryKind::Income => "income entries",
            EntryKind::Expenditure => "expenses",
            EntryKind::Goal => "goals",
            EntryKind::Instalment => "instalments",
            EntryKind::Loan => "loans",
            EntryKind::BankTracker => "bank accounts",
        }
    }
}

/// A single entry of any list, owned.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Income(Income),
    Expenditure(Expenditure),
    Goal(Goal),
    Instalment(Instalment),
    Loan(Loan),
    BankTracker(BankTracker),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Income(_) => EntryKind::Income,
            Entry::Expenditure(_) => EntryKind::Expenditure,
            Entry::Goal(_) => EntryKind::Goal,
            Entry::Instalment(_) => EntryKind::Instalment,
            Entry::Loan(_) => EntryKind::Loan,
            Entry::BankTracker(_) => EntryKind::BankTracker,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Income(income) => write!(f, "{}", income),
            Entry::Expenditure(expenditure) => write!(f, "{}", expenditure),
            Entry::Goal(goal) => write!(f, "{}", goal),
            Entry::Instalment(instalment) => write!(f, "{}", instalment),
            Entry::Loan(loan) => write!(f, "{}", loan),
            Entry::BankTracker(tracker) => write!(f, "{}", tracker),
        }
    }
}
