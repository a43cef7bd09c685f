use jiff::civil::Date;

use crate::{dates::same_month, error::MoneyError};

use super::{BankTracker, Entry, EntryKind, Expenditure, Goal, Income, Instalment, Loan, LoanKind};

/// Emergency buffer kept out of goal savings, in months of expenditure.
pub const BASE_SAVINGS_MONTHS: f64 = 6.0;

pub const INITIAL_SAVINGS_DESCRIPTION: &str = "Initial Savings";

/// Everything the tracker knows about the user's money.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub incomes: Vec<Income>,
    pub expenditures: Vec<Expenditure>,
    pub goals: Vec<Goal>,
    pub instalments: Vec<Instalment>,
    pub loans: Vec<Loan>,
    pub bank_trackers: Vec<BankTracker>,
    pub base_savings: f64,
    pub to_initialize: bool,
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

impl Account {
    pub fn new() -> Self {
        Self {
            incomes: Vec::new(),
            expenditures: Vec::new(),
            goals: Vec::new(),
            instalments: Vec::new(),
            loans: Vec::new(),
            bank_trackers: Vec::new(),
            base_savings: 0.0,
            to_initialize: true,
        }
    }

    /// Record the user's existing savings. Up to six months of average
    /// expenditure is set aside as base savings; anything above counts
    /// towards goals.
    pub fn initialize(&mut self, savings: f64, avg_monthly_exp: f64, today: Date) {
        let buffer = avg_monthly_exp * BASE_SAVINGS_MONTHS;
        self.base_savings = if savings > buffer { buffer } else { savings };
        self.incomes
            .push(Income::new(savings, INITIAL_SAVINGS_DESCRIPTION, today));
        self.to_initialize = false;
    }

    pub fn total_income(&self) -> f64 {
        self.incomes.iter().fold(0.0, |total, i| total + i.price)
    }

    pub fn total_expenditure(&self) -> f64 {
        self.expenditures.iter().fold(0.0, |total, e| total + e.price)
    }

    pub fn total_savings(&self) -> f64 {
        self.total_income() - self.total_expenditure()
    }

    pub fn goal_savings(&self) -> f64 {
        self.total_savings() - self.base_savings
    }

    pub fn incomes_in_month(&self, year: i16, month: i8) -> Vec<&Income> {
        self.incomes
            .iter()
            .filter(|i| same_month(i.payday, year, month))
            .collect()
    }

    pub fn expenditures_in_month(&self, year: i16, month: i8) -> Vec<&Expenditure> {
        self.expenditures
            .iter()
            .filter(|e| same_month(e.bought_date, year, month))
            .collect()
    }

    pub fn month_income(&self, year: i16, month: i8) -> f64 {
        self.incomes_in_month(year, month)
            .iter()
            .fold(0.0, |total, i| total + i.price)
    }

    pub fn month_expenditure(&self, year: i16, month: i8) -> f64 {
        self.expenditures_in_month(year, month)
            .iter()
            .fold(0.0, |total, e| total + e.price)
    }

    pub fn month_savings(&self, year: i16, month: i8) -> f64 {
        self.month_income(year, month) - self.month_expenditure(year, month)
    }

    pub fn loans_of_kind(&self, kind: LoanKind) -> Vec<&Loan> {
        self.loans.iter().filter(|l| l.kind == kind).collect()
    }

    pub fn find_tracker(&self, name: &str) -> Result<&BankTracker, MoneyError> {
        self.bank_trackers
            .iter()
            .find(|b| b.description == name)
            .ok_or_else(|| MoneyError::AccountNotFound(name.to_string()))
    }

    pub fn tracker_position(&self, name: &str) -> Result<usize, MoneyError> {
        self.bank_trackers
            .iter()
            .position(|b| b.description == name)
            .ok_or_else(|| MoneyError::AccountNotFound(name.to_string()))
    }

    pub fn len_of(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Income => self.incomes.len(),
            EntryKind::Expenditure => self.expenditures.len(),
            EntryKind::Goal => self.goals.len(),
            EntryKind::Instalment => self.instalments.len(),
            EntryKind::Loan => self.loans.len(),
            EntryKind::BankTracker => self.bank_trackers.len(),
        }
    }

    /// Remove the last entry of a list.
    pub fn pop_entry(&mut self, kind: EntryKind) -> Option<Entry> {
        match kind {
            EntryKind::Income => self.incomes.pop().map(Entry::Income),
            EntryKind::Expenditure => self.expenditures.pop().map(Entry::Expenditure),
            EntryKind::Goal => self.goals.pop().map(Entry::Goal),
            EntryKind::Instalment => self.instalments.pop().map(Entry::Instalment),
            EntryKind::Loan => self.loans.pop().map(Entry::Loan),
            EntryKind::BankTracker => self.bank_trackers.pop().map(Entry::BankTracker),
        }
    }

    /// Insert an entry at `index` of its list, or at the end when the list
    /// has become shorter.
    pub fn insert_entry(&mut self, index: usize, entry: Entry) {
        fn insert_at<T>(list: &mut Vec<T>, index: usize, item: T) {
            let index = index.min(list.len());
            list.insert(index, item);
        }

        match entry {
            Entry::Income(i) => insert_at(&mut self.incomes, index, i),
            Entry::Expenditure(e) => insert_at(&mut self.expenditures, index, e),
            Entry::Goal(g) => insert_at(&mut self.goals, index, g),
            Entry::Instalment(i) => insert_at(&mut self.instalments, index, i),
            Entry::Loan(l) => insert_at(&mut self.loans, index, l),
            Entry::BankTracker(b) => insert_at(&mut self.bank_trackers, index, b),
        }
    }

    /// Overwrite the entry at `index` of its list.
    pub fn replace_entry(&mut self, index: usize, entry: Entry) -> Result<(), MoneyError> {
        fn replace_at<T>(list: &mut [T], index: usize, item: T) -> bool {
            match list.get_mut(index) {
                Some(slot) => {
                    *slot = item;
                    true
                }
                None => false,
            }
        }

        let kind = entry.kind();
        let replaced = match entry {
            Entry::Income(i) => replace_at(&mut self.incomes, index, i),
            Entry::Expenditure(e) => replace_at(&mut self.expenditures, index, e),
            Entry::Goal(g) => replace_at(&mut self.goals, index, g),
            Entry::Instalment(i) => replace_at(&mut self.instalments, index, i),
            Entry::Loan(l) => replace_at(&mut self.loans, index, l),
            Entry::BankTracker(b) => replace_at(&mut self.bank_trackers, index, b),
        };

        if replaced {
            Ok(())
        } else {
            Err(MoneyError::OutOfBounds(kind))
        }
    }

    /// Clone of the entry at `index`, for reporting.
    pub fn entry_at(&self, kind: EntryKind, index: usize) -> Option<Entry> {
        match kind {
            EntryKind::Income => self.incomes.get(index).cloned().map(Entry::Income),
            EntryKind::Expenditure => self.expenditures.get(index).cloned().map(Entry::Expenditure),
            EntryKind::Goal => self.goals.get(index).cloned().map(Entry::Goal),
            EntryKind::Instalment => self.instalments.get(index).cloned().map(Entry::Instalment),
            EntryKind::Loan => self.loans.get(index).cloned().map(Entry::Loan),
            EntryKind::BankTracker => self.bank_trackers.get(index).cloned().map(Entry::BankTracker),
        }
    }

    /// Total number of entries across every list.
    pub fn entry_count(&self) -> usize {
        self.incomes.len()
            + self.expenditures.len()
            + self.goals.len()
            + self.instalments.len()
            + self.loans.len()
            + self.bank_trackers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use jiff::civil::date;

    fn today() -> Date {
        date(2020, 3, 15)
    }

    #[test]
    fn test_new_account_needs_initialization() {
        let account = Account::new();
        assert!(account.to_initialize);
        assert_eq!(account.entry_count(), 0);
        assert_eq!(account.total_savings(), 0.0);
    }

    #[test]
    fn test_empty_totals_are_positive_zero() {
        let account = Account::new();
        assert!(account.total_income().is_sign_positive());
        assert!(account.total_expenditure().is_sign_positive());
        assert!(account.month_income(1999, 1).is_sign_positive());
        assert!(account.month_expenditure(2020, 3).is_sign_positive());
    }

    #[test]
    fn test_initialize_caps_base_savings() {
        let mut account = Account::new();
        account.initialize(10_000.0, 1000.0, today());

        assert!(!account.to_initialize);
        assert_eq!(account.base_savings, 6000.0);
        assert_eq!(account.goal_savings(), 4000.0);
        assert_eq!(account.incomes[0].description, "Initial Savings");
        assert_eq!(account.incomes[0].payday, today());
    }

    #[test]
    fn test_initialize_small_savings_are_all_base() {
        let mut account = Account::new();
        account.initialize(3000.0, 1000.0, today());

        assert_eq!(account.base_savings, 3000.0);
        assert_eq!(account.goal_savings(), 0.0);
    }

    #[test]
    fn test_totals_and_month_views() {
        let mut account = Account::new();
        account.incomes.push(Income::new(100.0, "a", date(2020, 3, 1)));
        account.incomes.push(Income::new(50.0, "b", date(2020, 2, 1)));
        account
            .expenditures
            .push(Expenditure::new(30.0, "c", "food", date(2020, 3, 2)));
        account
            .expenditures
            .push(Expenditure::new(20.0, "d", "food", date(2019, 3, 2)));

        assert_eq!(account.total_income(), 150.0);
        assert_eq!(account.total_expenditure(), 50.0);
        assert_eq!(account.total_savings(), 100.0);
        assert_eq!(account.month_income(2020, 3), 100.0);
        assert_eq!(account.month_expenditure(2020, 3), 30.0);
        assert_eq!(account.month_savings(2020, 3), 70.0);
        assert_eq!(account.incomes_in_month(2020, 2).len(), 1);
        assert!(account.expenditures_in_month(2020, 1).is_empty());
    }

    #[test]
    fn test_find_tracker() {
        let mut account = Account::new();
        account
            .bank_trackers
            .push(BankTracker::new("OCBC", 10.0, today(), 0.0));

        assert_eq!(account.find_tracker("OCBC").unwrap().amount, 10.0);
        assert_eq!(account.tracker_position("OCBC").unwrap(), 0);

        let err = account.find_tracker("DBS").unwrap_err();
        assert_eq!(err.to_string(), "Sorry, FG does not find this account...");
    }

    #[test]
    fn test_loans_of_kind() {
        let mut account = Account::new();
        account
            .loans
            .push(Loan::new(10.0, "a", today(), LoanKind::Incoming));
        account
            .loans
            .push(Loan::new(10.0, "b", today(), LoanKind::Outgoing));
        account
            .loans
            .push(Loan::new(10.0, "c", today(), LoanKind::Outgoing));

        assert_eq!(account.loans_of_kind(LoanKind::Incoming).len(), 1);
        assert_eq!(account.loans_of_kind(LoanKind::Outgoing).len(), 2);
    }

    #[test]
    fn test_generic_entry_operations() {
        let mut account = Account::new();
        account.goals.push(Goal::new(1.0, "a", today(), Priority::Low));
        account.goals.push(Goal::new(2.0, "b", today(), Priority::Low));

        let popped = account.pop_entry(EntryKind::Goal).unwrap();
        assert_eq!(popped.kind(), EntryKind::Goal);
        assert_eq!(account.len_of(EntryKind::Goal), 1);

        account.insert_entry(0, popped);
        assert_eq!(account.goals[0].description, "b");

        account.insert_entry(10, Entry::Goal(Goal::new(3.0, "c", today(), Priority::High)));
        assert_eq!(account.goals[2].description, "c");

        account
            .replace_entry(1, Entry::Goal(Goal::new(9.0, "z", today(), Priority::High)))
            .unwrap();
        assert_eq!(account.goals[1].description, "z");
        assert!(account
            .replace_entry(7, Entry::Goal(Goal::new(9.0, "z", today(), Priority::High)))
            .is_err());

        assert!(account.pop_entry(EntryKind::Loan).is_none());
        assert!(account.entry_at(EntryKind::Goal, 2).is_some());
        assert!(account.entry_at(EntryKind::Goal, 3).is_none());
    }
}
