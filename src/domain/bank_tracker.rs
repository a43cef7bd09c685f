use std::fmt;

use jiff::civil::Date;

use crate::dates::{format_date, whole_months_between};

use super::format_amount;

/// Tracks the balance of a bank account that compounds interest monthly.
#[derive(Debug, Clone, PartialEq)]
pub struct BankTracker {
    pub description: String,
    pub amount: f64,
    pub latest_date: Date,
    /// Monthly interest rate, e.g. `0.01` for 1% a month.
    pub rate: f64,
}

impl BankTracker {
    pub fn new(description: impl Into<String>, amount: f64, latest_date: Date, rate: f64) -> Self {
        Self {
            description: description.into(),
            amount,
            latest_date,
            rate,
        }
    }

    /// Balance at `date`, compounding once for every whole month since the
    /// latest update. Dates before the latest update return the balance as is.
    pub fn predict_amount(&self, date: Date) -> f64 {
        let months = whole_months_between(self.latest_date, date).max(0);
        self.amount * (1.0 + self.rate).powi(months)
    }

    /// Apply interest up to `date` and make it the latest update date.
    pub fn update_date(&mut self, date: Date) {
        self.amount = self.predict_amount(date);
        self.latest_date = date;
    }

    pub fn add_amount(&mut self, amount: f64) {
        self.amount += amount;
    }

    pub fn info(&self) -> String {
        format!(
            "  Name: {}\n  Balance: {}\n  Latest Update Date: {}\n  Monthly Interest Rate: {}",
            self.description,
            format_amount(self.amount),
            format_date(self.latest_date),
            self.rate
        )
    }
}

impl fmt::Display for BankTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[B] {} {} (updated: {}) @ {} monthly",
            self.description,
            format_amount(self.amount),
            format_date(self.latest_date),
            self.rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_predict_compounds_monthly() {
        let tracker = BankTracker::new("OCBC", 1000.0, date(2020, 1, 1), 0.01);
        assert_eq!(tracker.predict_amount(date(2020, 1, 20)), 1000.0);
        assert_eq!(format_amount(tracker.predict_amount(date(2020, 3, 1))), "$1020.10");
        assert_eq!(tracker.predict_amount(date(2019, 1, 1)), 1000.0);
    }

    #[test]
    fn test_update_date_applies_interest() {
        let mut tracker = BankTracker::new("OCBC", 1000.0, date(2020, 1, 1), 0.01);
        tracker.update_date(date(2020, 2, 1));
        tracker.add_amount(-10.0);
        assert_eq!(format_amount(tracker.amount), "$1000.00");
        assert_eq!(tracker.latest_date, date(2020, 2, 1));
    }

    #[test]
    fn test_info() {
        let tracker = BankTracker::new("OCBC", 1000.0, date(2020, 1, 1), 0.01);
        assert_eq!(
            tracker.info(),
            "  Name: OCBC\n  Balance: $1000.00\n  Latest Update Date: 1/1/2020\n  Monthly Interest Rate: 0.01"
        );
    }
}
