use std::{fmt, str::FromStr};

use jiff::civil::Date;

use crate::{dates::format_date, error::MoneyError};

use super::format_amount;

const SETTLED_EPSILON: f64 = 1e-9;

/// Direction of a loan from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanKind {
    /// Money borrowed by the user.
    Incoming,
    /// Money lent out by the user.
    Outgoing,
}

impl LoanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanKind::Incoming => "incoming",
            LoanKind::Outgoing => "outgoing",
        }
    }
}

impl FromStr for LoanKind {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "incoming" => Ok(LoanKind::Incoming),
            "outgoing" => Ok(LoanKind::Outgoing),
            other => Err(MoneyError::Rejected(format!("Unknown loan type: {}", other))),
        }
    }
}

impl fmt::Display for LoanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub amount: f64,
    /// The counterparty.
    pub description: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub kind: LoanKind,
    pub outstanding: f64,
}

impl Loan {
    pub fn new(amount: f64, description: impl Into<String>, start_date: Date, kind: LoanKind) -> Self {
        Self {
            amount,
            description: description.into(),
            start_date,
            end_date: None,
            kind,
            outstanding: amount,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding <= SETTLED_EPSILON
    }

    /// Pay back part of the loan. `None` settles the whole outstanding amount.
    pub fn settle(&mut self, amount: Option<f64>, on: Date) -> Result<f64, MoneyError> {
        if self.is_settled() {
            return Err(MoneyError::Rejected(
                "This loan has already been settled".to_string(),
            ));
        }

        let amount = amount.unwrap_or(self.outstanding);
        if amount > self.outstanding + SETTLED_EPSILON {
            return Err(MoneyError::Rejected(format!(
                "The amount you entered is more than the outstanding amount: {}",
                format_amount(self.outstanding)
            )));
        }

        self.outstanding -= amount;
        if self.is_settled() {
            self.outstanding = 0.0;
            self.end_date = Some(on);
        }

        Ok(amount)
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, verb) = match self.kind {
            LoanKind::Outgoing => ("[Outgoing]", "lent to"),
            LoanKind::Incoming => ("[Incoming]", "borrowed from"),
        };
        let end = self
            .end_date
            .map(format_date)
            .unwrap_or_else(|| "-".to_string());
        let status = if self.is_settled() {
            "[Settled]".to_string()
        } else {
            format!("[Outstanding {}]", format_amount(self.outstanding))
        };

        write!(
            f,
            "{} {} {} {} (Start: {}) (End: {}) {}",
            label,
            format_amount(self.amount),
            verb,
            self.description,
            format_date(self.start_date),
            end,
            status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_partial_then_full_settlement() {
        let mut loan = Loan::new(500.0, "Tom", date(2020, 1, 1), LoanKind::Outgoing);

        assert_eq!(loan.settle(Some(200.0), date(2020, 2, 1)).unwrap(), 200.0);
        assert_eq!(loan.outstanding, 300.0);
        assert!(!loan.is_settled());
        assert_eq!(loan.end_date, None);

        assert_eq!(loan.settle(None, date(2020, 3, 1)).unwrap(), 300.0);
        assert!(loan.is_settled());
        assert_eq!(loan.end_date, Some(date(2020, 3, 1)));

        assert!(loan.settle(Some(1.0), date(2020, 3, 2)).is_err());
    }

    #[test]
    fn test_overpayment_is_rejected() {
        let mut loan = Loan::new(100.0, "Tom", date(2020, 1, 1), LoanKind::Incoming);
        let err = loan.settle(Some(150.0), date(2020, 1, 2)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The amount you entered is more than the outstanding amount: $100.00"
        );
        assert_eq!(loan.outstanding, 100.0);
    }

    #[test]
    fn test_display() {
        let loan = Loan::new(500.0, "Tom", date(2020, 1, 1), LoanKind::Outgoing);
        assert_eq!(
            loan.to_string(),
            "[Outgoing] $500.00 lent to Tom (Start: 1/1/2020) (End: -) [Outstanding $500.00]"
        );
    }
}
