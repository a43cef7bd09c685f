use std::fmt;

use jiff::civil::Date;

use crate::dates::{format_date, whole_months_between};

use super::format_amount;

pub const INSTALMENT_CATEGORY: &str = "instalments";

/// A purchase paid off in equal monthly payments with interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Instalment {
    pub price: f64,
    pub description: String,
    pub category: String,
    pub bought_date: Date,
    pub months: u32,
    /// Annual interest rate in percent.
    pub annual_rate: f64,
}

impl Instalment {
    pub fn new(
        price: f64,
        description: impl Into<String>,
        bought_date: Date,
        months: u32,
        annual_rate: f64,
    ) -> Self {
        Self {
            price,
            description: description.into(),
            category: INSTALMENT_CATEGORY.to_string(),
            bought_date,
            months,
            annual_rate,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        let months = f64::from(self.months.max(1));
        let rate = self.annual_rate / 12.0 / 100.0;
        if rate == 0.0 {
            return self.price / months;
        }
        self.price * rate / (1.0 - (1.0 + rate).powf(-months))
    }

    pub fn total_payable(&self) -> f64 {
        self.monthly_payment() * f64::from(self.months)
    }

    pub fn payments_made(&self, on: Date) -> u32 {
        let elapsed = whole_months_between(self.bought_date, on).max(0) as u32;
        elapsed.min(self.months)
    }

    pub fn percentage_paid(&self, on: Date) -> f64 {
        if self.months == 0 {
            return 100.0;
        }
        f64::from(self.payments_made(on)) / f64::from(self.months) * 100.0
    }
}

impl fmt::Display for Instalment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[INS]{} {}(from: {}) {} months @ {:.2}% p.a. Monthly payment: {}",
            format_amount(self.price),
            self.description,
            format_date(self.bought_date),
            self.months,
            self.annual_rate,
            format_amount(self.monthly_payment())
        )
    }
}
