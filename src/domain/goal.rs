use std::{fmt, str::FromStr};

use jiff::civil::Date;

use crate::{dates::format_date, error::MoneyError};

use super::format_amount;

pub const GOAL_CATEGORY: &str = "GS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            _ => Err(MoneyError::Rejected(
                "Priority must be HIGH, MEDIUM or LOW".to_string(),
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub price: f64,
    pub description: String,
    pub category: String,
    pub by_date: Date,
    pub priority: Priority,
}

impl Goal {
    pub fn new(price: f64, description: impl Into<String>, by_date: Date, priority: Priority) -> Self {
        Self {
            price,
            description: description.into(),
            category: GOAL_CATEGORY.to_string(),
            by_date,
            priority,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[G]{} {} (to achieve by: {}) [{}]",
            format_amount(self.price),
            self.description,
            format_date(self.by_date),
            self.priority
        )
    }
}
