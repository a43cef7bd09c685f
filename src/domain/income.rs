use std::fmt;

use jiff::civil::Date;

use crate::dates::format_date;

use super::format_amount;

#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    pub price: f64,
    pub description: String,
    pub payday: Date,
}

impl Income {
    pub fn new(price: f64, description: impl Into<String>, payday: Date) -> Self {
        Self {
            price,
            description: description.into(),
            payday,
        }
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[I]{} {}(on: {})",
            format_amount(self.price),
            self.description,
            format_date(self.payday)
        )
    }
}
