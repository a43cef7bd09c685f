use std::fmt;

use jiff::civil::Date;

use crate::{dates::format_date, error::MoneyError};

use super::format_amount;

#[derive(Debug, Clone, PartialEq)]
pub struct Party {
    pub name: String,
    pub paid: bool,
}

/// The people an expenditure is shared with. The user holds one share
/// and each party owes another.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    parties: Vec<Party>,
}

impl Split {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parties: names
                .into_iter()
                .map(|name| Party {
                    name: name.into(),
                    paid: false,
                })
                .collect(),
        }
    }

    pub fn from_parties(parties: Vec<Party>) -> Self {
        Self { parties }
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn each_owe(&self, price: f64) -> f64 {
        price / (self.parties.len() as f64 + 1.0)
    }

    pub fn is_settled(&self) -> bool {
        self.parties.iter().all(|p| p.paid)
    }

    pub fn outstanding(&self, price: f64) -> f64 {
        if self.is_settled() {
            return 0.0;
        }
        let paid = self.parties.iter().filter(|p| p.paid).count() as f64;
        price - self.each_owe(price) * (1.0 + paid)
    }

    /// Mark the party at `index` (0-based) as paid.
    pub fn settle(&mut self, index: usize) -> Result<&Party, MoneyError> {
        let party = self.parties.get_mut(index).ok_or_else(|| {
            MoneyError::Rejected("There is no such person in this split expense".to_string())
        })?;

        if party.paid {
            return Err(MoneyError::Rejected(format!(
                "{} has already paid for this expense",
                party.name
            )));
        }

        party.paid = true;
        Ok(party)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expenditure {
    pub price: f64,
    pub description: String,
    pub category: String,
    pub bought_date: Date,
    pub split: Option<Split>,
}

impl Expenditure {
    pub fn new(
        price: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        bought_date: Date,
    ) -> Self {
        Self {
            price,
            description: description.into(),
            category: category.into(),
            bought_date,
            split: None,
        }
    }

    pub fn with_split(mut self, split: Split) -> Self {
        self.split = Some(split);
        self
    }
}

impl fmt::Display for Expenditure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.split.is_some() { "[SE]" } else { "[E]" };
        write!(
            f,
            "{}{} {}(on: {})",
            tag,
            format_amount(self.price),
            self.description,
            format_date(self.bought_date)
        )?;

        if let Some(split) = &self.split {
            if split.is_settled() {
                write!(f, " [Settled]")?;
            } else {
                write!(
                    f,
                    " [Outstanding {}]",
                    format_amount(split.outstanding(self.price))
                )?;
            }

            let people: Vec<String> = split
                .parties()
                .iter()
                .map(|p| format!("{}{}", if p.paid { "[✓]" } else { "[✘]" }, p.name))
                .collect();
            write!(f, "\n Split with {}", people.join(" and "))?;
        }

        Ok(())
    }
}
