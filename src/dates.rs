// src/dates.rs
// Calendar helpers: the d/M/yyyy text format, relative date shortcuts and
// whole-month arithmetic used by interest and instalment calculations.

use jiff::{civil::Date, ToSpan};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateError {
    #[error("Invalid date! Please enter date in the format: d/m/yyyy")]
    InvalidFormat(String),

    #[error("Date is out of range: {0}")]
    OutOfRange(String),
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse a date written as `d/M/yyyy`. Zero padding is optional.
pub fn parse_date(input: &str) -> Result<Date, DateError> {
    let trimmed = input.trim();
    let invalid = || DateError::InvalidFormat(trimmed.to_string());

    let mut parts = trimmed.split('/');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let day: i8 = day.parse().map_err(|_| invalid())?;
    let month: i8 = month.parse().map_err(|_| invalid())?;
    let year: i16 = year.parse().map_err(|_| invalid())?;
    if year < 1 {
        return Err(invalid());
    }

    Date::new(year, month, day).map_err(|_| invalid())
}

/// Resolve user input that is either a shortcut (`now`, `ytd`, `tmr`,
/// `lstwk`, `nxtwk`, `lstmth`, `nxtmth`, `lstyr`, `nxtyr`) or a `d/M/yyyy`
/// date.
pub fn resolve_date(input: &str, today: Date) -> Result<Date, DateError> {
    let shortcut: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let resolved = match shortcut.as_str() {
        "now" => Ok(today),
        "ytd" => today.checked_sub(1.day()),
        "tmr" => today.checked_add(1.day()),
        "lstwk" => today.checked_sub(7.days()),
        "nxtwk" => today.checked_add(7.days()),
        "lstmth" => today.checked_sub(1.month()),
        "nxtmth" => today.checked_add(1.month()),
        "lstyr" => today.checked_sub(1.year()),
        "nxtyr" => today.checked_add(1.year()),
        _ => return parse_date(input),
    };

    resolved.map_err(|e| DateError::OutOfRange(e.to_string()))
}

pub fn format_date(date: Date) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Number of complete months from `start` to `end`. Negative when `end`
/// is before `start`.
pub fn whole_months_between(start: Date, end: Date) -> i32 {
    let mut months = (i32::from(end.year()) - i32::from(start.year())) * 12
        + (i32::from(end.month()) - i32::from(start.month()));

    if months > 0 && end.day() < start.day() {
        months -= 1;
    } else if months < 0 && end.day() > start.day() {
        months += 1;
    }

    months
}

pub fn month_name(month: i8) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "Unknown",
    }
}

pub fn same_month(date: Date, year: i16, month: i8) -> bool {
    date.year() == year && date.month() == month
}
