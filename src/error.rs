// src/error.rs
// User-facing errors raised while parsing or executing a money command.
// The Display text of each variant is exactly what the user sees.

use thiserror::Error;

use crate::{dates::DateError, domain::EntryKind, storage::StorageError};

#[derive(Error, Debug)]
pub enum MoneyError {
    #[error("OOPS!!! I'm sorry, but I don't know what that means")]
    UnknownCommand(String),

    #[error("You are a new user, please type: init [existing savings] [Avg Monthly Expenditure]")]
    NewUser,

    #[error("You are already an existing user!")]
    AlreadyInitialized,

    #[error("Please enter in the format: {0}")]
    InvalidFormat(&'static str),

    #[error("Please input in the format: {0}")]
    InvalidPeriod(&'static str),

    #[error(transparent)]
    InvalidDate(#[from] DateError),

    #[error("Please enter a numerical number as the index of the {}", .0.label())]
    InvalidIndex(EntryKind),

    #[error("The serial number of the {} is Out Of Bounds!", .0.label())]
    OutOfBounds(EntryKind),

    #[error("{0} must be more than zero!")]
    NonPositiveAmount(&'static str),

    #[error("Please include the year!")]
    MissingYear,

    #[error("Month is invalid! Please pick a month from 1-12")]
    InvalidMonth,

    #[error("Sorry, FG does not find this account...")]
    AccountNotFound(String),

    #[error("There is already a bank account named {0}")]
    DuplicateAccount(String),

    #[error("Descriptions, names and categories cannot contain '@'")]
    ReservedCharacter,

    #[error("{0}")]
    Rejected(String),

    #[error("No command to undo!")]
    NothingToUndo,

    #[error("Command can't be undone!")]
    NotUndoable,

    #[error("Failed to save account: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_entry_kind() {
        assert_eq!(
            MoneyError::OutOfBounds(EntryKind::Goal).to_string(),
            "The serial number of the Goal is Out Of Bounds!"
        );
        assert_eq!(
            MoneyError::InvalidIndex(EntryKind::Loan).to_string(),
            "Please enter a numerical number as the index of the Loan"
        );
    }

    #[test]
    fn test_date_errors_are_transparent() {
        let err = MoneyError::from(DateError::InvalidFormat("x".to_string()));
        assert_eq!(
            err.to_string(),
            "Invalid date! Please enter date in the format: d/m/yyyy"
        );
    }
}
