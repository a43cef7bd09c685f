// src/undo.rs
// Single-level undo: the inverse of the last mutating command.

use crate::{
    domain::{Account, BankTracker, Entry, EntryKind, Goal},
    error::MoneyError,
};

/// Everything needed to reverse one command.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoRecord {
    /// Drop the entry the command appended to a list.
    RemoveLast(EntryKind),
    /// Put a deleted entry back where it was.
    Reinsert { index: usize, entry: Entry },
    /// Restore an entry that was changed in place.
    Replace { index: usize, entry: Entry },
    /// Drop the expenditure a completed goal produced and reopen the goal.
    ReopenGoal { index: usize, goal: Goal },
    /// Restore a tracker and drop the income or expenditure the transfer recorded.
    RevertTransfer {
        index: usize,
        tracker: BankTracker,
        recorded: EntryKind,
    },
}

/// What was reversed, for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Reverted {
    pub entry: Entry,
    pub kind: EntryKind,
    pub remaining: usize,
}

impl UndoRecord {
    pub fn revert(self, account: &mut Account) -> Result<Reverted, MoneyError> {
        let missing = || MoneyError::Rejected("Nothing left to undo in this list".to_string());

        match self {
            UndoRecord::RemoveLast(kind) => {
                let entry = account.pop_entry(kind).ok_or_else(missing)?;
                Ok(Reverted {
                    entry,
                    kind,
                    remaining: account.len_of(kind),
                })
            }
            UndoRecord::Reinsert { index, entry } => {
                let kind = entry.kind();
                account.insert_entry(index, entry.clone());
                Ok(Reverted {
                    entry,
                    kind,
                    remaining: account.len_of(kind),
                })
            }
            UndoRecord::Replace { index, entry } => {
                let kind = entry.kind();
                account.replace_entry(index, entry.clone())?;
                Ok(Reverted {
                    entry,
                    kind,
                    remaining: account.len_of(kind),
                })
            }
            UndoRecord::ReopenGoal { index, goal } => {
                account
                    .pop_entry(EntryKind::Expenditure)
                    .ok_or_else(missing)?;
                let entry = Entry::Goal(goal);
                account.insert_entry(index, entry.clone());
                Ok(Reverted {
                    entry,
                    kind: EntryKind::Goal,
                    remaining: account.len_of(EntryKind::Goal),
                })
            }
            UndoRecord::RevertTransfer {
                index,
                tracker,
                recorded,
            } => {
                account.pop_entry(recorded).ok_or_else(missing)?;
                let entry = Entry::BankTracker(tracker);
                account.replace_entry(index, entry.clone())?;
                Ok(Reverted {
                    entry,
                    kind: EntryKind::BankTracker,
                    remaining: account.len_of(EntryKind::BankTracker),
                })
            }
        }
    }
}

/// The last command issued, as far as undo is concerned.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum History {
    #[default]
    Empty,
    NotUndoable,
    Undoable(UndoRecord),
}

impl History {
    pub fn record(&mut self, undo: Option<UndoRecord>) {
        *self = match undo {
            Some(record) => History::Undoable(record),
            None => History::NotUndoable,
        };
    }

    /// Take the record to reverse. History is empty afterwards, unless the
    /// last command could not be undone.
    pub fn take(&mut self) -> Result<UndoRecord, MoneyError> {
        match std::mem::take(self) {
            History::Undoable(record) => Ok(record),
            History::NotUndoable => {
                *self = History::NotUndoable;
                Err(MoneyError::NotUndoable)
            }
            History::Empty => Err(MoneyError::NothingToUndo),
        }
    }
}
