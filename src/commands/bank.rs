use jiff::civil::Date;

use crate::{
    dates::format_date,
    domain::{format_amount, BankTracker, Entry, EntryKind, Expenditure, Income},
    error::MoneyError,
    undo::UndoRecord,
};

use super::{numbered, Context, Outcome, TransferDirection, LIST_NOTICE};

pub const WITHDRAW_CATEGORY: &str = "withdraw from bank";

fn reject_stale_date(tracker: &BankTracker, date: Date) -> Result<(), MoneyError> {
    if date < tracker.latest_date {
        return Err(MoneyError::Rejected(
            "The input date is invalid! It should be a date later than the latest update date."
                .to_string(),
        ));
    }
    Ok(())
}

pub fn create(ctx: &mut Context<'_>, tracker: BankTracker) -> Result<Outcome, MoneyError> {
    if ctx.account.find_tracker(&tracker.description).is_ok() {
        return Err(MoneyError::DuplicateAccount(tracker.description));
    }

    let message = format!(
        " New bank account tracker has been added to the list: \n{}\n Now you have {} {} listed\n",
        tracker.info(),
        ctx.account.bank_trackers.len() + 1,
        EntryKind::BankTracker.plural()
    );
    ctx.account.bank_trackers.push(tracker);
    ctx.ui.append_to_output(&message);
    Ok(Outcome::undoable(UndoRecord::RemoveLast(
        EntryKind::BankTracker,
    )))
}

pub fn list(ctx: &mut Context<'_>) -> Result<Outcome, MoneyError> {
    ctx.ui.append_to_output(LIST_NOTICE);
    let details = numbered(&ctx.account.bank_trackers);
    ctx.ui.append_to_details(&details);
    Ok(Outcome::unchanged())
}

pub fn check_future_balance(ctx: &mut Context<'_>, name: &str, date: Date) -> Result<Outcome, MoneyError> {
    let tracker = ctx.account.find_tracker(name)?;
    reject_stale_date(tracker, date)?;

    let message = format!(
        "  The future balance in {} :\n    {} at {}\n",
        name,
        format_amount(tracker.predict_amount(date)),
        format_date(date)
    );
    ctx.ui.append_to_output(&message);
    Ok(Outcome::unchanged())
}

/// Move money between cash and a tracked account. Interest is applied up
/// to `date` first, and the movement is recorded as income (deposit) or
/// expenditure (withdrawal).
pub fn transfer(
    ctx: &mut Context<'_>,
    direction: TransferDirection,
    amount: f64,
    name: &str,
    date: Date,
) -> Result<Outcome, MoneyError> {
    let index = ctx.account.tracker_position(name)?;
    let before = ctx.account.bank_trackers[index].clone();
    reject_stale_date(&before, date)?;

    if direction == TransferDirection::Withdraw && before.predict_amount(date) < amount {
        return Err(MoneyError::Rejected(format!(
            "Sorry, FG only allow non-zero balance. Here is the account info: \n{}",
            before.info()
        )));
    }

    let tracker = &mut ctx.account.bank_trackers[index];
    tracker.update_date(date);
    let recorded = match direction {
        TransferDirection::Deposit => {
            tracker.add_amount(amount);
            let income = Income::new(amount, format!("Deposit to {}", tracker.description), date);
            ctx.account.incomes.push(income);
            EntryKind::Income
        }
        TransferDirection::Withdraw => {
            tracker.add_amount(-amount);
            let expenditure = Expenditure::new(
                amount,
                format!("Withdraw from {}", tracker.description),
                WITHDRAW_CATEGORY,
                date,
            );
            ctx.account.expenditures.push(expenditure);
            EntryKind::Expenditure
        }
    };

    let info = ctx.account.bank_trackers[index].info();
    ctx.ui.append_to_output(&format!(
        "  Got it. Here is the current information about this account:\n{}\n",
        info
    ));
    Ok(Outcome::undoable(UndoRecord::RevertTransfer {
        index,
        tracker: before,
        recorded,
    }))
}

pub fn delete(ctx: &mut Context<'_>, name: &str) -> Result<Outcome, MoneyError> {
    let index = ctx.account.tracker_position(name)?;
    let removed = ctx.account.bank_trackers.remove(index);

    ctx.ui.append_to_output(&format!(
        " Noted. I've removed this bank account:\n{}\n Now you have {} {} listed\n",
        removed.info(),
        ctx.account.bank_trackers.len(),
        EntryKind::BankTracker.plural()
    ));
    Ok(Outcome::undoable(UndoRecord::Reinsert {
        index,
        entry: Entry::BankTracker(removed),
    }))
}
