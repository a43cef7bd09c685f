use crate::{
    dates::month_name,
    domain::{format_amount, Entry, EntryKind, Expenditure, Income},
    error::MoneyError,
    undo::UndoRecord,
};

use super::{
    added_message, checked_position, numbered, removed_message, Context, Outcome, Period,
    LIST_NOTICE,
};

pub fn add_income(ctx: &mut Context<'_>, income: Income) -> Result<Outcome, MoneyError> {
    let message = added_message(EntryKind::Income, &income, ctx.account.incomes.len() + 1);
    ctx.account.incomes.push(income);
    ctx.ui.append_to_output(&message);
    Ok(Outcome::undoable(UndoRecord::RemoveLast(EntryKind::Income)))
}

pub fn add_expenditure(
    ctx: &mut Context<'_>,
    expenditure: Expenditure,
) -> Result<Outcome, MoneyError> {
    let message = added_message(
        EntryKind::Expenditure,
        &expenditure,
        ctx.account.expenditures.len() + 1,
    );
    ctx.account.expenditures.push(expenditure);
    ctx.ui.append_to_output(&message);
    Ok(Outcome::undoable(UndoRecord::RemoveLast(
        EntryKind::Expenditure,
    )))
}

/// Mark one party of a split expenditure as paid. Both indices are 1-based.
pub fn settle_split(ctx: &mut Context<'_>, index: usize, party: usize) -> Result<Outcome, MoneyError> {
    let pos = checked_position(index, ctx.account.expenditures.len(), EntryKind::Expenditure)?;
    let before = ctx.account.expenditures[pos].clone();

    let expenditure = &mut ctx.account.expenditures[pos];
    let price = expenditure.price;
    let split = expenditure.split.as_mut().ok_or_else(|| {
        MoneyError::Rejected("This expenditure is not split with anyone".to_string())
    })?;
    let party_pos = party.checked_sub(1).ok_or_else(|| {
        MoneyError::Rejected("There is no such person in this split expense".to_string())
    })?;
    let name = split.settle(party_pos)?.name.clone();
    let share = split.each_owe(price);

    ctx.ui.append_to_output(&format!(
        " Noted. {} has paid {} for:\n  {}\n",
        name,
        format_amount(share),
        expenditure
    ));
    Ok(Outcome::undoable(UndoRecord::Replace {
        index: pos,
        entry: Entry::Expenditure(before),
    }))
}

fn period_footer(kind: &str, period: Period, total: f64) -> String {
    match period {
        Period::All => format!("Total {} so far: {}\n", kind, format_amount(total)),
        Period::CurrentMonth => format!("Total {} this month: {}\n", kind, format_amount(total)),
        Period::Month { year, month } => format!(
            "Total {} for {} of {} : {}\n",
            kind,
            month_name(month),
            year,
            format_amount(total)
        ),
    }
}

/// Resolve the current month against today.
fn concrete_month(ctx: &Context<'_>, period: Period) -> Option<(i16, i8)> {
    match period {
        Period::All => None,
        Period::CurrentMonth => Some((ctx.today.year(), ctx.today.month())),
        Period::Month { year, month } => Some((year, month)),
    }
}

pub fn list_income(ctx: &mut Context<'_>, period: Period) -> Result<Outcome, MoneyError> {
    let (items, total) = match concrete_month(ctx, period) {
        None => (
            ctx.account.incomes.iter().collect::<Vec<_>>(),
            ctx.account.total_income(),
        ),
        Some((year, month)) => (
            ctx.account.incomes_in_month(year, month),
            ctx.account.month_income(year, month),
        ),
    };

    let details = numbered(&items) + &period_footer("income", period, total);
    ctx.ui.append_to_output(LIST_NOTICE);
    ctx.ui.append_to_details(&details);
    Ok(Outcome::unchanged())
}

pub fn list_expenditure(ctx: &mut Context<'_>, period: Period) -> Result<Outcome, MoneyError> {
    let (items, total) = match concrete_month(ctx, period) {
        None => (
            ctx.account.expenditures.iter().collect::<Vec<_>>(),
            ctx.account.total_expenditure(),
        ),
        Some((year, month)) => (
            ctx.account.expenditures_in_month(year, month),
            ctx.account.month_expenditure(year, month),
        ),
    };

    let details = numbered(&items) + &period_footer("expenditure", period, total);
    ctx.ui.append_to_output(LIST_NOTICE);
    ctx.ui.append_to_details(&details);
    Ok(Outcome::unchanged())
}

pub fn delete_income(ctx: &mut Context<'_>, index: usize) -> Result<Outcome, MoneyError> {
    let pos = checked_position(index, ctx.account.incomes.len(), EntryKind::Income)?;
    let removed = ctx.account.incomes.remove(pos);

    ctx.ui.append_to_output(&removed_message(
        EntryKind::Income,
        &removed,
        ctx.account.incomes.len(),
    ));
    Ok(Outcome::undoable(UndoRecord::Reinsert {
        index: pos,
        entry: Entry::Income(removed),
    }))
}

pub fn delete_expenditure(ctx: &mut Context<'_>, index: usize) -> Result<Outcome, MoneyError> {
    let pos = checked_position(index, ctx.account.expenditures.len(), EntryKind::Expenditure)?;
    let removed = ctx.account.expenditures.remove(pos);

    ctx.ui.append_to_output(&removed_message(
        EntryKind::Expenditure,
        &removed,
        ctx.account.expenditures.len(),
    ));
    Ok(Outcome::undoable(UndoRecord::Reinsert {
        index: pos,
        entry: Entry::Expenditure(removed),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::testing::run,
        domain::{Account, Split},
        undo::History,
    };
    use jiff::civil::date;
    use pretty_assertions::assert_eq;

    fn account_with_expenses() -> Account {
        let mut account = Account::new();
        account.to_initialize = false;
        account.expenditures.push(Expenditure::new(
            120.0,
            "A Jays 5",
            "present",
            date(1997, 10, 9),
        ));
        account.expenditures.push(Expenditure::new(
            94.0,
            "HHN VIP Tickets",
            "gift",
            date(2015, 9, 4),
        ));
        account
    }

    #[test]
    fn test_add_income_reports_count() {
        let mut account = Account::new();
        let income = Income::new(5000.0, "salary", date(2019, 10, 1));
        let (result, ui) = run(&mut account, &mut History::default(), |ctx| {
            add_income(ctx, income)
        });

        assert_eq!(
            result.unwrap().undo,
            Some(UndoRecord::RemoveLast(EntryKind::Income))
        );
        assert_eq!(
            ui.output(),
            " Got it. I've added this income:\n  [I]$5000.00 salary(on: 1/10/2019)\n Now you have 1 income entries listed\n"
        );
    }

    #[test]
    fn test_check_past_month() {
        let mut account = account_with_expenses();
        let (_, ui) = run(&mut account, &mut History::default(), |ctx| {
            list_expenditure(
                ctx,
                Period::Month {
                    year: 1997,
                    month: 10,
                },
            )
        });

        assert_eq!(
            ui.details(),
            " 1.[E]$120.00 A Jays 5(on: 9/10/1997)\nTotal expenditure for October of 1997 : $120.00\n"
        );
        assert_eq!(ui.output(), LIST_NOTICE);
    }

    #[test]
    fn test_list_all_expenditure() {
        let mut account = account_with_expenses();
        let (_, ui) = run(&mut account, &mut History::default(), |ctx| {
            list_expenditure(ctx, Period::All)
        });
        assert!(ui.details().ends_with("Total expenditure so far: $214.00\n"));
    }

    #[test]
    fn test_delete_out_of_bounds() {
        let mut account = account_with_expenses();
        let (result, _) = run(&mut account, &mut History::default(), |ctx| {
            delete_expenditure(ctx, 3)
        });
        assert_eq!(
            result.unwrap_err().to_string(),
            "The serial number of the Expenditure is Out Of Bounds!"
        );
        assert_eq!(account.expenditures.len(), 2);
    }

    #[test]
    fn test_delete_keeps_position_for_undo() {
        let mut account = account_with_expenses();
        let (result, ui) = run(&mut account, &mut History::default(), |ctx| {
            delete_expenditure(ctx, 1)
        });

        let undo = result.unwrap().undo.unwrap();
        assert!(matches!(undo, UndoRecord::Reinsert { index: 0, .. }));
        assert!(ui.output().starts_with(" Noted. I've removed this expenditure:"));

        undo.revert(&mut account).unwrap();
        assert_eq!(account.expenditures[0].description, "A Jays 5");
    }

    #[test]
    fn test_settle_split() {
        let mut account = Account::new();
        account.expenditures.push(
            Expenditure::new(90.0, "dinner", "food", date(2020, 1, 1))
                .with_split(Split::new(["amy", "bob"])),
        );

        let (result, ui) = run(&mut account, &mut History::default(), |ctx| {
            settle_split(ctx, 1, 2)
        });
        assert!(result.unwrap().undo.is_some());
        assert!(ui.output().starts_with(" Noted. bob has paid $30.00 for:"));
        assert!(ui.output().contains("[Outstanding $30.00]"));

        let (result, _) = run(&mut account, &mut History::default(), |ctx| {
            settle_split(ctx, 1, 2)
        });
        assert_eq!(
            result.unwrap_err().to_string(),
            "bob has already paid for this expense"
        );
    }

    #[test]
    fn test_settle_unsplit_expenditure() {
        let mut account = account_with_expenses();
        let (result, _) = run(&mut account, &mut History::default(), |ctx| {
            settle_split(ctx, 1, 1)
        });
        assert_eq!(
            result.unwrap_err().to_string(),
            "This expenditure is not split with anyone"
        );
    }
}
