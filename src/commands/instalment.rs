use crate::{
    domain::{format_amount, Entry, EntryKind, Instalment},
    error::MoneyError,
    undo::UndoRecord,
};

use super::{added_message, checked_position, removed_message, Context, Outcome, LIST_NOTICE};

pub fn add(ctx: &mut Context<'_>, instalment: Instalment) -> Result<Outcome, MoneyError> {
    let message = added_message(
        EntryKind::Instalment,
        &instalment,
        ctx.account.instalments.len() + 1,
    );
    ctx.account.instalments.push(instalment);
    ctx.ui.append_to_output(&message);
    Ok(Outcome::undoable(UndoRecord::RemoveLast(
        EntryKind::Instalment,
    )))
}

pub fn delete(ctx: &mut Context<'_>, index: usize) -> Result<Outcome, MoneyError> {
    let pos = checked_position(index, ctx.account.instalments.len(), EntryKind::Instalment)?;
    let removed = ctx.account.instalments.remove(pos);

    ctx.ui.append_to_output(&removed_message(
        EntryKind::Instalment,
        &removed,
        ctx.account.instalments.len(),
    ));
    Ok(Outcome::undoable(UndoRecord::Reinsert {
        index: pos,
        entry: Entry::Instalment(removed),
    }))
}

/// Each instalment with its payment progress as of today.
pub fn list(ctx: &mut Context<'_>) -> Result<Outcome, MoneyError> {
    let today = ctx.today;
    let details: String = ctx
        .account
        .instalments
        .iter()
        .enumerate()
        .map(|(i, ins)| {
            format!(
                " {}.{}\n    Paid {}/{} months ({:.0}%), total payable {}\n",
                i + 1,
                ins,
                ins.payments_made(today),
                ins.months,
                ins.percentage_paid(today),
                format_amount(ins.total_payable())
            )
        })
        .collect();

    ctx.ui.append_to_output(LIST_NOTICE);
    ctx.ui.append_to_details(&details);
    Ok(Outcome::unchanged())
}
