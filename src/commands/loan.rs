use crate::{
    domain::{format_amount, Entry, EntryKind, Loan, LoanKind},
    error::MoneyError,
    undo::UndoRecord,
};

use super::{checked_position, numbered, Context, LoanTarget, Outcome, LIST_NOTICE};

pub fn add(ctx: &mut Context<'_>, loan: Loan) -> Result<Outcome, MoneyError> {
    let kind = loan.kind;
    let message = format!(
        " Got it. I've added this {} loan: \n     {}\n",
        kind, loan
    );
    ctx.account.loans.push(loan);

    ctx.ui.append_to_output(&message);
    ctx.ui.append_to_output(&format!(
        " Now you have {} loans listed and {} {} loans\n",
        ctx.account.loans.len(),
        ctx.account.loans_of_kind(kind).len(),
        kind
    ));
    Ok(Outcome::undoable(UndoRecord::RemoveLast(EntryKind::Loan)))
}

pub fn list(ctx: &mut Context<'_>, kind: Option<LoanKind>) -> Result<Outcome, MoneyError> {
    let details = match kind {
        None => numbered(&ctx.account.loans),
        Some(kind) => numbered(&ctx.account.loans_of_kind(kind)),
    };
    ctx.ui.append_to_output(LIST_NOTICE);
    ctx.ui.append_to_details(&details);
    Ok(Outcome::unchanged())
}

/// Position in the full loan list of the loan a settle command names.
fn resolve_target(loans: &[Loan], kind: LoanKind, target: &LoanTarget) -> Result<usize, MoneyError> {
    let mut of_kind = loans
        .iter()
        .enumerate()
        .filter(|(_, loan)| loan.kind == kind);

    match target {
        LoanTarget::Index(index) => {
            let count = loans.iter().filter(|loan| loan.kind == kind).count();
            let pos = checked_position(*index, count, EntryKind::Loan)?;
            of_kind
                .nth(pos)
                .map(|(i, _)| i)
                .ok_or(MoneyError::OutOfBounds(EntryKind::Loan))
        }
        LoanTarget::Name(name) => of_kind
            .filter(|(_, loan)| !loan.is_settled())
            .find(|(_, loan)| loan.description.eq_ignore_ascii_case(name))
            .map(|(i, _)| i)
            .ok_or_else(|| {
                MoneyError::Rejected(format!("There is no {} loan with {}", kind, name))
            }),
    }
}

/// Record a repayment. `None` repays everything outstanding.
pub fn settle(
    ctx: &mut Context<'_>,
    kind: LoanKind,
    amount: Option<f64>,
    target: LoanTarget,
) -> Result<Outcome, MoneyError> {
    let index = resolve_target(&ctx.account.loans, kind, &target)?;
    let before = ctx.account.loans[index].clone();

    let loan = &mut ctx.account.loans[index];
    let repaid = loan.settle(amount, ctx.today)?;
    let verb = match kind {
        LoanKind::Incoming => "paid",
        LoanKind::Outgoing => "received",
    };

    let message = format!(
        " Got it. You have {} {} for this loan:\n  {}\n",
        verb,
        format_amount(repaid),
        loan
    );
    ctx.ui.append_to_output(&message);
    Ok(Outcome::undoable(UndoRecord::Replace {
        index,
        entry: Entry::Loan(before),
    }))
}

pub fn delete(ctx: &mut Context<'_>, index: usize) -> Result<Outcome, MoneyError> {
    let pos = checked_position(index, ctx.account.loans.len(), EntryKind::Loan)?;
    let removed = ctx.account.loans.remove(pos);

    ctx.ui.append_to_output(&format!(
        " Noted. I've removed this {} loan:\n  {}\n Now you have {} total loans.\n",
        removed.kind,
        removed,
        ctx.account.loans.len()
    ));
    Ok(Outcome::undoable(UndoRecord::Reinsert {
        index: pos,
        entry: Entry::Loan(removed),
    }))
}
