use crate::{
    domain::{format_amount, Entry, EntryKind, Expenditure, Goal},
    error::MoneyError,
    ui::MessageType,
    undo::UndoRecord,
};

use super::{added_message, checked_position, numbered, removed_message, Context, Outcome, LIST_NOTICE};

pub fn add(ctx: &mut Context<'_>, goal: Goal) -> Result<Outcome, MoneyError> {
    let message = added_message(EntryKind::Goal, &goal, ctx.account.goals.len() + 1);
    ctx.account.goals.push(goal);
    ctx.ui.append_to_output(&message);
    Ok(Outcome::undoable(UndoRecord::RemoveLast(EntryKind::Goal)))
}

fn goal_listing(ctx: &Context<'_>) -> String {
    format!(
        "{}Goal Savings: {}\n",
        numbered(&ctx.account.goals),
        format_amount(ctx.account.goal_savings())
    )
}

pub fn list(ctx: &mut Context<'_>) -> Result<Outcome, MoneyError> {
    let details = goal_listing(ctx);
    ctx.ui.append_to_output(LIST_NOTICE);
    ctx.ui.append_to_details(&details);
    Ok(Outcome::unchanged())
}

pub fn delete(ctx: &mut Context<'_>, index: usize) -> Result<Outcome, MoneyError> {
    let pos = checked_position(index, ctx.account.goals.len(), EntryKind::Goal)?;
    let removed = ctx.account.goals.remove(pos);

    ctx.ui.append_to_output(&removed_message(
        EntryKind::Goal,
        &removed,
        ctx.account.goals.len(),
    ));
    Ok(Outcome::undoable(UndoRecord::Reinsert {
        index: pos,
        entry: Entry::Goal(removed),
    }))
}

/// Show what goal savings would be left after paying for the given goals.
/// Nothing is changed.
pub fn commit(ctx: &mut Context<'_>, indices: &[usize]) -> Result<Outcome, MoneyError> {
    let len = ctx.account.goals.len();
    let positions = indices
        .iter()
        .map(|&index| checked_position(index, len, EntryKind::Goal))
        .collect::<Result<Vec<_>, _>>()?;

    let mut details = String::from(" Goals to commit:\n");
    let mut total = 0.0;
    for pos in positions {
        let goal = &ctx.account.goals[pos];
        total += goal.price;
        details.push_str(&format!(" {}.{}\n", pos + 1, goal));
    }

    let remaining = ctx.account.goal_savings() - total;
    details.push_str(&format!(
        "Total cost: {}\nGoal Savings after commit: {}\n",
        format_amount(total),
        format_amount(remaining)
    ));

    ctx.ui.append_to_output(LIST_NOTICE);
    if remaining < 0.0 {
        let warning = ctx
            .ui
            .show_warning("Your goal savings are not enough to commit these goals");
        ctx.ui.append_to_output(&warning);
    }
    ctx.ui.append_to_details(&details);
    Ok(Outcome::unchanged())
}

/// Pay for a goal out of goal savings: it becomes an expenditure dated today.
pub fn done(ctx: &mut Context<'_>, index: usize) -> Result<Outcome, MoneyError> {
    let pos = checked_position(index, ctx.account.goals.len(), EntryKind::Goal)?;
    if ctx.account.goal_savings() < ctx.account.goals[pos].price {
        return Err(MoneyError::Rejected(
            "Goal Price exceeds Goal Savings".to_string(),
        ));
    }

    let goal = ctx.account.goals.remove(pos);
    ctx.account.expenditures.push(Expenditure::new(
        goal.price,
        goal.description.clone(),
        goal.category.clone(),
        ctx.today,
    ));

    let done = ctx
        .ui
        .renderer()
        .render(MessageType::Success, "Nice! This Goal is Completed:");
    ctx.ui.append_to_output(&format!(
        "{}\n  {}\n Now you have {} goals in the list.\n",
        done,
        goal,
        ctx.account.goals.len()
    ));
    let details = goal_listing(ctx);
    ctx.ui.append_to_details(&details);
    Ok(Outcome::undoable(UndoRecord::ReopenGoal { index: pos, goal }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::testing::{run, today},
        domain::{goal::GOAL_CATEGORY, Account, Income, Priority},
        undo::History,
    };
    use jiff::civil::date;
    use pretty_assertions::assert_eq;

    fn account_with_goals() -> Account {
        let mut account = Account::new();
        account.initialize(1000.0, 100.0, today());
        account
            .goals
            .push(Goal::new(300.0, "shoes", date(2020, 6, 1), Priority::Low));
        account
            .goals
            .push(Goal::new(600.0, "phone", date(2020, 8, 1), Priority::High));
        account
    }

    #[test]
    fn test_list_shows_goal_savings() {
        let mut account = account_with_goals();
        let (_, ui) = run(&mut account, &mut History::default(), list);
        assert_eq!(
            ui.details(),
            concat!(
                " 1.[G]$300.00 shoes (to achieve by: 1/6/2020) [LOW]\n",
                " 2.[G]$600.00 phone (to achieve by: 1/8/2020) [HIGH]\n",
                "Goal Savings: $400.00\n",
            )
        );
    }

    #[test]
    fn test_commit_does_not_change_account() {
        let mut account = account_with_goals();
        let before = account.clone();
        let (result, ui) = run(&mut account, &mut History::default(), |ctx| {
            commit(ctx, &[1, 2])
        });

        assert!(!result.unwrap().changed);
        assert_eq!(account, before);
        assert!(ui.details().contains("Total cost: $900.00"));
        assert!(ui.details().contains("Goal Savings after commit: $-500.00"));
        assert!(ui.output().contains("not enough"));
    }

    #[test]
    fn test_commit_rejects_bad_index() {
        let mut account = account_with_goals();
        let (result, _) = run(&mut account, &mut History::default(), |ctx| {
            commit(ctx, &[1, 5])
        });
        assert!(matches!(
            result,
            Err(MoneyError::OutOfBounds(EntryKind::Goal))
        ));
    }

    #[test]
    fn test_done_needs_goal_savings() {
        let mut account = account_with_goals();
        let (result, _) = run(&mut account, &mut History::default(), |ctx| done(ctx, 2));
        assert_eq!(result.unwrap_err().to_string(), "Goal Price exceeds Goal Savings");
        assert_eq!(account.goals.len(), 2);
    }

    #[test]
    fn test_done_moves_goal_to_expenditure() {
        let mut account = account_with_goals();
        account
            .incomes
            .push(Income::new(1000.0, "bonus", date(2020, 3, 1)));

        let (result, ui) = run(&mut account, &mut History::default(), |ctx| done(ctx, 2));
        let undo = result.unwrap().undo.unwrap();

        assert_eq!(account.goals.len(), 1);
        let spent = &account.expenditures[0];
        assert_eq!(spent.description, "phone");
        assert_eq!(spent.category, GOAL_CATEGORY);
        assert_eq!(spent.bought_date, today());
        assert!(ui.output().contains("Now you have 1 goals in the list."));
        assert!(ui.details().starts_with(" 1.[G]$300.00 shoes"));
        assert!(ui.details().contains("Goal Savings: $"));
        assert!(!ui.details().contains("phone"));

        undo.revert(&mut account).unwrap();
        assert_eq!(account.goals[1].description, "phone");
        assert!(account.expenditures.is_empty());
    }
}
