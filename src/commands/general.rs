use crate::{
    dates::month_name,
    domain::{format_amount, Entry, EntryKind},
    error::MoneyError,
    ui::MessageType,
};

use super::{numbered, Context, Outcome};

const BAR_WIDTH: f64 = 20.0;
const GRAPH_NOTICE: &str = "Got it, graph will be printed in the other pane!\n";

pub fn start(ctx: &mut Context<'_>) -> Result<Outcome, MoneyError> {
    let greeting = ctx.ui.show_welcome();
    ctx.ui.append_to_output(&greeting);

    if ctx.account.to_initialize {
        ctx.ui.append_to_output(
            " You are a new user. Please type: init [existing savings] [Avg Monthly Expenditure]\n",
        );
        return Ok(Outcome::unchanged());
    }

    let (year, month) = (ctx.today.year(), ctx.today.month());
    ctx.ui.append_to_output(&format!(
        " Welcome back!\n Total savings: {}\n Goal savings: {}\n Savings for {} {}: {}\n",
        format_amount(ctx.account.total_savings()),
        format_amount(ctx.account.goal_savings()),
        month_name(month),
        year,
        format_amount(ctx.account.month_savings(year, month)),
    ));
    Ok(Outcome::unchanged())
}

pub fn init(ctx: &mut Context<'_>, savings: f64, avg_monthly_exp: f64) -> Result<Outcome, MoneyError> {
    ctx.account.initialize(savings, avg_monthly_exp, ctx.today);

    let message = ctx.ui.renderer().render(
        MessageType::Success,
        "Got it! Your account has been set up.",
    );
    ctx.ui.append_to_output(&format!(
        "{}\n Base savings: {}\n Goal savings: {}\n",
        message,
        format_amount(ctx.account.base_savings),
        format_amount(ctx.account.goal_savings()),
    ));
    Ok(Outcome::permanent())
}

pub fn exit(ctx: &mut Context<'_>) -> Result<Outcome, MoneyError> {
    let goodbye = ctx.ui.show_goodbye();
    ctx.ui.append_to_output(&goodbye);
    Ok(Outcome::exit())
}

/// Case-insensitive search over descriptions and categories of every list.
pub fn find(ctx: &mut Context<'_>, keyword: &str) -> Result<Outcome, MoneyError> {
    let needle = keyword.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);
    let account = &*ctx.account;

    let sections: [(EntryKind, Vec<String>); 6] = [
        (
            EntryKind::Income,
            account
                .incomes
                .iter()
                .filter(|i| hit(&i.description))
                .map(ToString::to_string)
                .collect(),
        ),
        (
            EntryKind::Expenditure,
            account
                .expenditures
                .iter()
                .filter(|e| hit(&e.description) || hit(&e.category))
                .map(ToString::to_string)
                .collect(),
        ),
        (
            EntryKind::Goal,
            account
                .goals
                .iter()
                .filter(|g| hit(&g.description))
                .map(ToString::to_string)
                .collect(),
        ),
        (
            EntryKind::Instalment,
            account
                .instalments
                .iter()
                .filter(|i| hit(&i.description))
                .map(ToString::to_string)
                .collect(),
        ),
        (
            EntryKind::Loan,
            account
                .loans
                .iter()
                .filter(|l| hit(&l.description))
                .map(ToString::to_string)
                .collect(),
        ),
        (
            EntryKind::BankTracker,
            account
                .bank_trackers
                .iter()
                .filter(|b| hit(&b.description))
                .map(ToString::to_string)
                .collect(),
        ),
    ];

    let mut details = String::new();
    for (kind, found) in sections.iter().filter(|(_, found)| !found.is_empty()) {
        details.push_str(&format!("Matching {}:\n", kind.plural()));
        details.push_str(&numbered(found));
    }

    if details.is_empty() {
        ctx.ui
            .append_to_output(&format!(" No entries match \"{}\"\n", keyword));
    } else {
        ctx.ui.append_to_output(super::LIST_NOTICE);
        ctx.ui.append_to_details(&details);
    }
    Ok(Outcome::unchanged())
}

/// Monthly income and expenditure of the current year as text bars.
pub fn graph(ctx: &mut Context<'_>) -> Result<Outcome, MoneyError> {
    let year = ctx.today.year();
    let totals: Vec<(i8, f64, f64)> = (1..=12)
        .map(|month| {
            (
                month,
                ctx.account.month_income(year, month),
                ctx.account.month_expenditure(year, month),
            )
        })
        .collect();

    let largest = totals
        .iter()
        .flat_map(|&(_, income, expenditure)| [income, expenditure])
        .fold(0.0_f64, f64::max);

    let bar = |amount: f64| -> String {
        if largest <= 0.0 {
            return String::new();
        }
        let width = (amount / largest * BAR_WIDTH).round().max(0.0) as usize;
        "█".repeat(width)
    };

    let mut chart = format!("Income and expenditure for {}\n", year);
    for (month, income, expenditure) in totals {
        let name = &month_name(month)[..3];
        chart.push_str(&format!(
            "{} I |{} {}\n    E |{} {}\n",
            name,
            bar(income),
            format_amount(income),
            bar(expenditure),
            format_amount(expenditure),
        ));
    }

    ctx.ui.append_to_output(GRAPH_NOTICE);
    ctx.ui.append_to_details(&chart);
    Ok(Outcome::unchanged())
}

pub fn undo(ctx: &mut Context<'_>) -> Result<Outcome, MoneyError> {
    let record = ctx.history.take()?;
    let reverted = match record.clone().revert(ctx.account) {
        Ok(reverted) => reverted,
        Err(err) => {
            ctx.history.record(Some(record));
            return Err(err);
        }
    };

    let summary = match &reverted.entry {
        Entry::BankTracker(tracker) => tracker.info(),
        entry => entry.to_string(),
    };
    ctx.ui.append_to_output(&format!(
        " Last command undone: \n{}\n Now you have {} {} listed\n",
        summary,
        reverted.remaining,
        reverted.kind.plural()
    ));
    Ok(Outcome::permanent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::testing::run,
        domain::{Account, Expenditure, Income},
        undo::{History, UndoRecord},
    };
    use jiff::civil::date;

    #[test]
    fn test_start_for_new_user() {
        let mut account = Account::new();
        let (result, ui) = run(&mut account, &mut History::default(), start);
        assert!(!result.unwrap().changed);
        assert!(ui.output().contains("You are a new user"));
    }

    #[test]
    fn test_init_sets_base_savings() {
        let mut account = Account::new();
        let (result, ui) = run(&mut account, &mut History::default(), |ctx| {
            init(ctx, 10_000.0, 1000.0)
        });

        let outcome = result.unwrap();
        assert!(outcome.changed);
        assert!(outcome.undo.is_none());
        assert!(ui.output().contains("Base savings: $6000.00"));
        assert!(ui.output().contains("Goal savings: $4000.00"));
    }

    #[test]
    fn test_exit() {
        let mut account = Account::new();
        let (result, ui) = run(&mut account, &mut History::default(), exit);
        assert!(result.unwrap().exit);
        assert!(ui.output().contains("Bye. Hope to see you again soon!"));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let mut account = Account::new();
        account
            .incomes
            .push(Income::new(100.0, "Salary", date(2020, 3, 1)));
        account
            .expenditures
            .push(Expenditure::new(5.0, "rice", "SALARY stuff", date(2020, 3, 1)));
        account
            .expenditures
            .push(Expenditure::new(5.0, "noodles", "food", date(2020, 3, 1)));

        let (_, ui) = run(&mut account, &mut History::default(), |ctx| {
            find(ctx, "salary")
        });
        assert_eq!(
            ui.details(),
            "Matching income entries:\n 1.[I]$100.00 Salary(on: 1/3/2020)\n\
             Matching expenses:\n 1.[E]$5.00 rice(on: 1/3/2020)\n"
        );

        let (_, ui) = run(&mut account, &mut History::default(), |ctx| find(ctx, "zzz"));
        assert_eq!(ui.output(), " No entries match \"zzz\"\n");
    }

    #[test]
    fn test_graph_scales_bars() {
        let mut account = Account::new();
        account
            .incomes
            .push(Income::new(200.0, "pay", date(2020, 1, 5)));
        account
            .expenditures
            .push(Expenditure::new(100.0, "food", "food", date(2020, 1, 6)));

        let (_, ui) = run(&mut account, &mut History::default(), graph);
        let january = format!(
            "Jan I |{} $200.00\n    E |{} $100.00\n",
            "█".repeat(20),
            "█".repeat(10)
        );
        assert!(ui.details().contains(&january));
        assert!(ui.details().contains("Dec I | $0.00\n"));
    }

    #[test]
    fn test_undo_reports_and_empties_history() {
        let mut account = Account::new();
        account
            .incomes
            .push(Income::new(100.0, "pay", date(2020, 3, 1)));
        let mut history = History::default();
        history.record(Some(UndoRecord::RemoveLast(EntryKind::Income)));

        let (result, ui) = run(&mut account, &mut history, undo);
        assert!(result.unwrap().changed);
        assert_eq!(
            ui.output(),
            " Last command undone: \n[I]$100.00 pay(on: 1/3/2020)\n Now you have 0 income entries listed\n"
        );

        let (result, _) = run(&mut account, &mut history, undo);
        assert!(matches!(result, Err(MoneyError::NothingToUndo)));
    }

    #[test]
    fn test_failed_undo_keeps_record() {
        let mut account = Account::new();
        let mut history = History::default();
        history.record(Some(UndoRecord::RemoveLast(EntryKind::Income)));

        let (result, _) = run(&mut account, &mut history, undo);
        assert!(result.is_err());
        assert_eq!(
            history,
            History::Undoable(UndoRecord::RemoveLast(EntryKind::Income))
        );
    }
}
