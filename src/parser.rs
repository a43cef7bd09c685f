// src/parser.rs
// Turns one line of user input into a MoneyCommand.

use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;

use crate::{
    commands::{LoanTarget, MoneyCommand, Period, TransferDirection},
    dates::resolve_date,
    domain::{BankTracker, EntryKind, Expenditure, Goal, Income, Instalment, Loan, LoanKind, Split},
    error::MoneyError,
};

const INIT_USAGE: &str = "init [existing savings] [Avg Monthly Expenditure]";
const BANK_ACCOUNT_USAGE: &str = "bank-account <name> /amt <amount> /at <date> /rate <monthly rate>";
const CHECK_BALANCE_USAGE: &str = "check-balance <name> /at <date>";
const TRANSFER_USAGE: &str = "deposit/withdraw <amount> <name> /at <date>";
const GOAL_USAGE: &str = "goal <description> /amt <amount> /by <date> /priority <HIGH/MEDIUM/LOW>";
const COMMIT_GOAL_USAGE: &str = "commit goal <index>[,<index>...]";
const FIND_USAGE: &str = "find#<keyword>";
const INCOME_USAGE: &str = "add income <description> /amt <amount> /payday <date>";
const SPENT_USAGE: &str = "spent <description> /amt <amount> /cat <category> /on <date>";
const SPLIT_USAGE: &str =
    "split <description> /amt <amount> /cat <category> /on <date> /with <name>, <name>";
const SETTLE_USAGE: &str = "settle <expenditure index> <person index>";
const CHECK_INCOME_USAGE: &str = "check income <month> <year>";
const CHECK_EXPENDITURE_USAGE: &str = "check expenditure <month> <year>";
const INSTALMENT_USAGE: &str =
    "add instalment <description> /amt <amount> /within <n> months /from <date> @<rate>%";
const LOAN_USAGE: &str = "lent/borrowed <person> /amt <amount> /on <date>";
const PAID_USAGE: &str = "paid <amount/all> /to <person or index>";
const RECEIVED_USAGE: &str = "received <amount/all> /from <person or index>";

static INSTALMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<desc>.+?)\s*/amt\s*(?P<amt>\S+)\s*/within\s*(?P<months>\d+)\s*months?\s*/from\s*(?P<date>.+?)\s*@\s*(?P<rate>[^%\s]+)\s*%$",
    )
    .expect("instalment pattern is valid")
});

/// Parse `input` into a command. New users may only `start`, `init` or
/// leave; relative dates resolve against `today`.
pub fn parse(input: &str, is_new_user: bool, today: Date) -> Result<MoneyCommand, MoneyError> {
    let cmd = input.trim();

    if cmd == "start" {
        return Ok(MoneyCommand::Start);
    }
    if let Some(rest) = keyword(cmd, "init") {
        if !is_new_user {
            return Err(MoneyError::AlreadyInitialized);
        }
        return parse_init(rest);
    }
    if cmd == "bye" {
        return Ok(MoneyCommand::Exit);
    }
    if is_new_user {
        return Err(MoneyError::NewUser);
    }

    match cmd {
        "list bank trackers" => return Ok(MoneyCommand::ListBankTrackers),
        "list goals" => return Ok(MoneyCommand::ListGoals),
        "list all income" => return Ok(MoneyCommand::ListIncome(Period::All)),
        "list all expenditure" => return Ok(MoneyCommand::ListExpenditure(Period::All)),
        "list month income" => return Ok(MoneyCommand::ListIncome(Period::CurrentMonth)),
        "list month expenditure" => {
            return Ok(MoneyCommand::ListExpenditure(Period::CurrentMonth))
        }
        "list all instalment" | "list all instalments" => {
            return Ok(MoneyCommand::ListInstalments)
        }
        "list all loans" | "list loans" => return Ok(MoneyCommand::ListLoans(None)),
        "list incoming loans" => return Ok(MoneyCommand::ListLoans(Some(LoanKind::Incoming))),
        "list outgoing loans" => return Ok(MoneyCommand::ListLoans(Some(LoanKind::Outgoing))),
        "graph" => return Ok(MoneyCommand::Graph),
        "undo" => return Ok(MoneyCommand::Undo),
        _ => {}
    }

    if let Some(rest) = keyword(cmd, "bank-account") {
        parse_bank_account(rest, today)
    } else if let Some(rest) = keyword(cmd, "check-balance") {
        parse_check_balance(rest, today)
    } else if let Some(rest) = keyword(cmd, "deposit") {
        parse_transfer(TransferDirection::Deposit, rest, today)
    } else if let Some(rest) = keyword(cmd, "withdraw") {
        parse_transfer(TransferDirection::Withdraw, rest, today)
    } else if let Some(rest) = keyword(cmd, "goal") {
        parse_goal(rest, today)
    } else if let Some(rest) = keyword(cmd, "delete goal") {
        parse_index(rest, EntryKind::Goal).map(|index| MoneyCommand::DeleteGoal { index })
    } else if let Some(rest) = keyword(cmd, "commit goal") {
        parse_commit_goal(rest)
    } else if let Some(rest) = keyword(cmd, "done goal") {
        parse_index(rest, EntryKind::Goal).map(|index| MoneyCommand::DoneGoal { index })
    } else if let Some(rest) = cmd.strip_prefix("find#") {
        let keyword = text(rest, FIND_USAGE)?;
        Ok(MoneyCommand::Find { keyword })
    } else if let Some(rest) = keyword(cmd, "add income") {
        parse_income(rest, today)
    } else if let Some(rest) = keyword(cmd, "spent") {
        parse_spent(rest, today)
    } else if let Some(rest) = keyword(cmd, "split") {
        parse_split(rest, today)
    } else if let Some(rest) = keyword(cmd, "settle") {
        parse_settle(rest)
    } else if let Some(rest) = keyword(cmd, "delete income") {
        parse_index(rest, EntryKind::Income).map(|index| MoneyCommand::DeleteIncome { index })
    } else if let Some(rest) = keyword(cmd, "delete expenditure") {
        parse_index(rest, EntryKind::Expenditure)
            .map(|index| MoneyCommand::DeleteExpenditure { index })
    } else if let Some(rest) = keyword(cmd, "delete bank-account") {
        let name = text(rest, "delete bank-account <name>")?;
        Ok(MoneyCommand::DeleteBankAccount { name })
    } else if let Some(rest) = keyword(cmd, "add instalment") {
        parse_instalment(rest, today)
    } else if let Some(rest) = keyword(cmd, "delete instalment") {
        parse_index(rest, EntryKind::Instalment)
            .map(|index| MoneyCommand::DeleteInstalment { index })
    } else if let Some(rest) = keyword(cmd, "check income") {
        parse_month_year(rest, CHECK_INCOME_USAGE).map(MoneyCommand::ListIncome)
    } else if let Some(rest) = keyword(cmd, "check expenditure") {
        parse_month_year(rest, CHECK_EXPENDITURE_USAGE).map(MoneyCommand::ListExpenditure)
    } else if let Some(rest) = keyword(cmd, "lent") {
        parse_loan(LoanKind::Outgoing, rest, today)
    } else if let Some(rest) = keyword(cmd, "borrowed") {
        parse_loan(LoanKind::Incoming, rest, today)
    } else if let Some(rest) = keyword(cmd, "paid") {
        parse_settle_loan(LoanKind::Incoming, rest, "/to", PAID_USAGE)
    } else if let Some(rest) = keyword(cmd, "received") {
        parse_settle_loan(LoanKind::Outgoing, rest, "/from", RECEIVED_USAGE)
    } else if let Some(rest) = keyword(cmd, "delete loan") {
        parse_index(rest, EntryKind::Loan).map(|index| MoneyCommand::DeleteLoan { index })
    } else {
        Err(MoneyError::UnknownCommand(cmd.to_string()))
    }
}

/// The text after `word` when `cmd` is `word` alone or `word` followed by
/// whitespace.
fn keyword<'a>(cmd: &'a str, word: &str) -> Option<&'a str> {
    let rest = cmd.strip_prefix(word)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Split `input` at each marker in turn, returning the trimmed pieces.
fn split_fields<'a>(
    input: &'a str,
    markers: &[&str],
    usage: &'static str,
) -> Result<Vec<&'a str>, MoneyError> {
    let mut fields = Vec::with_capacity(markers.len() + 1);
    let mut rest = input;
    for marker in markers {
        let (head, tail) = rest
            .split_once(marker)
            .ok_or(MoneyError::InvalidFormat(usage))?;
        fields.push(head.trim());
        rest = tail;
    }
    fields.push(rest.trim());
    Ok(fields)
}

fn text(input: &str, usage: &'static str) -> Result<String, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::InvalidFormat(usage));
    }
    if trimmed.contains('@') {
        return Err(MoneyError::ReservedCharacter);
    }
    Ok(trimmed.to_string())
}

fn number(input: &str, usage: &'static str) -> Result<f64, MoneyError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MoneyError::InvalidFormat(usage)),
    }
}

fn positive_amount(input: &str, what: &'static str, usage: &'static str) -> Result<f64, MoneyError> {
    let amount = number(input, usage)?;
    if amount <= 0.0 {
        return Err(MoneyError::NonPositiveAmount(what));
    }
    Ok(amount)
}

fn parse_index(input: &str, kind: EntryKind) -> Result<usize, MoneyError> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| MoneyError::InvalidIndex(kind))
}

fn parse_init(rest: &str) -> Result<MoneyCommand, MoneyError> {
    let values: Vec<&str> = rest.split_whitespace().collect();
    let [savings, avg_monthly_exp] = values.as_slice() else {
        return Err(MoneyError::InvalidFormat(INIT_USAGE));
    };

    let savings = number(savings, INIT_USAGE)?;
    let avg_monthly_exp = number(avg_monthly_exp, INIT_USAGE)?;
    if savings < 0.0 || avg_monthly_exp < 0.0 {
        return Err(MoneyError::Rejected(
            "Savings and expenditure cannot be negative".to_string(),
        ));
    }

    Ok(MoneyCommand::Init {
        savings,
        avg_monthly_exp,
    })
}

fn parse_bank_account(rest: &str, today: Date) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &["/amt", "/at", "/rate"], BANK_ACCOUNT_USAGE)?;
    let name = text(fields[0], BANK_ACCOUNT_USAGE)?;
    let amount = number(fields[1], BANK_ACCOUNT_USAGE)?;
    let date = resolve_date(fields[2], today)?;
    let rate = number(fields[3], BANK_ACCOUNT_USAGE)?;

    if amount < 0.0 || rate < 0.0 {
        return Err(MoneyError::Rejected(
            "The balance and interest rate cannot be negative".to_string(),
        ));
    }

    Ok(MoneyCommand::CreateBankAccount(BankTracker::new(
        name, amount, date, rate,
    )))
}

fn parse_check_balance(rest: &str, today: Date) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &["/at"], CHECK_BALANCE_USAGE)?;
    let name = text(fields[0], CHECK_BALANCE_USAGE)?;
    let date = resolve_date(fields[1], today)?;
    Ok(MoneyCommand::CheckFutureBalance { name, date })
}

fn parse_transfer(
    direction: TransferDirection,
    rest: &str,
    today: Date,
) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &["/at"], TRANSFER_USAGE)?;
    let (amount, name) = fields[0]
        .split_once(char::is_whitespace)
        .ok_or(MoneyError::InvalidFormat(TRANSFER_USAGE))?;

    let amount = positive_amount(amount, "Transfer amount", TRANSFER_USAGE)?;
    let name = text(name, TRANSFER_USAGE)?;
    let date = resolve_date(fields[1], today)?;

    Ok(MoneyCommand::Transfer {
        direction,
        amount,
        name,
        date,
    })
}

fn parse_goal(rest: &str, today: Date) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &["/amt", "/by", "/priority"], GOAL_USAGE)?;
    let description = text(fields[0], GOAL_USAGE)?;
    let price = positive_amount(fields[1], "Goal", GOAL_USAGE)?;
    let by_date = resolve_date(fields[2], today)?;
    let priority = fields[3].parse()?;

    Ok(MoneyCommand::AddGoal(Goal::new(
        price,
        description,
        by_date,
        priority,
    )))
}

fn parse_commit_goal(rest: &str) -> Result<MoneyCommand, MoneyError> {
    let mut indices = Vec::new();
    for token in rest.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let index = token
            .parse::<usize>()
            .map_err(|_| MoneyError::InvalidFormat(COMMIT_GOAL_USAGE))?;
        if !indices.contains(&index) {
            indices.push(index);
        }
    }

    if indices.is_empty() {
        return Err(MoneyError::InvalidFormat(COMMIT_GOAL_USAGE));
    }
    Ok(MoneyCommand::CommitGoal { indices })
}

fn parse_income(rest: &str, today: Date) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &["/amt", "/payday"], INCOME_USAGE)?;
    let description = text(fields[0], INCOME_USAGE)?;
    let price = positive_amount(fields[1], "Income", INCOME_USAGE)?;
    let payday = resolve_date(fields[2], today)?;

    Ok(MoneyCommand::AddIncome(Income::new(
        price,
        description,
        payday,
    )))
}

fn parse_expenditure_fields(
    fields: &[&str],
    usage: &'static str,
    today: Date,
) -> Result<Expenditure, MoneyError> {
    let description = text(fields[0], usage)?;
    let price = positive_amount(fields[1], "Expenditure", usage)?;
    let category = text(fields[2], usage)?;
    let bought_date = resolve_date(fields[3], today)?;
    Ok(Expenditure::new(price, description, category, bought_date))
}

fn parse_spent(rest: &str, today: Date) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &["/amt", "/cat", "/on"], SPENT_USAGE)?;
    let expenditure = parse_expenditure_fields(&fields, SPENT_USAGE, today)?;
    Ok(MoneyCommand::AddExpenditure(expenditure))
}

fn parse_split(rest: &str, today: Date) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &["/amt", "/cat", "/on", "/with"], SPLIT_USAGE)?;
    let expenditure = parse_expenditure_fields(&fields, SPLIT_USAGE, today)?;

    let names = fields[4]
        .split(',')
        .map(|name| text(name, SPLIT_USAGE))
        .collect::<Result<Vec<_>, _>>()?;
    if names.iter().any(|name| name.contains('!')) {
        return Err(MoneyError::Rejected(
            "Names in a split expense cannot contain '!'".to_string(),
        ));
    }

    Ok(MoneyCommand::AddExpenditure(
        expenditure.with_split(Split::new(names)),
    ))
}

fn parse_settle(rest: &str) -> Result<MoneyCommand, MoneyError> {
    let values: Vec<&str> = rest.split_whitespace().collect();
    let [index, party] = values.as_slice() else {
        return Err(MoneyError::InvalidFormat(SETTLE_USAGE));
    };

    Ok(MoneyCommand::SettleSplit {
        index: parse_index(index, EntryKind::Expenditure)?,
        party: party
            .parse()
            .map_err(|_| MoneyError::InvalidFormat(SETTLE_USAGE))?,
    })
}

fn parse_instalment(rest: &str, today: Date) -> Result<MoneyCommand, MoneyError> {
    let captures = INSTALMENT_PATTERN
        .captures(rest)
        .ok_or(MoneyError::InvalidFormat(INSTALMENT_USAGE))?;

    let description = text(&captures["desc"], INSTALMENT_USAGE)?;
    let price = positive_amount(&captures["amt"], "Instalment", INSTALMENT_USAGE)?;
    let months: u32 = captures["months"]
        .parse()
        .map_err(|_| MoneyError::InvalidFormat(INSTALMENT_USAGE))?;
    if months == 0 {
        return Err(MoneyError::Rejected(
            "An instalment must last at least one month".to_string(),
        ));
    }
    let bought_date = resolve_date(&captures["date"], today)?;
    let annual_rate = number(&captures["rate"], INSTALMENT_USAGE)?;
    if annual_rate < 0.0 {
        return Err(MoneyError::Rejected(
            "The interest rate cannot be negative".to_string(),
        ));
    }

    Ok(MoneyCommand::AddInstalment(Instalment::new(
        price,
        description,
        bought_date,
        months,
        annual_rate,
    )))
}

fn parse_month_year(rest: &str, usage: &'static str) -> Result<Period, MoneyError> {
    let values: Vec<&str> = rest.split_whitespace().collect();
    match values.as_slice() {
        [month] => {
            if month.parse::<i8>().is_ok() {
                Err(MoneyError::MissingYear)
            } else {
                Err(MoneyError::InvalidPeriod(usage))
            }
        }
        [month, year] => {
            let month: i8 = month.parse().map_err(|_| MoneyError::InvalidPeriod(usage))?;
            let year: i16 = year.parse().map_err(|_| MoneyError::InvalidPeriod(usage))?;
            if !(1..=12).contains(&month) {
                return Err(MoneyError::InvalidMonth);
            }
            Ok(Period::Month { year, month })
        }
        _ => Err(MoneyError::InvalidPeriod(usage)),
    }
}

fn parse_loan(kind: LoanKind, rest: &str, today: Date) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &["/amt", "/on"], LOAN_USAGE)?;
    let description = text(fields[0], LOAN_USAGE)?;
    let amount = positive_amount(fields[1], "Loan", LOAN_USAGE)?;
    let start_date = resolve_date(fields[2], today)?;

    Ok(MoneyCommand::AddLoan(Loan::new(
        amount,
        description,
        start_date,
        kind,
    )))
}

fn parse_settle_loan(
    kind: LoanKind,
    rest: &str,
    marker: &str,
    usage: &'static str,
) -> Result<MoneyCommand, MoneyError> {
    let fields = split_fields(rest, &[marker], usage)?;

    let amount = if fields[0].eq_ignore_ascii_case("all") {
        None
    } else {
        Some(positive_amount(fields[0], "Repayment", usage)?)
    };

    let target = match fields[1].parse::<usize>() {
        Ok(index) => LoanTarget::Index(index),
        Err(_) => LoanTarget::Name(text(fields[1], usage)?),
    };

    Ok(MoneyCommand::SettleLoan {
        kind,
        amount,
        target,
    })
}
