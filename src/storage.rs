// src/storage.rs
// Reads and writes the whole Account as a line-per-entry text file with
// ` @ `-separated fields.

use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::{
    dates::{format_date, parse_date},
    domain::{
        Account, BankTracker, Expenditure, Goal, Income, Instalment, Loan, LoanKind, Party, Split,
    },
    filesystem::{FileSystem, FileSystemError},
};

const SEPARATOR: &str = " @ ";
const PARTY_SEPARATOR: &str = " ! ";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("Malformed line {line} in account file: {reason}")]
    Malformed { line: usize, reason: String },
}

pub struct MoneyStorage<F: FileSystem> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> MoneyStorage<F> {
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the account. A missing file means a new user.
    pub fn load(&self) -> Result<Account, StorageError> {
        if !self.fs.path_exists(&self.path) {
            info!(
                "No account file at {}, starting a new account",
                self.path.display()
            );
            return Ok(Account::new());
        }

        let contents = self.fs.read_file(&self.path)?;
        let account = decode(&contents)?;
        debug!(
            "Loaded {} entries from {}",
            account.entry_count(),
            self.path.display()
        );
        Ok(account)
    }

    /// Write the whole account, replacing the previous file.
    pub fn save(&self, account: &Account) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !self.fs.path_exists(parent) {
                self.fs.create_dir_all(parent)?;
            }
        }

        self.fs.write_file(&self.path, &encode(account))?;
        debug!(
            "Saved {} entries to {}",
            account.entry_count(),
            self.path.display()
        );
        Ok(())
    }
}

/// Serialize every list of the account, one entry per line.
pub fn encode(account: &Account) -> String {
    let mut lines = vec![join(&[
        "INIT".to_string(),
        account.to_initialize.to_string(),
        account.base_savings.to_string(),
    ])];

    for i in &account.incomes {
        lines.push(join(&[
            "INC".to_string(),
            i.price.to_string(),
            i.description.clone(),
            format_date(i.payday),
        ]));
    }

    for e in &account.expenditures {
        let mut fields = vec![
            if e.split.is_some() { "SEX" } else { "EXP" }.to_string(),
            e.price.to_string(),
            e.description.clone(),
            e.category.clone(),
            format_date(e.bought_date),
        ];
        if let Some(split) = &e.split {
            fields.push(
                split
                    .parties()
                    .iter()
                    .map(|p| format!("{}#{}", p.name, u8::from(p.paid)))
                    .collect::<Vec<_>>()
                    .join(PARTY_SEPARATOR),
            );
        }
        lines.push(join(&fields));
    }

    for g in &account.goals {
        lines.push(join(&[
            "G".to_string(),
            g.price.to_string(),
            g.description.clone(),
            g.category.clone(),
            format_date(g.by_date),
            g.priority.to_string(),
        ]));
    }

    for ins in &account.instalments {
        lines.push(join(&[
            "INS".to_string(),
            ins.price.to_string(),
            ins.description.clone(),
            ins.category.clone(),
            format_date(ins.bought_date),
            ins.months.to_string(),
            ins.annual_rate.to_string(),
        ]));
    }

    for l in &account.loans {
        lines.push(join(&[
            "LOA".to_string(),
            l.amount.to_string(),
            l.description.clone(),
            format_date(l.start_date),
            l.kind.as_str().to_uppercase(),
            l.outstanding.to_string(),
            l.end_date.map(format_date).unwrap_or_else(|| "-".to_string()),
        ]));
    }

    for b in &account.bank_trackers {
        lines.push(join(&[
            "BAN".to_string(),
            b.description.clone(),
            b.amount.to_string(),
            format_date(b.latest_date),
            b.rate.to_string(),
        ]));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn join(fields: &[String]) -> String {
    fields.join(SEPARATOR)
}

/// Parse an account file. Blank lines are skipped; any other line that
/// cannot be read fails the whole load.
pub fn decode(contents: &str) -> Result<Account, StorageError> {
    let mut account = Account::new();

    for (number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        decode_line(&mut account, line).map_err(|reason| StorageError::Malformed {
            line: number + 1,
            reason,
        })?;
    }

    Ok(account)
}

/// Fields of one line, already split and trimmed.
struct Fields<'a> {
    tag: &'a str,
    rest: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(line: &'a str) -> Self {
        let mut parts = line.split(SEPARATOR.trim()).map(str::trim);
        let tag = parts.next().unwrap_or_default();
        Self {
            tag,
            rest: parts.collect(),
        }
    }

    fn expect(&self, count: usize) -> Result<(), String> {
        if self.rest.len() == count {
            Ok(())
        } else {
            Err(format!(
                "{} needs {} fields, found {}",
                self.tag,
                count,
                self.rest.len()
            ))
        }
    }

    fn text(&self, index: usize) -> String {
        self.rest[index].to_string()
    }

    fn number<T: std::str::FromStr>(&self, index: usize) -> Result<T, String> {
        self.rest[index]
            .parse()
            .map_err(|_| format!("'{}' is not a number", self.rest[index]))
    }

    fn date(&self, index: usize) -> Result<jiff::civil::Date, String> {
        parse_date(self.rest[index]).map_err(|_| format!("'{}' is not a date", self.rest[index]))
    }
}

fn decode_line(account: &mut Account, line: &str) -> Result<(), String> {
    let f = Fields::split(line);

    match f.tag {
        "INIT" => {
            f.expect(2)?;
            account.to_initialize = f
                .number::<bool>(0)
                .map_err(|_| format!("'{}' is not true or false", f.rest[0]))?;
            account.base_savings = f.number(1)?;
        }
        "INC" => {
            f.expect(3)?;
            account
                .incomes
                .push(Income::new(f.number(0)?, f.text(1), f.date(2)?));
        }
        "EXP" => {
            f.expect(4)?;
            account.expenditures.push(Expenditure::new(
                f.number(0)?,
                f.text(1),
                f.text(2),
                f.date(3)?,
            ));
        }
        "SEX" => {
            f.expect(5)?;
            let parties = f.rest[4]
                .split(PARTY_SEPARATOR.trim())
                .map(|party| decode_party(party.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            account.expenditures.push(
                Expenditure::new(f.number(0)?, f.text(1), f.text(2), f.date(3)?)
                    .with_split(Split::from_parties(parties)),
            );
        }
        "G" => {
            f.expect(5)?;
            let mut goal = Goal::new(
                f.number(0)?,
                f.text(1),
                f.date(3)?,
                f.rest[4].parse().map_err(|e: crate::error::MoneyError| e.to_string())?,
            );
            goal.category = f.text(2);
            account.goals.push(goal);
        }
        "INS" => {
            f.expect(6)?;
            let mut instalment =
                Instalment::new(f.number(0)?, f.text(1), f.date(3)?, f.number(4)?, f.number(5)?);
            instalment.category = f.text(2);
            account.instalments.push(instalment);
        }
        "LOA" => {
            f.expect(6)?;
            let kind: LoanKind = f.rest[3].parse().map_err(|e: crate::error::MoneyError| e.to_string())?;
            let mut loan = Loan::new(f.number(0)?, f.text(1), f.date(2)?, kind);
            loan.outstanding = f.number(4)?;
            loan.end_date = match f.rest[5] {
                "-" => None,
                _ => Some(f.date(5)?),
            };
            account.loans.push(loan);
        }
        "BAN" => {
            f.expect(4)?;
            account.bank_trackers.push(BankTracker::new(
                f.text(0),
                f.number(1)?,
                f.date(2)?,
                f.number(3)?,
            ));
        }
        other => return Err(format!("unknown entry type '{}'", other)),
    }

    Ok(())
}

fn decode_party(text: &str) -> Result<Party, String> {
    let (name, paid) = text
        .rsplit_once('#')
        .ok_or_else(|| format!("'{}' is not a party", text))?;
    let paid = match paid {
        "0" => false,
        "1" => true,
        _ => return Err(format!("'{}' is not a paid flag", paid)),
    };
    Ok(Party {
        name: name.to_string(),
        paid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::filesystem::{memory::InMemoryFileSystem, MockFileSystem};
    use jiff::civil::date;
    use pretty_assertions::assert_eq;

    fn sample_account() -> Account {
        let mut account = Account::new();
        account.initialize(5000.0, 500.0, date(2020, 1, 1));
        account.expenditures.push(Expenditure::new(
            120.0,
            "A Jays 5",
            "present",
            date(1997, 10, 9),
        ));
        let mut split = Split::new(["amy", "bob"]);
        split.settle(0).unwrap();
        account.expenditures.push(
            Expenditure::new(90.0, "dinner", "food", date(2020, 1, 1)).with_split(split),
        );
        account
            .goals
            .push(Goal::new(800.0, "new phone", date(2020, 6, 1), Priority::High));
        account
            .instalments
            .push(Instalment::new(1200.0, "laptop", date(2020, 1, 1), 12, 5.5));
        let mut loan = Loan::new(500.0, "Tom", date(2020, 1, 1), LoanKind::Outgoing);
        loan.settle(None, date(2020, 2, 1)).unwrap();
        account.loans.push(loan);
        account
            .loans
            .push(Loan::new(50.0, "Ann", date(2020, 1, 5), LoanKind::Incoming));
        account
            .bank_trackers
            .push(BankTracker::new("OCBC", 1000.5, date(2020, 1, 1), 0.01));
        account
    }

    #[test]
    fn test_encode_format() {
        let text = encode(&sample_account());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "INIT @ false @ 3000",
                "INC @ 5000 @ Initial Savings @ 1/1/2020",
                "EXP @ 120 @ A Jays 5 @ present @ 9/10/1997",
                "SEX @ 90 @ dinner @ food @ 1/1/2020 @ amy#1 ! bob#0",
                "G @ 800 @ new phone @ GS @ 1/6/2020 @ HIGH",
                "INS @ 1200 @ laptop @ instalments @ 1/1/2020 @ 12 @ 5.5",
                "LOA @ 500 @ Tom @ 1/1/2020 @ OUTGOING @ 0 @ 1/2/2020",
                "LOA @ 50 @ Ann @ 5/1/2020 @ INCOMING @ 50 @ -",
                "BAN @ OCBC @ 1000.5 @ 1/1/2020 @ 0.01",
            ]
        );
    }

    #[test]
    fn test_decode_restores_account() {
        let account = sample_account();
        assert_eq!(decode(&encode(&account)).unwrap(), account);
    }

    #[test]
    fn test_party_names_may_contain_hash() {
        let mut split = Split::new(["jo#2", "sam"]);
        split.settle(0).unwrap();
        let mut account = Account::new();
        account.expenditures.push(
            Expenditure::new(30.0, "pizza", "food", date(2020, 2, 2)).with_split(split),
        );

        let encoded = encode(&account);
        assert!(encoded.contains("jo#2#1 ! sam#0"));

        let decoded = decode(&encoded).unwrap();
        let parties = decoded.expenditures[0].split.as_ref().unwrap().parties();
        assert_eq!(parties[0].name, "jo#2");
        assert!(parties[0].paid);
        assert_eq!(parties[1].name, "sam");
        assert!(!parties[1].paid);
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let account = decode("INIT @ false @ 0\n\n   \nINC @ 10 @ pay @ 1/1/2020\n").unwrap();
        assert_eq!(account.incomes.len(), 1);
        assert!(!account.to_initialize);
    }

    #[test]
    fn test_decode_reports_line_number() {
        let err = decode("INIT @ false @ 0\nINC @ ten @ pay @ 1/1/2020\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed line 2 in account file: 'ten' is not a number"
        );

        let err = decode("XYZ @ 1\n").unwrap_err();
        assert!(matches!(err, StorageError::Malformed { line: 1, .. }));

        let err = decode("EXP @ 1 @ a @ b\n").unwrap_err();
        assert!(err.to_string().contains("EXP needs 4 fields, found 3"));
    }

    #[test]
    fn test_load_missing_file_is_new_account() {
        let storage = MoneyStorage::new(InMemoryFileSystem::new(), "/data/account.txt");
        let account = storage.load().unwrap();
        assert!(account.to_initialize);
    }

    #[test]
    fn test_save_then_load() {
        let fs = InMemoryFileSystem::new();
        let storage = MoneyStorage::new(&fs, "/data/moneytrack/account.txt");
        storage.save(&sample_account()).unwrap();

        assert!(fs.path_exists(Path::new("/data/moneytrack")));
        assert_eq!(storage.load().unwrap(), sample_account());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut fs = MockFileSystem::new();
        fs.mock_path_exists("/data", true);
        fs.expect_write_file().returning(|path, _| {
            Err(FileSystemError::PermissionDenied(
                path.to_string_lossy().into_owned(),
            ))
        });

        let storage = MoneyStorage::new(fs, "/data/account.txt");
        let err = storage.save(&Account::new()).unwrap_err();
        assert_eq!(err.to_string(), "Permission denied: /data/account.txt");
    }
}
