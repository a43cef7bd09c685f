// src/session.rs
// One interactive session: parse a line, run it against the account, keep
// the undo history and write the account back after every change.

use jiff::civil::Date;
use log::{debug, info, warn};

use crate::{
    commands::{Context, Outcome},
    domain::Account,
    error::MoneyError,
    filesystem::FileSystem,
    parser::parse,
    storage::{MoneyStorage, StorageError},
    suggestion::suggest_commands,
    ui::{ConsoleRenderer, Ui, LINE},
    undo::History,
};

/// What the user sees after one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Main pane, framed by separator lines.
    pub output: String,
    /// Detail pane for listings and charts; empty when unused.
    pub details: String,
    pub exit: bool,
    /// The command was rejected; nothing changed.
    pub failed: bool,
}

pub struct Session<F: FileSystem> {
    account: Account,
    storage: MoneyStorage<F>,
    history: History,
    ui: Ui,
}

impl<F: FileSystem> Session<F> {
    /// Load the account from `storage` and start with an empty history.
    pub fn open(storage: MoneyStorage<F>, renderer: ConsoleRenderer) -> Result<Self, StorageError> {
        let account = storage.load()?;
        info!(
            "Session opened with {} entries (new user: {})",
            account.entry_count(),
            account.to_initialize
        );
        Ok(Self {
            account,
            storage,
            history: History::default(),
            ui: Ui::new(renderer),
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn welcome(&self) -> String {
        self.ui.show_welcome()
    }

    pub fn handle(&mut self, input: &str, today: Date) -> Response {
        self.ui.clear();

        let mut exit = false;
        let mut failed = false;
        match self.run(input, today) {
            Ok(outcome) => exit = outcome.exit,
            Err(err) => {
                failed = true;
                warn!("Command '{}' failed: {}", input.trim(), err);
                let message = self.ui.show_error(&err.to_string());
                self.ui.append_to_output(&message);

                if let MoneyError::UnknownCommand(unknown) = &err {
                    let suggestions = suggest_commands(unknown);
                    if !suggestions.is_empty() {
                        self.ui.append_to_output(&format!(
                            " Did you mean: {}?\n",
                            suggestions.join(", ")
                        ));
                    }
                }
            }
        }

        Response {
            output: format!("{}{}{}", LINE, self.ui.output(), LINE),
            details: self.ui.details().to_string(),
            exit,
            failed,
        }
    }

    fn run(&mut self, input: &str, today: Date) -> Result<Outcome, MoneyError> {
        let command = parse(input, self.account.to_initialize, today)?;
        let name = command.name();
        let is_undo = command.is_undo();
        debug!("Executing '{}'", name);

        let account_before = self.account.clone();
        let history_before = self.history.clone();

        let result = {
            let mut ctx = Context {
                account: &mut self.account,
                ui: &mut self.ui,
                history: &mut self.history,
                today,
            };
            command.execute(&mut ctx)
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.rollback(account_before, history_before);
                return Err(err);
            }
        };

        if !is_undo {
            self.history.record(outcome.undo.clone());
        }
        if outcome.changed {
            if let Err(err) = self.storage.save(&self.account) {
                self.rollback(account_before, history_before);
                self.ui.clear();
                return Err(err.into());
            }
            info!("'{}' changed the account; saved to {}", name, self.storage.path().display());
        }
        Ok(outcome)
    }

    /// Put back the state from before a command that did not go through.
    fn rollback(&mut self, account: Account, history: History) {
        debug!("Rolling back the account and undo history");
        self.account = account;
        self.history = history;
    }
}
