// tests/undo_test.rs

use jiff::civil::{date, Date};
use moneytrack::{
    filesystem::memory::InMemoryFileSystem, session::Session, storage::MoneyStorage,
    ui::ConsoleRenderer,
};

const PATH: &str = "/data/account.txt";

fn today() -> Date {
    date(2020, 3, 15)
}

fn existing_user(fs: &InMemoryFileSystem) -> Session<&InMemoryFileSystem> {
    fs.add_file(PATH, "INIT @ false @ 0\n");
    Session::open(
        MoneyStorage::new(fs, PATH),
        ConsoleRenderer::new(false, false),
    )
    .unwrap()
}

#[test]
fn test_undo_add_and_persist() {
    let fs = InMemoryFileSystem::new();
    let mut session = existing_user(&fs);

    session.handle("spent lunch /amt 5 /cat food /on now", today());
    assert!(fs.contents(PATH).unwrap().contains("lunch"));

    let response = session.handle("undo", today());
    assert!(response.output.contains("Last command undone:"));
    assert!(response.output.contains("Now you have 0 expenses listed"));
    assert!(session.account().expenditures.is_empty());
    assert!(!fs.contents(PATH).unwrap().contains("lunch"));
}

#[test]
fn test_only_one_level_of_undo() {
    let fs = InMemoryFileSystem::new();
    let mut session = existing_user(&fs);

    session.handle("add income a /amt 1 /payday now", today());
    session.handle("add income b /amt 2 /payday now", today());
    session.handle("undo", today());

    let response = session.handle("undo", today());
    assert!(response.failed);
    assert!(response.output.contains("No command to undo!"));
    assert_eq!(session.account().incomes.len(), 1);
    assert_eq!(session.account().incomes[0].description, "a");
}

#[test]
fn test_read_only_command_cannot_be_undone() {
    let fs = InMemoryFileSystem::new();
    let mut session = existing_user(&fs);

    session.handle("add income a /amt 1 /payday now", today());
    session.handle("list goals", today());

    let response = session.handle("undo", today());
    assert!(response.output.contains("Command can't be undone!"));
    assert_eq!(session.account().incomes.len(), 1);
}

#[test]
fn test_undo_delete_restores_position() {
    let fs = InMemoryFileSystem::new();
    let mut session = existing_user(&fs);

    session.handle("add income a /amt 1 /payday now", today());
    session.handle("add income b /amt 2 /payday now", today());
    session.handle("add income c /amt 3 /payday now", today());
    session.handle("delete income 2", today());
    session.handle("undo", today());

    let names: Vec<&str> = session
        .account()
        .incomes
        .iter()
        .map(|income| income.description.as_str())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn test_undo_transfer_restores_tracker() {
    let fs = InMemoryFileSystem::new();
    let mut session = existing_user(&fs);

    session.handle("bank-account POSB /amt 500 /at 1/1/2020 /rate 0", today());
    session.handle("deposit 100 POSB /at 1/2/2020", today());
    assert_eq!(session.account().bank_trackers[0].amount, 600.0);
    assert_eq!(session.account().incomes.len(), 1);

    session.handle("undo", today());
    let tracker = &session.account().bank_trackers[0];
    assert_eq!(tracker.amount, 500.0);
    assert_eq!(tracker.latest_date, date(2020, 1, 1));
    assert!(session.account().incomes.is_empty());
}

#[test]
fn test_undo_done_goal_reopens_it() {
    let fs = InMemoryFileSystem::new();
    let mut session = existing_user(&fs);

    session.handle("add income pay /amt 1000 /payday now", today());
    session.handle("goal bike /amt 300 /by 1/6/2020 /priority MEDIUM", today());
    session.handle("done goal 1", today());
    assert!(session.account().goals.is_empty());

    session.handle("undo", today());
    assert_eq!(session.account().goals.len(), 1);
    assert!(session.account().expenditures.is_empty());
}

#[test]
fn test_undo_settle_marks_party_unpaid() {
    let fs = InMemoryFileSystem::new();
    let mut session = existing_user(&fs);

    session.handle(
        "split dinner /amt 90 /cat food /on now /with amy, bob",
        today(),
    );
    session.handle("settle 1 2", today());
    let split = session.account().expenditures[0].split.clone().unwrap();
    assert!(split.parties()[1].paid);

    let response = session.handle("undo", today());
    assert!(response.output.contains("Last command undone:"));
    let split = session.account().expenditures[0].split.clone().unwrap();
    assert!(!split.parties()[1].paid);
    assert!(fs.contents(PATH).unwrap().contains("amy#0 ! bob#0"));
}

#[test]
fn test_undo_delete_bank_account() {
    let fs = InMemoryFileSystem::new();
    let mut session = existing_user(&fs);

    session.handle("bank-account OCBC /amt 1000 /at 1/1/2020 /rate 0", today());
    session.handle("bank-account DBS /amt 50 /at 1/1/2020 /rate 0", today());
    session.handle("delete bank-account OCBC", today());
    assert_eq!(session.account().bank_trackers.len(), 1);

    let response = session.handle("undo", today());
    assert!(response.output.contains("Now you have 2 bank accounts listed"));
    let names: Vec<&str> = session
        .account()
        .bank_trackers
        .iter()
        .map(|tracker| tracker.description.as_str())
        .collect();
    assert_eq!(names, ["OCBC", "DBS"]);
    assert!(fs.contents(PATH).unwrap().contains("BAN @ OCBC"));
}
