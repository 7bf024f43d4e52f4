use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn piggybank(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("piggybank").unwrap();
    cmd.env("PIGGYBANK_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG")
        .env_remove("PIGGYBANK_LOG_FORMAT");
    cmd
}

fn run(data_dir: &TempDir, args: &[&str]) {
    piggybank(data_dir).args(args).assert().success();
}

#[test]
fn deposit_and_withdraw_update_the_balance() {
    let dir = TempDir::new().unwrap();

    run(&dir, &["account", "create", "Alice", "--birthday", "2016-04-02"]);
    run(&dir, &["deposit", "Alice", "20", "--note", "allowance"]);

    piggybank(&dir)
        .args(["withdraw", "alice", "$5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New balance: $15.00"));

    piggybank(&dir)
        .args(["account", "show", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$15.00"))
        .stdout(predicate::str::contains("2016-04-02"));

    piggybank(&dir)
        .args(["history", "--account", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allowance"))
        .stdout(predicate::str::contains("Withdraw"));
}

#[test]
fn over_withdrawal_is_rejected() {
    let dir = TempDir::new().unwrap();

    run(&dir, &["account", "create", "Bo"]);
    run(&dir, &["deposit", "Bo", "3"]);

    piggybank(&dir)
        .args(["withdraw", "Bo", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    piggybank(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$3.00"));
}

#[test]
fn non_positive_amounts_are_rejected() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Cy"]);

    for amount in ["0", "-4", "NaN", "inf"] {
        piggybank(&dir)
            .args(["deposit", "Cy", "--", amount])
            .assert()
            .failure();
    }

    piggybank(&dir)
        .args(["deposit", "Cy", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    piggybank(&dir)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found"));
}

#[test]
fn unknown_account_is_reported() {
    let dir = TempDir::new().unwrap();

    piggybank(&dir)
        .args(["deposit", "Nobody", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account not found: Nobody"));
}

#[test]
fn backup_of_empty_ledger_fails() {
    let dir = TempDir::new().unwrap();

    piggybank(&dir)
        .args(["backup", "create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to back up"));

    assert!(!dir.path().join("bankDataBackup.json").exists());
}

#[test]
fn backup_and_restore_round_trip() {
    let dir = TempDir::new().unwrap();

    run(&dir, &["account", "create", "Alice"]);
    run(&dir, &["deposit", "Alice", "12.50", "--note", "tooth fairy"]);

    piggybank(&dir)
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bankDataBackup.json"));

    let backup = dir.path().join("backup-copy.json");
    std::fs::copy(dir.path().join("bankDataBackup.json"), &backup).unwrap();

    run(&dir, &["account", "delete", "Alice", "--force"]);
    piggybank(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts found"));

    let backup_arg = backup.to_str().unwrap();

    // Without --force nothing changes
    piggybank(&dir)
        .args(["restore", backup_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    piggybank(&dir)
        .args(["account", "list"])
        .assert()
        .stdout(predicate::str::contains("No accounts found"));

    piggybank(&dir)
        .args(["restore", backup_arg, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore complete"));

    piggybank(&dir)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tooth fairy"))
        .stdout(predicate::str::contains("$12.50"));
}

#[test]
fn corrupted_restore_leaves_data_alone() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Dee"]);
    run(&dir, &["deposit", "Dee", "7"]);

    let junk = dir.path().join("junk.json");
    std::fs::write(&junk, b"{ this is not a ledger").unwrap();

    piggybank(&dir)
        .args(["restore", junk.to_str().unwrap(), "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not decode"));

    piggybank(&dir)
        .args(["account", "show", "Dee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$7.00"));
}

#[test]
fn inspect_and_export() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Eli"]);
    run(&dir, &["deposit", "Eli", "2"]);
    run(&dir, &["backup", "create"]);

    piggybank(&dir)
        .args(["backup", "inspect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accounts:      1"))
        .stdout(predicate::str::contains("Transactions:  1"));

    piggybank(&dir)
        .args(["backup", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"shortTermWish\""))
        .stdout(predicate::str::contains("\"type\": \"deposit\""));
}

#[test]
fn audit_lists_changes() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Fay"]);
    run(&dir, &["deposit", "Fay", "1", "--note", "found it"]);

    piggybank(&dir)
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("DEPOSIT"))
        .stdout(predicate::str::contains("+$1.00 found it"));
}

#[test]
fn config_shows_data_directory() {
    let dir = TempDir::new().unwrap();

    piggybank(&dir)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bankData.json"))
        .stdout(predicate::str::contains("Currency symbol"));
}
