use assert_cmd::Command;
use predicates::prelude::*;

/// The binary must fail cleanly, with a message naming the missing
/// variable, when the required configuration is absent. No network is
/// touched: the config loader rejects the run before any request.
#[test]
fn sync_cli_fails_cleanly_without_required_configuration() {
    let mut cmd = Command::cargo_bin("notion-sync").expect("Binary exists");

    cmd.arg("sync")
        .env_remove("NOTION_TOKEN")
        .env_remove("NOTION_DATABASE_ID")
        .env("ISSUE_ACTION", "opened")
        .env("ISSUE_NUMBER", "42");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("NOTION_TOKEN"));
}

#[test]
fn sync_cli_help_names_the_sync_subcommand() {
    let mut cmd = Command::cargo_bin("notion-sync").expect("Binary exists");

    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sync"));
}
