use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn trk(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("trk").expect("binary");
    cmd.arg("--root").arg(dir);
    cmd
}

#[test]
fn trk_help_works() {
    Command::cargo_bin("trk")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task tracker"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = ["init", "task", "epic", "subtask", "prioritized", "history"];

    for cmd in subcommands {
        Command::cargo_bin("trk")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn schedule_conflicts_exit_with_code_3() {
    let dir = tempfile::tempdir().expect("tempdir");

    trk(dir.path()).arg("init").assert().success();

    trk(dir.path())
        .args(["task", "add", "sync", "--duration", "60", "--start"])
        .arg("02.06.2025 10:00")
        .assert()
        .success();

    trk(dir.path())
        .args(["task", "add", "clash", "--duration", "60", "--start"])
        .arg("02.06.2025 10:30")
        .assert()
        .failure()
        .code(3);

    trk(dir.path())
        .args(["task", "add", "later", "--duration", "60", "--start"])
        .arg("02.06.2025 11:00")
        .assert()
        .success();

    trk(dir.path())
        .arg("prioritized")
        .assert()
        .success()
        .stdout(contains("sync").and(contains("later")).and(contains("clash").not()));
}

#[test]
fn unknown_status_exits_with_code_2() {
    let dir = tempfile::tempdir().expect("tempdir");

    trk(dir.path()).arg("init").assert().success();

    trk(dir.path())
        .args(["task", "add", "x", "--status", "BOGUS"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn epics_aggregate_their_subtasks() {
    let dir = tempfile::tempdir().expect("tempdir");

    trk(dir.path()).arg("init").assert().success();
    trk(dir.path())
        .args(["epic", "add", "release"])
        .assert()
        .success();
    trk(dir.path())
        .args(["subtask", "add", "notes", "--epic", "1", "--status", "DONE"])
        .assert()
        .success();

    trk(dir.path())
        .args(["epic", "show", "1"])
        .assert()
        .success()
        .stdout(contains("DONE"));
}

#[test]
fn views_build_up_history() {
    let dir = tempfile::tempdir().expect("tempdir");

    trk(dir.path()).arg("init").assert().success();
    trk(dir.path()).args(["task", "add", "one"]).assert().success();
    trk(dir.path()).args(["task", "add", "two"]).assert().success();
    trk(dir.path()).args(["task", "show", "1"]).assert().success();
    trk(dir.path()).args(["task", "show", "2"]).assert().success();

    trk(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(contains("one").and(contains("two")));
}
