use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A data directory with a cheap Argon2 cost so backups are fast
fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"backup": {"kdf": {"memory_cost": 8192, "time_cost": 1, "parallelism": 1}}}"#,
    )
    .unwrap();
    dir
}

fn symlog(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("symlog").unwrap();
    cmd.env("SYMLOG_DATA_DIR", dir)
        .env_remove("SYMLOG_BACKUP_PASSPHRASE")
        .env_remove("SYMLOG_LOG");
    cmd
}

fn add_entry(dir: &Path, args: &[&str]) {
    symlog(dir)
        .args(["entry", "add"])
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded"));
}

#[test]
fn add_and_list_entries() {
    let dir = data_dir();
    add_entry(
        dir.path(),
        &["symptom", "pain_vas", "--date", "2024-06-01", "-v", "pain_score=7"],
    );
    add_entry(dir.path(), &["diary", "diary_note", "--notes", "slept well", "-v", "mood=good"]);

    symlog(dir.path())
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pain (VAS)"))
        .stdout(predicate::str::contains("pain_score=7"))
        .stdout(predicate::str::contains("mood=mood_option_good"))
        .stdout(predicate::str::contains("Page 1 of 1 (2 entries)"));

    symlog(dir.path())
        .args(["entry", "list", "--type", "diary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pain (VAS)").not());
}

#[test]
fn invalid_entry_type_fails() {
    let dir = data_dir();
    symlog(dir.path())
        .args(["entry", "add", "mood", "happy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid entry type"));
}

#[test]
fn entries_are_checked_against_catalog() {
    let dir = data_dir();
    symlog(dir.path())
        .args(["entry", "add", "symptom", "back_pain"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown symptom subtype 'back_pain'"));

    symlog(dir.path())
        .args(["entry", "add", "symptom", "pain_vas", "-v", "pain_score=12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 10"));

    add_entry(
        dir.path(),
        &["symptom", "urticaria_uas7", "-v", "itching_severity=2", "-v", "hives_extent=3"],
    );
    symlog(dir.path())
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uas_score=5"));
}

#[test]
fn entry_types_lists_catalog() {
    let dir = data_dir();
    symlog(dir.path())
        .args(["entry", "types", "symptom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("urticaria_uas7"))
        .stdout(predicate::str::contains("Pain score [0-10]"))
        .stdout(predicate::str::contains("standard_medication").not());
}

#[test]
fn restored_foreign_entries_can_be_wiped() {
    let dir = data_dir();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(
        dir.path().join("data").join("symlog_entries.json"),
        r#"[{"id":1,"entry_type":"diary","notes":"hi"}]"#,
    )
    .unwrap();

    symlog(dir.path())
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));
    add_entry(dir.path(), &["diary", "diary_note"]);

    symlog(dir.path())
        .args(["wipe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delete 2 entries"));
    symlog(dir.path()).args(["wipe", "--force"]).assert().success();
    symlog(dir.path())
        .args(["wipe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delete 0 entries"));
}

#[test]
fn backup_round_trip() {
    let dir = data_dir();
    let backup = dir.path().join("mine.symlog");
    add_entry(
        dir.path(),
        &["medication", "standard_medication", "-v", "medication_name=Ibuprofen"],
    );

    symlog(dir.path())
        .args(["backup", "create", "--output"])
        .arg(&backup)
        .env("SYMLOG_BACKUP_PASSPHRASE", "secret1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created"));
    assert!(backup.exists());

    symlog(dir.path())
        .args(["backup", "last"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last backup"));

    symlog(dir.path())
        .args(["wipe", "--force"])
        .assert()
        .success();
    symlog(dir.path())
        .args(["entry", "list"])
        .assert()
        .stdout(predicate::str::contains("No entries found."));

    // without --force only the metadata is shown
    symlog(dir.path())
        .args(["backup", "restore"])
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: 1.0"))
        .stdout(predicate::str::contains("--force"));
    symlog(dir.path())
        .args(["entry", "list"])
        .assert()
        .stdout(predicate::str::contains("No entries found."));

    symlog(dir.path())
        .args(["backup", "restore", "--force", "--passphrase", "secret1"])
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 entry"));
    symlog(dir.path())
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ibuprofen"));
}

#[test]
fn restore_with_wrong_passphrase_fails() {
    let dir = data_dir();
    let backup = dir.path().join("mine.symlog");

    symlog(dir.path())
        .args(["backup", "create", "--passphrase", "secret1", "--output"])
        .arg(&backup)
        .assert()
        .success();

    symlog(dir.path())
        .args(["backup", "restore", "--force", "--passphrase", "secret2"])
        .arg(&backup)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong passphrase or corrupted backup file"));
}

#[test]
fn short_passphrase_rejected() {
    let dir = data_dir();
    symlog(dir.path())
        .args(["backup", "create", "--passphrase", "12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 6"));
}

#[test]
fn backup_info_flags_unsupported_version() {
    let dir = data_dir();
    let backup = dir.path().join("old.symlog");
    fs::write(
        &backup,
        r#"{"version":"0.9","timestamp":"2024-06-10T10:00:00.000Z","encryptedData":"x"}"#,
    )
    .unwrap();

    symlog(dir.path())
        .args(["backup", "info"])
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("unsupported"));

    symlog(dir.path())
        .args(["backup", "restore", "--force", "--passphrase", "secret1"])
        .arg(&backup)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incompatible backup version"));
}

#[test]
fn profile_set_and_show() {
    let dir = data_dir();
    symlog(dir.path())
        .args(["profile", "set", "personal_info.name", "Ada"])
        .assert()
        .success();
    symlog(dir.path())
        .args(["profile", "set", "medical_info.conditions", r#"["asthma"]"#])
        .assert()
        .success();

    symlog(dir.path())
        .args(["profile", "show", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Ada"))
        .stdout(predicate::str::contains("Conditions: asthma"));

    symlog(dir.path())
        .args(["profile", "set", "personal_info.age", "old"])
        .assert()
        .failure();
}

#[test]
fn report_summary_style() {
    let dir = data_dir();
    add_entry(
        dir.path(),
        &["symptom", "headache_hit6", "--date", "2024-06-01", "--notes", "after lunch"],
    );

    symlog(dir.path())
        .args(["report", "--from", "2024-06-01", "--title", "For Dr. Smith", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("For Dr. Smith\n"))
        .stdout(predicate::str::contains("1. Headache Impact (HIT-6) - 2024-06-01"))
        .stdout(predicate::str::contains("after lunch").not());

    symlog(dir.path())
        .args(["report", "--exclude", "finances"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown report section"));
}

#[test]
fn config_shows_paths() {
    let dir = data_dir();
    symlog(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory"))
        .stdout(predicate::str::contains("m=8192 KiB"));
}
