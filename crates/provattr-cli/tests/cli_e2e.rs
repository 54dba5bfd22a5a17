#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `provattr` command isolated from the user's config and environment.
fn provattr_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("provattr"));
    cmd.env_remove("PROVATTR_STORE_DIR")
        .env_remove("PROVATTR_DEFAULT_KIND")
        .env_remove("PROVATTR_LOG")
        .arg("--config")
        .arg(temp.path().join("provattr.toml"))
        .arg("--store")
        .arg(temp.path().join("store"));
    cmd
}

#[test]
fn test_mail_port_set_and_unset_workflow() {
    let temp = TempDir::new().unwrap();

    // 1. Nothing stored: the declared default shows
    provattr_cmd(&temp)
        .args(["get", "mail1", "MailPort"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zimbraMailPort  80 (default)"));

    // 2. Set it
    provattr_cmd(&temp)
        .args(["set", "mail1", "MailPort", "8080"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated server:mail1"));

    provattr_cmd(&temp)
        .args(["get", "mail1", "zimbraMailPort", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"zimbraMailPort\": 8080"));

    // Written where the store lives
    assert!(temp.path().join("store/server/mail1.json").exists());

    // 3. Unset restores the default
    provattr_cmd(&temp)
        .args(["unset", "mail1", "MailPort"])
        .assert()
        .success();

    provattr_cmd(&temp)
        .args(["get", "mail1", "MailPort"])
        .assert()
        .success()
        .stdout(predicate::str::contains("80 (default)"));
}

#[test]
fn test_set_several_attributes_in_one_call() {
    let temp = TempDir::new().unwrap();

    provattr_cmd(&temp)
        .args(["set", "mail1", "MailMode", "https", "ImapServerEnabled", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 changes"));

    provattr_cmd(&temp)
        .args(["get", "mail1", "--raw", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"zimbraMailMode\""))
        .stdout(predicate::str::contains("\"FALSE\""));
}

#[test]
fn test_multi_valued_add_and_remove() {
    let temp = TempDir::new().unwrap();

    provattr_cmd(&temp)
        .args(["set", "mail1", "--", "+SmtpHostname", "mx1", "+SmtpHostname", "mx2"])
        .assert()
        .success();

    provattr_cmd(&temp)
        .args(["set", "mail1", "--", "-SmtpHostname", "mx1"])
        .assert()
        .success();

    provattr_cmd(&temp)
        .args(["get", "mail1", "SmtpHostname", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mx2"))
        .stdout(predicate::str::contains("mx1").not());
}

#[test]
fn test_dry_run_prints_changes_without_writing() {
    let temp = TempDir::new().unwrap();

    provattr_cmd(&temp)
        .args(["set", "--dry-run", "mail1", "Pop3BindPort", "1110"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zimbraPop3BindPort: 1110"));

    assert!(!temp.path().join("store/server/mail1.json").exists());
}

#[test]
fn test_unknown_attribute_fails() {
    let temp = TempDir::new().unwrap();

    provattr_cmd(&temp)
        .args(["get", "mail1", "NoSuchAttribute"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown attribute: NoSuchAttribute"));
}

#[test]
fn test_invalid_value_is_rejected_before_commit() {
    let temp = TempDir::new().unwrap();

    provattr_cmd(&temp)
        .args(["set", "mail1", "SmtpPort", "2525", "MailPort", "eighty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zimbraMailPort"));

    // Nothing from the batch was committed
    assert!(!temp.path().join("store/server/mail1.json").exists());
}

#[test]
fn test_describe_and_entries() {
    let temp = TempDir::new().unwrap();

    provattr_cmd(&temp)
        .args(["describe", "MtaTlsSecurityLevel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zimbraMtaTlsSecurityLevel"))
        .stdout(predicate::str::contains("may, none"));

    provattr_cmd(&temp)
        .args(["entries"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    provattr_cmd(&temp)
        .args(["set", "mail2", "SmtpPort", "2525"])
        .assert()
        .success();
    provattr_cmd(&temp)
        .args(["set", "mail1", "SmtpPort", "2526"])
        .assert()
        .success();

    provattr_cmd(&temp)
        .args(["entries"])
        .assert()
        .success()
        .stdout(predicate::str::diff("mail1\nmail2\n"));
}

#[test]
fn test_store_dir_from_environment() {
    let temp = TempDir::new().unwrap();
    let env_store = temp.path().join("from-env");

    Command::new(cargo_bin("provattr"))
        .env("PROVATTR_STORE_DIR", env_store.as_os_str())
        .env_remove("PROVATTR_DEFAULT_KIND")
        .arg("--config")
        .arg(temp.path().join("provattr.toml"))
        .args(["set", "mail1", "MailPort", "8080"])
        .assert()
        .success();

    assert!(env_store.join("server/mail1.json").exists());
}

#[test]
fn test_kind_flag_selects_entry_directory() {
    let temp = TempDir::new().unwrap();

    provattr_cmd(&temp)
        .args(["-k", "domain", "set", "example.com", "Description", "primary"])
        .assert()
        .success();

    assert!(temp.path().join("store/domain/example.com.json").exists());

    provattr_cmd(&temp)
        .args(["--kind", "galaxy", "entries"])
        .assert()
        .failure();
}
