use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn gerencia(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gerencia").unwrap();
    cmd.env("GERENCIA_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn register_and_login(home: &Path) {
    gerencia(home)
        .args([
            "register",
            "--name",
            "Ana",
            "--email",
            "a@x.com",
            "--password",
            "p1",
            "--confirm",
            "p1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created for a@x.com"));

    gerencia(home)
        .args(["login", "a@x.com", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as a@x.com"));
}

#[test]
fn test_full_session_flow() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register_and_login(home);

    gerencia(home)
        .args(["product", "add", "Widget", "10", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product created: Widget"));

    gerencia(home)
        .arg("stock")
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("Low stock"))
        .stdout(predicate::str::contains("R$ 30.00"));

    gerencia(home)
        .args(["finance", "add", "Sale", "100"])
        .assert()
        .success();
    gerencia(home)
        .args(["finance", "add", "Rent", "40", "--payable"])
        .assert()
        .success();

    gerencia(home)
        .args(["finance", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sale"))
        .stdout(predicate::str::contains("R$ 60.00"));

    gerencia(home)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Ana"))
        .stdout(predicate::str::contains("R$ 100.00"));

    let out_dir = home.join("exports");
    gerencia(home)
        .args(["export", "--dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("relatorio_"));

    let exported: Vec<_> = std::fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(exported.len(), 1);
    let content = std::fs::read_to_string(exported[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains("Widget,10,3,30.00"));
    assert!(content.contains("Rent,pagar,40,"));

    gerencia(home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    gerencia(home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_protected_commands_require_login() {
    let temp_dir = tempfile::tempdir().unwrap();

    gerencia(temp_dir.path())
        .args(["product", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    gerencia(temp_dir.path())
        .arg("dashboard")
        .assert()
        .failure();
}

#[test]
fn test_wrong_password_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register_and_login(home);

    gerencia(home)
        .args(["login", "a@x.com", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}

#[test]
fn test_duplicate_email_and_mismatched_confirmation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register_and_login(home);

    gerencia(home)
        .args([
            "register", "--name", "Bia", "--email", "a@x.com", "--password", "x", "--confirm",
            "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Email already registered"));

    gerencia(home)
        .args([
            "register", "--name", "Bia", "--email", "b@x.com", "--password", "x", "--confirm",
            "y",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Passwords do not match"));
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    gerencia(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("report-preview = 5"));

    gerencia(home)
        .args(["config", "report-preview", "2"])
        .assert()
        .success();

    gerencia(home)
        .args(["config", "report-preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));

    gerencia(home)
        .args(["config", "report-preview", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("report-preview must be a whole number"));

    gerencia(home)
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));
}
