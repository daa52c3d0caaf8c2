//! End-to-end tests for the docvault binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSPHRASE: &str = "correct horse battery staple";

fn vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"kdf":{"algorithm":"pbkdf2-sha256","iterations":1000}}"#,
    )
    .unwrap();
    dir
}

fn docvault(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docvault").unwrap();
    cmd.env("DOCVAULT_DATA_DIR", dir)
        .env("DOCVAULT_PASSPHRASE", PASSPHRASE)
        .env_remove("RUST_LOG")
        .env_remove("DOCVAULT_OWNER");
    cmd
}

fn upload(dir: &Path, file: &Path) -> String {
    let output = docvault(dir)
        .args(["document", "upload"])
        .arg(file)
        .args(["--owner", "uid42"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn upload_then_decrypt_round_trips() {
    let dir = vault();
    let file = dir.path().join("hello.txt");
    fs::write(&file, "Hello, Canada!").unwrap();

    let id = upload(dir.path(), &file);
    assert!(id.starts_with("uid42_"));

    docvault(dir.path())
        .args(["document", "decrypt", &id])
        .assert()
        .success()
        .stdout("Hello, Canada!");

    let stored = fs::read_to_string(dir.path().join("data").join("documents.json")).unwrap();
    assert!(stored.contains(&id));
    assert!(!stored.contains("Hello, Canada!"));
}

#[test]
fn decrypt_to_file() {
    let dir = vault();
    let file = dir.path().join("note.txt");
    fs::write(&file, "line one\nline two\n").unwrap();
    let id = upload(dir.path(), &file);

    let out = dir.path().join("out.txt");
    docvault(dir.path())
        .args(["document", "decrypt", &id, "--output"])
        .arg(&out)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(out).unwrap(), "line one\nline two\n");
}

#[test]
fn wrong_passphrase_is_rejected() {
    let dir = vault();
    let file = dir.path().join("hello.txt");
    fs::write(&file, "Hello, Canada!").unwrap();
    let id = upload(dir.path(), &file);

    docvault(dir.path())
        .env("DOCVAULT_PASSPHRASE", "not the passphrase")
        .args(["document", "decrypt", &id])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Hello").not())
        .stderr(predicate::str::contains("invalid passphrase"));
}

#[test]
fn hash_prints_sha256() {
    let dir = vault();
    let file = dir.path().join("abc.txt");
    fs::write(&file, "abc").unwrap();

    docvault(dir.path())
        .env_remove("DOCVAULT_PASSPHRASE")
        .args(["document", "hash"])
        .arg(&file)
        .assert()
        .success()
        .stdout("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\n");
}

#[test]
fn verify_reports_intact_and_mismatch() {
    let dir = vault();
    let file = dir.path().join("hello.txt");
    fs::write(&file, "Hello, Canada!").unwrap();
    let id = upload(dir.path(), &file);

    docvault(dir.path())
        .args(["document", "verify", &id])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("intact"));

    let changed = dir.path().join("changed.txt");
    fs::write(&changed, "Hello, Canada?").unwrap();

    docvault(dir.path())
        .args(["document", "verify", &id])
        .arg(&changed)
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILED"));

    docvault(dir.path())
        .env_remove("DOCVAULT_PASSPHRASE")
        .args(["document", "verify", "--hash-only", &id])
        .arg(&changed)
        .assert()
        .failure();
}

#[test]
fn missing_document_is_reported() {
    let dir = vault();

    docvault(dir.path())
        .args(["document", "decrypt", "ghost_1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document not found: ghost_1"));

    docvault(dir.path())
        .args(["document", "show", "ghost_1"])
        .assert()
        .failure();
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = vault();
    let file = dir.path().join("run.sh");
    fs::write(&file, "echo hi").unwrap();

    docvault(dir.path())
        .args(["document", "upload"])
        .arg(&file)
        .args(["--owner", "uid42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn list_show_and_audit() {
    let dir = vault();
    let file = dir.path().join("lease.txt");
    fs::write(&file, "twelve month lease").unwrap();
    let id = upload(dir.path(), &file);

    docvault(dir.path())
        .args(["document", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()).and(predicate::str::contains("lease.txt")));

    docvault(dir.path())
        .args(["document", "show", &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"encryptedData\"").and(predicate::str::contains("twelve").not()));

    docvault(dir.path())
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPLOAD").and(predicate::str::contains("VERIFY")));

    docvault(dir.path())
        .args(["audit", "--document", "ghost_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries found."));
}

#[test]
fn init_writes_settings() {
    let dir = TempDir::new().unwrap();

    docvault(dir.path()).arg("init").assert().success();

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("documents.json").exists());

    docvault(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("PBKDF2-HMAC-SHA256"));
}
