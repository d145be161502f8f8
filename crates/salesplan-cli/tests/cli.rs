use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with config lookups pointed at an empty directory.
fn salesplan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("salesplan").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn match_suggests_fields_and_skips_values() {
    let dir = TempDir::new().unwrap();
    let tokens = write(
        dir.path(),
        "tokens.json",
        r#"["Гаджеты", "123.5", "GSM", "не число"]"#,
    );

    salesplan(dir.path())
        .args(["match", tokens.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Гаджеты": "gadgets""#))
        .stdout(predicate::str::contains(r#""GSM": "gsm""#))
        .stdout(predicate::str::contains("123.5").not());
}

#[test]
fn match_with_field_subset_rejects_noise() {
    let dir = TempDir::new().unwrap();
    let tokens = write(dir.path(), "tokens.json", r#"["zzz999"]"#);

    salesplan(dir.path())
        .args(["match", tokens.to_str().unwrap(), "--fields", "gadgets,gsm"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"));
}

#[test]
fn match_rejects_unknown_field() {
    let dir = TempDir::new().unwrap();
    let tokens = write(dir.path(), "tokens.json", r#"["GSM"]"#);

    salesplan(dir.path())
        .args(["match", tokens.to_str().unwrap(), "--fields", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown plan field"));
}

#[test]
fn confirm_builds_plan_from_tokens() {
    let dir = TempDir::new().unwrap();
    let tokens = write(
        dir.path(),
        "tokens.json",
        r#"[
            {"text": "GSM", "confidence": 91.0},
            {"text": "120", "confidence": 88.0},
            {"text": "Фото", "confidence": 75.0},
            {"text": "15", "confidence": 90.0}
        ]"#,
    );
    let out = dir.path().join("plan.json");

    salesplan(dir.path())
        .args([
            "confirm",
            tokens.to_str().unwrap(),
            "--store-id",
            "s1",
            "--month",
            "2024-03",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let plan: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(plan["id"], "s1-2024-03");
    assert_eq!(plan["storeId"], "s1");
    assert_eq!(plan["gsm"], "120");
    assert_eq!(plan["photo"], "15");
    assert_eq!(plan["sim"], "0");
}

#[test]
fn confirm_applies_operator_assignment() {
    let dir = TempDir::new().unwrap();
    let tokens = write(dir.path(), "tokens.json", r#"["план", "40"]"#);

    salesplan(dir.path())
        .args([
            "confirm",
            tokens.to_str().unwrap(),
            "--store-id",
            "s1",
            "--month",
            "2024-03",
            "--assign",
            "план=orders",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""orders": "40""#));
}

#[test]
fn confirm_rejects_bad_month() {
    let dir = TempDir::new().unwrap();
    let tokens = write(dir.path(), "tokens.json", r#"["GSM", "1"]"#);

    salesplan(dir.path())
        .args([
            "confirm",
            tokens.to_str().unwrap(),
            "--store-id",
            "s1",
            "--month",
            "March",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid month"));
}

#[test]
fn revenue_summary_from_csv() {
    let dir = TempDir::new().unwrap();
    let log = write(
        dir.path(),
        "revenue.csv",
        "amount,date\n1000,2024-05-01\n3000,2024-05-02\n",
    );

    salesplan(dir.path())
        .args(["revenue", log.to_str().unwrap(), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Общий доход: 4 000,00 ₽"))
        .stdout(predicate::str::contains("Средний доход: 2 000,00 ₽"))
        .stdout(predicate::str::contains("Минимальный доход: 1 000,00 ₽"));
}

#[test]
fn revenue_rejects_non_positive_amount() {
    let dir = TempDir::new().unwrap();
    let log = write(
        dir.path(),
        "revenue.json",
        r#"[{"amount": 0, "date": "2024-05-01"}]"#,
    );

    salesplan(dir.path())
        .args(["revenue", log.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn batch_writes_mapping_per_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.json", r#"["SIM", "5"]"#);
    write(dir.path(), "b.json", r#"["Skill"]"#);
    let out_dir = dir.path().join("out");
    let pattern = dir.path().join("*.json");

    salesplan(dir.path())
        .args([
            "batch",
            pattern.to_str().unwrap(),
            "--output-dir",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/2 tokens matched"));

    let a = fs::read_to_string(out_dir.join("a.mapping.json")).unwrap();
    assert!(a.contains(r#""SIM": "sim""#));
    assert!(out_dir.join("b.mapping.json").exists());
}

#[test]
fn fields_lists_catalog() {
    let dir = TempDir::new().unwrap();

    salesplan(dir.path())
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("gadgets"))
        .stdout(predicate::str::contains("Наяву"));
}

#[test]
fn stores_grouped_by_group() {
    let dir = TempDir::new().unwrap();
    let stores = write(
        dir.path(),
        "stores.json",
        r#"[
            {"id": "s2", "name": "Zeta", "group": "North"},
            {"id": "s1", "name": "Alpha", "group": "North"},
            {"id": "s3", "name": "Mid", "group": "East"}
        ]"#,
    );

    let output = salesplan(dir.path())
        .args(["stores", stores.to_str().unwrap(), "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let sorted: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
    let ids: Vec<_> = sorted.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["s3", "s1", "s2"]);
}

#[test]
fn config_commands_use_named_file() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "custom.json",
        r#"{"review": {"low_confidence": 10.0}}"#,
    );
    let config = config.to_str().unwrap();

    salesplan(dir.path())
        .args(["-c", config, "config", "get", "review.low_confidence"])
        .assert()
        .success()
        .stdout(predicate::str::diff("10.0\n"));

    salesplan(dir.path())
        .args(["-c", config, "config", "set", "catalog.fields", "gsm,sim"])
        .assert()
        .success();

    salesplan(dir.path())
        .args(["-c", config, "config", "set", "catalog.fields", "bonus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown plan field"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("custom.json")).unwrap()).unwrap();
    assert_eq!(saved["review"]["low_confidence"], 10.0);
    assert_eq!(saved["catalog"]["fields"], serde_json::json!(["gsm", "sim"]));
}
