//! End-to-end runs of the `pf` binary: exit codes, artifacts, stdout summary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

fn write(dir: &Path, name: &str, v: Value) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, serde_json::to_vec_pretty(&v).unwrap()).unwrap();
    p
}

fn household(dir: &Path) -> PathBuf {
    write(
        dir,
        "household.json",
        json!({ "pets": [
            { "id": "a", "name": "Cún", "type": "dog", "weight": 10 },
            { "id": "b", "name": "Mướp", "type": "cat", "weight": 4 }
        ]}),
    )
}

fn cart(dir: &Path) -> PathBuf {
    write(
        dir,
        "cart.json",
        json!({ "items": [
            { "product": { "id": "hat", "weight": "2kg", "category": "food" }, "quantity": 1 },
            { "product": { "id": "cat", "weight": "5kg", "category": "litter" }, "quantity": 1 }
        ]}),
    )
}

fn pf() -> Command {
    let mut cmd = Command::cargo_bin("pf").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn read_json(p: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(p).unwrap()).unwrap()
}

#[test]
fn split_by_need_writes_canonical_calculation() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    pf().args(["--household", household(dir.path()).to_str().unwrap()])
        .args(["--cart", cart(dir.path()).to_str().unwrap()])
        .args(["--food-only", "--start-date", "2024-06-01", "--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tổng: 2.000 g (split-by-need)"))
        .stdout(predicate::str::contains("- Cún: 1.220 g"))
        .stderr(predicate::str::contains("non-food cart lines dropped"));

    let text = fs::read_to_string(out.join("calculation.json")).unwrap();
    assert!(!text.ends_with('\n'));
    let v: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["totalGrams"], 2000);
    assert_eq!(v["perPet"][0]["gramsAllocated"], 1220);
    assert_eq!(v["perPet"][1]["gramsAllocated"], 780);
    assert_eq!(v["perPet"][0]["estimatedFinishDate"], "2024-06-05");
    assert!(v.get("leftoverGrams").is_none());
}

#[test]
fn without_food_only_every_line_counts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    pf().args(["--household", household(dir.path()).to_str().unwrap()])
        .args(["--cart", cart(dir.path()).to_str().unwrap()])
        .args(["--policy", "equal", "--quiet", "--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let v = read_json(&out.join("calculation.json"));
    assert_eq!(v["totalGrams"], 7000);
    assert_eq!(v["policyUsed"], "equal");
    assert_eq!(v["perPet"][0]["gramsAllocated"], 3500);
}

#[test]
fn plan_with_manual_flags_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    household(dir.path());
    cart(dir.path());
    let plan = write(
        dir.path(),
        "plan.json",
        json!({
            "household_path": "household.json",
            "cart_path": "cart.json",
            "start_date": "2024-06-01",
            "manual_allocations": { "a": 1500, "b": 100 }
        }),
    );
    let out = dir.path().join("out");
    pf().args(["--plan", plan.to_str().unwrap(), "--food-only"])
        .args(["--manual", "b=300", "--today", "2024-06-02"])
        .args(["--render", "json", "--render", "html", "--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Còn dư: 200 g"));

    let calc = read_json(&out.join("calculation.json"));
    assert_eq!(calc["policyUsed"], "manual");
    assert_eq!(calc["perPet"][0]["gramsAllocated"], 1500);
    assert_eq!(calc["perPet"][1]["gramsAllocated"], 300);
    assert_eq!(calc["leftoverGrams"], 200);

    let report = read_json(&out.join("report.json"));
    assert_eq!(report["policy"], "manual");
    assert_eq!(report["pets"][0]["intake_source"], "species_heuristic");
    assert_eq!(report["leftover"]["grams"], 200);

    let html = fs::read_to_string(out.join("report.html")).unwrap();
    assert!(html.contains("Mướp"));
}

#[test]
fn validate_only_reports_ok_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    pf().args(["--household", household(dir.path()).to_str().unwrap()])
        .args(["--cart", cart(dir.path()).to_str().unwrap()])
        .args(["--validate-only", "--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("inputs OK"));
    assert!(!out.join("calculation.json").exists());
}

#[test]
fn schema_violation_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write(dir.path(), "household.json", json!({ "pets": [ { "id": "a", "type": "dog" } ] }));
    pf().args(["--household", bad.to_str().unwrap()])
        .args(["--cart", cart(dir.path()).to_str().unwrap()])
        .arg("--validate-only")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pf: error"));
}

#[test]
fn duplicate_pet_ids_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    let dup = write(
        dir.path(),
        "household.json",
        json!({ "pets": [ { "id": "a", "name": "A", "type": "dog" }, { "id": "a", "name": "B", "type": "cat" } ] }),
    );
    pf().args(["--household", dup.to_str().unwrap()])
        .args(["--cart", cart(dir.path()).to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("duplicate pet id"));
}

#[test]
fn missing_input_and_bad_flags_exit_2() {
    pf().args(["--household", "nope.json", "--cart", "nope.json"]).assert().code(2);
    pf().args(["--plan", "https://example.org/plan.json"]).assert().code(2);
    pf().args(["--household", "h.json", "--cart", "c.json", "--policy", "random"]).assert().code(2);
    pf().args(["--household", "h.json", "--cart", "c.json", "--manual", "a"]).assert().code(2);
}

#[test]
fn plan_pointing_at_missing_input_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    let plan = write(
        dir.path(),
        "plan.json",
        json!({ "household_path": "missing.json", "cart_path": "cart.json" }),
    );
    cart(dir.path());
    pf().args(["--plan", plan.to_str().unwrap(), "--validate-only"]).assert().code(4);
}

#[test]
fn unknown_intake_reports_cannot_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let h = write(
        dir.path(),
        "household.json",
        json!({ "pets": [ { "id": "x", "name": "Lu", "type": "dog" } ] }),
    );
    let out = dir.path().join("out");
    pf().args(["--household", h.to_str().unwrap()])
        .args(["--cart", cart(dir.path()).to_str().unwrap()])
        .args(["--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chưa chia được"));
    let v = read_json(&out.join("calculation.json"));
    assert_eq!(v["perPet"], json!([]));
}
