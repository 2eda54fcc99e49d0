//! Integration tests for the catalog commands: `compare`, `report` and
//! `coverage`, run against CSV files in a temp directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MEDICINES: &str = "\
medicine_name,type,effectiveness_rating,side_effects,average_cost_per_month,goodrx_price
Metformin,Biguanide,7,Nausea,15,4
Januvia,DPP-4 inhibitor,7,Headache,520,
Ozempic,GLP-1 agonist,9,Nausea,900,
";
const PLANS: &str = "\
insurance_name,provider,copay_primary_care,copay_specialist,copay_emergency,deductible,annual_max_copay,coverage_percentage
Aetna,Aetna Inc,20,40,150,500,4000,80
Cigna,Cigna Corp,25,50,200,1000,5000,70
";
const COVERAGE: &str = "\
insurance_name,medicine_name,covered,copay_amount,tier_level
Aetna,Metformin,Yes,5,Tier 1
Aetna,Januvia,Yes,45,Tier 3
Cigna,Januvia,No,,
Cigna,Metformin,Yes,10,Tier 1
";

fn data_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("medicines.csv"), MEDICINES).unwrap();
    std::fs::write(dir.path().join("insurance.csv"), PLANS).unwrap();
    std::fs::write(dir.path().join("insurance_medicine_coverage.csv"), COVERAGE).unwrap();
    dir
}

fn medcompare(data: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("medcompare"));
    cmd.env("NO_COLOR", "1")
        .env_remove("MEDCOMPARE_DATA_DIR")
        .arg("--data-dir")
        .arg(data.path());
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let assert = cmd.assert().success();
    serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON")
}

// --- compare ---

#[test]
fn test_compare_lists_every_pairing_sorted_by_annual_cost() {
    let data = data_dir();
    let view = json_stdout(medcompare(&data).args(["compare", "--json"]));
    let pairings = view["pairings"].as_array().unwrap();
    assert!(!pairings.is_empty());
    let costs: Vec<f64> = pairings
        .iter()
        .map(|p| p["annual_cost"].as_f64().unwrap())
        .collect();
    assert!(costs.windows(2).all(|w| w[0] <= w[1]), "{costs:?}");
    assert_eq!(view["medicines"], serde_json::json!(["Metformin", "Januvia", "Ozempic"]));
}

#[test]
fn test_compare_desc_order_reverses_sort() {
    let data = data_dir();
    let view = json_stdout(medcompare(&data).args(["compare", "--json", "--order", "desc"]));
    let costs: Vec<f64> = view["pairings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["annual_cost"].as_f64().unwrap())
        .collect();
    assert!(costs.windows(2).all(|w| w[0] >= w[1]), "{costs:?}");
}

#[test]
fn test_compare_for_one_medicine_includes_cash_price() {
    let data = data_dir();
    let view = json_stdout(medcompare(&data).args(["compare", "--json", "-m", "Metformin"]));
    let pairings = view["pairings"].as_array().unwrap();
    assert!(pairings.iter().all(|p| p["medicine_name"] == "Metformin"));
    assert!(pairings.iter().any(|p| p["is_cash"] == true));
    assert_eq!(view["selected_medicine"], "Metformin");
}

#[test]
fn test_compare_with_both_names_shows_current_selection() {
    let data = data_dir();
    let view = json_stdout(medcompare(&data).args([
        "compare",
        "--json",
        "--medicine",
        "Januvia",
        "--insurance",
        "Aetna",
    ]));
    assert_eq!(view["current"]["insurance"]["insurance_name"], "Aetna");
    let pairings = view["pairings"].as_array().unwrap();
    assert!(
        pairings
            .iter()
            .all(|p| !(p["medicine_name"] == "Januvia" && p["insurance_name"] == "Aetna"))
    );
}

#[test]
fn test_compare_human_output_has_table() {
    let data = data_dir();
    medcompare(&data)
        .args(["compare", "--insurance", "Cigna"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MEDICINES UNDER CIGNA"))
        .stdout(predicate::str::contains("Metformin"));
}

#[test]
fn test_compare_unknown_medicine_is_an_error() {
    let data = data_dir();
    let assert = medcompare(&data)
        .args(["--json", "compare", "--medicine", "Aspirin"])
        .assert()
        .code(1);
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["code"], "invalid_selection");
    assert!(value["message"].as_str().unwrap().contains("Aspirin"));
}

#[test]
fn test_missing_catalog_names_the_files() {
    let empty = TempDir::new().unwrap();
    medcompare(&empty)
        .arg("compare")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("medicines.csv"));
}

// --- report ---

#[test]
fn test_report_prints_all_sections() {
    let data = data_dir();
    medcompare(&data)
        .args(["report", "--medicine", "Januvia", "--insurance", "Cigna"])
        .assert()
        .success()
        .stdout(predicate::str::contains("YOUR CURRENT SELECTION DETAILS"))
        .stdout(predicate::str::contains("Not specifically listed").not())
        .stdout(predicate::str::contains("Aetna"));
}

#[test]
fn test_report_json_has_recommendations() {
    let data = data_dir();
    let report = json_stdout(medcompare(&data).args([
        "report",
        "--json",
        "-m",
        "Januvia",
        "-i",
        "Cigna",
    ]));
    assert_eq!(report["selection"]["medicine"]["medicine_name"], "Januvia");
    assert!(report["recommendations"].is_object());
    let plans = report["plan_comparison"].as_array().unwrap();
    assert!(plans.iter().all(|p| p["insurance"]["insurance_name"] != "Cigna"));
}

// --- coverage ---

#[test]
fn test_coverage_json_summarises_table() {
    let data = data_dir();
    let report = json_stdout(medcompare(&data).args(["coverage", "--json"]));
    assert_eq!(report["rows"], 4);
    assert_eq!(report["insurances"], serde_json::json!(["Aetna", "Cigna"]));
    assert_eq!(report["sample"].as_array().unwrap().len(), 2);
}

#[test]
fn test_coverage_human_output() {
    let data = data_dir();
    medcompare(&data)
        .arg("coverage")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unique medicines:"))
        .stdout(predicate::str::contains("covered=Yes"));
}

#[test]
fn test_data_dir_from_environment() {
    let data = data_dir();
    Command::new(assert_cmd::cargo::cargo_bin!("medcompare"))
        .env("MEDCOMPARE_DATA_DIR", data.path())
        .args(["coverage", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rows\": 4"));
}
