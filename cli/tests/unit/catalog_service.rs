//! Unit tests for the catalog lookups used by `explore` and `coverage`.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use medcompare_cli::application::services::catalog_service::{
    PREVIEW_ROWS, coverage_report, medicine_choices, plan_choices,
};
use medcompare_common::Catalog;

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
Aetna,Januvia,yes,45,Tier 3
Cigna,Januvia,No,,
Cigna,Metformin,Yes,10,Tier 1
";

fn catalog() -> Catalog {
    Catalog::from_readers(MEDICINES.as_bytes(), PLANS.as_bytes(), COVERAGE.as_bytes()).unwrap()
}

#[test]
fn test_choices_without_counterpart_are_unannotated() {
    let catalog = catalog();
    let medicines = medicine_choices(&catalog, None);
    let names: Vec<&str> = medicines.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Metformin", "Januvia", "Ozempic"]);
    assert!(medicines.iter().all(|c| c.covered.is_none()));
}

#[test]
fn test_plan_choices_flag_coverage_of_selected_medicine() {
    let catalog = catalog();
    let plans = plan_choices(&catalog, Some("Metformin"));
    assert_eq!(plans[0].covered, Some(true));
    assert_eq!(plans[1].covered, Some(true));

    let plans = plan_choices(&catalog, Some("Januvia"));
    assert_eq!(plans[1].name, "Cigna");
    assert_eq!(plans[1].covered, Some(false));
}

#[test]
fn test_medicine_choices_need_exact_yes_and_a_row() {
    let catalog = catalog();
    let medicines = medicine_choices(&catalog, Some("Aetna"));
    let covered: Vec<Option<bool>> = medicines.iter().map(|c| c.covered).collect();
    // "yes" is not "Yes"; Ozempic has no row at all.
    assert_eq!(covered, [Some(true), Some(false), Some(false)]);
}

#[test]
fn test_coverage_report_summarises_the_table() {
    let report = coverage_report(&catalog(), Path::new("data/insurance_medicine_coverage.csv"));
    assert_eq!(report.stats.rows, 4);
    assert_eq!(report.stats.medicines, ["Metformin", "Januvia"]);
    assert_eq!(report.stats.insurances, ["Aetna", "Cigna"]);
    assert!(report.preview.len() <= PREVIEW_ROWS);
    assert_eq!(report.sample.len(), 2);
    assert_eq!(report.sample[0].medicine, "Metformin");
    assert_eq!(report.sample[0].plans.len(), 2);
}
