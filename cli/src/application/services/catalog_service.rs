//! Application service — catalog lookups shaped for the terminal tool.

use std::path::{Path, PathBuf};

use medcompare_common::{Catalog, Coverage, CoverageStats};
use serde::Serialize;

/// Rows shown in the coverage preview.
pub const PREVIEW_ROWS: usize = 10;
/// Medicines shown in the coverage map sample.
pub const SAMPLE_MEDICINES: usize = 2;

/// A selectable name annotated with whether the counterpart selection covers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub name: String,
    /// `None` when there is no counterpart selection to check against.
    pub covered: Option<bool>,
}

fn says_yes(coverage: Option<&Coverage>) -> bool {
    coverage.is_some_and(Coverage::says_yes)
}

/// Medicine names, annotated with coverage under `insurance` when given.
#[must_use]
pub fn medicine_choices(catalog: &Catalog, insurance: Option<&str>) -> Vec<Choice> {
    catalog
        .medicine_names()
        .into_iter()
        .map(|name| Choice {
            name: name.to_string(),
            covered: insurance.map(|ins| says_yes(catalog.coverage(ins, name))),
        })
        .collect()
}

/// Plan names, annotated with whether each covers `medicine` when given.
#[must_use]
pub fn plan_choices(catalog: &Catalog, medicine: Option<&str>) -> Vec<Choice> {
    catalog
        .plan_names()
        .into_iter()
        .map(|name| Choice {
            name: name.to_string(),
            covered: medicine.map(|med| says_yes(catalog.coverage(name, med))),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SamplePlan {
    pub insurance: String,
    pub covered: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleEntry {
    pub medicine: String,
    pub plans: Vec<SamplePlan>,
}

/// Inspection summary of the coverage table.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub source: PathBuf,
    #[serde(flatten)]
    pub stats: CoverageStats,
    pub preview: Vec<Coverage>,
    pub sample: Vec<SampleEntry>,
}

/// Build the coverage inspection report for a loaded catalog.
#[must_use]
pub fn coverage_report(catalog: &Catalog, source: &Path) -> CoverageReport {
    let stats = catalog.coverage_stats();
    let rows = catalog.coverage_rows();
    let sample = stats
        .medicines
        .iter()
        .take(SAMPLE_MEDICINES)
        .map(|medicine| SampleEntry {
            medicine: medicine.clone(),
            plans: rows
                .iter()
                .filter(|r| &r.medicine_name == medicine)
                .map(|r| SamplePlan {
                    insurance: r.insurance_name.clone(),
                    covered: r.covered.clone(),
                })
                .collect(),
        })
        .collect();

    CoverageReport {
        source: source.to_path_buf(),
        preview: rows.iter().take(PREVIEW_ROWS).cloned().collect(),
        stats,
        sample,
    }
}
