//! CSV-backed catalog of medicines, insurance plans and their coverage.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::types::{Coverage, CoverageSummary, InsurancePlan, Medicine};

pub const MEDICINES_FILE: &str = "medicines.csv";
pub const INSURANCE_FILE: &str = "insurance.csv";
pub const COVERAGE_FILE: &str = "insurance_medicine_coverage.csv";

/// `medicine -> insurance -> coverage` lookup handed to clients.
pub type CoverageMap = BTreeMap<String, BTreeMap<String, CoverageSummary>>;

/// In-memory copy of the three CSV tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    medicines: Vec<Medicine>,
    plans: Vec<InsurancePlan>,
    coverage: Vec<Coverage>,
    /// Header row of the coverage file, as read.
    coverage_columns: Vec<String>,
}

/// Columns a coverage file must provide.
const COVERAGE_COLUMNS: [&str; 5] =
    ["insurance_name", "medicine_name", "covered", "copay_amount", "tier_level"];

/// Shape summary of the coverage table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CoverageStats {
    pub rows: usize,
    pub columns: Vec<String>,
    pub medicines: Vec<String>,
    pub insurances: Vec<String>,
    pub covered_values: Vec<String>,
}

impl Catalog {
    /// Build a catalog from already-parsed rows.
    #[must_use]
    pub fn new(medicines: Vec<Medicine>, plans: Vec<InsurancePlan>, coverage: Vec<Coverage>) -> Self {
        Self {
            medicines,
            plans,
            coverage,
            coverage_columns: COVERAGE_COLUMNS.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    /// Load `medicines.csv`, `insurance.csv` and `insurance_medicine_coverage.csv`
    /// from `dir`.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let open = |name: &str| -> Result<File, CatalogError> {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(CatalogError::MissingFile {
                    path,
                    dir: dir.to_path_buf(),
                });
            }
            File::open(&path).map_err(|source| CatalogError::Io {
                file: name.to_owned(),
                source,
            })
        };
        let medicines = open(MEDICINES_FILE)?;
        let plans = open(INSURANCE_FILE)?;
        let coverage = open(COVERAGE_FILE)?;
        Self::from_readers(medicines, plans, coverage)
    }

    /// Parse the three tables from arbitrary readers.
    pub fn from_readers(
        medicines: impl Read,
        plans: impl Read,
        coverage: impl Read,
    ) -> Result<Self, CatalogError> {
        let (_, medicines) = read_rows(medicines, MEDICINES_FILE)?;
        let (_, plans) = read_rows(plans, INSURANCE_FILE)?;
        let (coverage_columns, coverage) = read_rows(coverage, COVERAGE_FILE)?;
        Ok(Self {
            medicines,
            plans,
            coverage,
            coverage_columns,
        })
    }

    #[must_use]
    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    #[must_use]
    pub fn plans(&self) -> &[InsurancePlan] {
        &self.plans
    }

    #[must_use]
    pub fn coverage_rows(&self) -> &[Coverage] {
        &self.coverage
    }

    /// First medicine row with this exact name.
    #[must_use]
    pub fn medicine(&self, name: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.medicine_name == name)
    }

    /// First plan row with this exact name.
    #[must_use]
    pub fn plan(&self, name: &str) -> Option<&InsurancePlan> {
        self.plans.iter().find(|p| p.insurance_name == name)
    }

    /// First coverage row for the plan/medicine pair.
    #[must_use]
    pub fn coverage(&self, insurance: &str, medicine: &str) -> Option<&Coverage> {
        self.coverage
            .iter()
            .find(|c| c.insurance_name == insurance && c.medicine_name == medicine)
    }

    /// Medicine names, de-duplicated, in file order.
    #[must_use]
    pub fn medicine_names(&self) -> Vec<&str> {
        unique(self.medicines.iter().map(|m| m.medicine_name.as_str()))
    }

    /// Plan names, de-duplicated, in file order.
    #[must_use]
    pub fn plan_names(&self) -> Vec<&str> {
        unique(self.plans.iter().map(|p| p.insurance_name.as_str()))
    }

    /// Nested coverage lookup. Later rows for the same pair win.
    #[must_use]
    pub fn coverage_map(&self) -> CoverageMap {
        let mut map = CoverageMap::new();
        for row in &self.coverage {
            map.entry(row.medicine_name.clone())
                .or_default()
                .insert(row.insurance_name.clone(), CoverageSummary::from(row));
        }
        map
    }

    #[must_use]
    pub fn coverage_stats(&self) -> CoverageStats {
        let mut seen = BTreeSet::new();
        let covered_values = self
            .coverage
            .iter()
            .map(|c| c.covered.clone().unwrap_or_default())
            .filter(|v| seen.insert(v.clone()))
            .collect();
        CoverageStats {
            rows: self.coverage.len(),
            columns: self.coverage_columns.clone(),
            medicines: unique(self.coverage.iter().map(|c| c.medicine_name.as_str()))
                .into_iter()
                .map(str::to_owned)
                .collect(),
            insurances: unique(self.coverage.iter().map(|c| c.insurance_name.as_str()))
                .into_iter()
                .map(str::to_owned)
                .collect(),
            covered_values,
        }
    }
}

/// Header names and deserialized rows of one table.
fn read_rows<T: DeserializeOwned>(
    reader: impl Read,
    file: &str,
) -> Result<(Vec<String>, Vec<T>), CatalogError> {
    let csv_error = |source| CatalogError::Csv {
        file: file.to_owned(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_owned)
        .collect();
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_error)?;
    Ok((headers, rows))
}

fn unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    names.filter(|n| seen.insert(*n)).collect()
}
