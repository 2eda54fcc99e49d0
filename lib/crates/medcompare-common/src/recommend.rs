//! Side-by-side reports and cheaper-alternative recommendations for one
//! medicine/plan selection.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::cost::{MONTHS_PER_YEAR, annual_cost};
use crate::error::CompareError;
use crate::types::{Coverage, InsurancePlan, Medicine};

/// How many alternatives of each kind a recommendation lists.
pub const MAX_ALTERNATIVES: usize = 5;

/// Full details of the current medicine/plan selection.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionDetails {
    pub medicine: Medicine,
    pub insurance: InsurancePlan,
    pub coverage: Option<Coverage>,
    pub annual_cost: f64,
    pub monthly_cost: f64,
}

/// A medicine priced under a fixed plan.
#[derive(Debug, Clone, Serialize)]
pub struct MedicineRow {
    pub medicine: Medicine,
    pub annual_cost: f64,
}

/// A plan priced for a fixed medicine.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRow {
    pub insurance: InsurancePlan,
    pub annual_cost: f64,
    pub covers_medicine: bool,
}

/// An alternative and what switching to it saves per year (negative = costs more).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Alternative {
    pub name: String,
    pub annual_cost: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub current_cost: f64,
    pub medicines: Vec<Alternative>,
    pub plans: Vec<Alternative>,
}

/// Everything the terminal report prints for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub selection: SelectionDetails,
    pub medicine_comparison: Vec<MedicineRow>,
    pub plan_comparison: Vec<PlanRow>,
    pub recommendations: Recommendations,
}

fn lookup<'a>(
    catalog: &'a Catalog,
    medicine: &str,
    insurance: &str,
) -> Result<(&'a Medicine, &'a InsurancePlan), CompareError> {
    let med = catalog
        .medicine(medicine)
        .ok_or_else(|| CompareError::UnknownMedicine(medicine.to_owned()))?;
    let plan = catalog
        .plan(insurance)
        .ok_or_else(|| CompareError::UnknownInsurance(insurance.to_owned()))?;
    Ok((med, plan))
}

pub fn selection_details(
    catalog: &Catalog,
    medicine: &str,
    insurance: &str,
) -> Result<SelectionDetails, CompareError> {
    let (med, plan) = lookup(catalog, medicine, insurance)?;
    let coverage = catalog.coverage(insurance, medicine);
    let annual = annual_cost(med, Some(plan), coverage, MONTHS_PER_YEAR);
    Ok(SelectionDetails {
        medicine: med.clone(),
        insurance: plan.clone(),
        coverage: coverage.cloned(),
        annual_cost: annual,
        monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
    })
}

/// Every medicine (except `exclude`) under `insurance`, cheapest first.
pub fn medicine_comparison(
    catalog: &Catalog,
    insurance: &str,
    exclude: Option<&str>,
) -> Result<Vec<MedicineRow>, CompareError> {
    let plan = catalog
        .plan(insurance)
        .ok_or_else(|| CompareError::UnknownInsurance(insurance.to_owned()))?;
    let mut rows: Vec<MedicineRow> = catalog
        .medicines()
        .iter()
        .filter(|m| Some(m.medicine_name.as_str()) != exclude)
        .map(|m| MedicineRow {
            medicine: m.clone(),
            annual_cost: annual_cost(
                m,
                Some(plan),
                catalog.coverage(insurance, &m.medicine_name),
                MONTHS_PER_YEAR,
            ),
        })
        .collect();
    rows.sort_by(|a, b| a.annual_cost.total_cmp(&b.annual_cost));
    Ok(rows)
}

/// Every plan (except `exclude`) for `medicine`, cheapest first.
pub fn plan_comparison(
    catalog: &Catalog,
    medicine: &str,
    exclude: Option<&str>,
) -> Result<Vec<PlanRow>, CompareError> {
    let med = catalog
        .medicine(medicine)
        .ok_or_else(|| CompareError::UnknownMedicine(medicine.to_owned()))?;
    let mut rows: Vec<PlanRow> = catalog
        .plans()
        .iter()
        .filter(|p| Some(p.insurance_name.as_str()) != exclude)
        .map(|p| {
            let coverage = catalog.coverage(&p.insurance_name, medicine);
            PlanRow {
                insurance: p.clone(),
                annual_cost: annual_cost(med, Some(p), coverage, MONTHS_PER_YEAR),
                covers_medicine: coverage.is_some_and(Coverage::says_yes),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.annual_cost.total_cmp(&b.annual_cost));
    Ok(rows)
}

/// Cheaper medicines of comparable effectiveness (no more than one point
/// worse) and cheaper plans, best savings first.
pub fn recommend(
    catalog: &Catalog,
    medicine: &str,
    insurance: &str,
) -> Result<Recommendations, CompareError> {
    let (med, plan) = lookup(catalog, medicine, insurance)?;
    let current_cost = annual_cost(
        med,
        Some(plan),
        catalog.coverage(insurance, medicine),
        MONTHS_PER_YEAR,
    );

    let mut medicines: Vec<Alternative> = catalog
        .medicines()
        .iter()
        .filter(|m| m.medicine_name != medicine)
        .filter(|m| match (m.effectiveness_rating, med.effectiveness_rating) {
            (Some(alt), Some(cur)) => alt >= cur - 1.0,
            _ => false,
        })
        .map(|m| {
            let cost = annual_cost(
                m,
                Some(plan),
                catalog.coverage(insurance, &m.medicine_name),
                MONTHS_PER_YEAR,
            );
            Alternative {
                name: m.medicine_name.clone(),
                annual_cost: cost,
                savings: current_cost - cost,
            }
        })
        .collect();

    let mut plans: Vec<Alternative> = catalog
        .plans()
        .iter()
        .filter(|p| p.insurance_name != insurance)
        .map(|p| {
            let cost = annual_cost(
                med,
                Some(p),
                catalog.coverage(&p.insurance_name, medicine),
                MONTHS_PER_YEAR,
            );
            Alternative {
                name: p.insurance_name.clone(),
                annual_cost: cost,
                savings: current_cost - cost,
            }
        })
        .collect();

    for list in [&mut medicines, &mut plans] {
        list.sort_by(|a, b| b.savings.total_cmp(&a.savings));
        list.truncate(MAX_ALTERNATIVES);
    }

    Ok(Recommendations {
        current_cost,
        medicines,
        plans,
    })
}

/// Selection details, both comparisons and recommendations in one go.
pub fn report(catalog: &Catalog, medicine: &str, insurance: &str) -> Result<Report, CompareError> {
    Ok(Report {
        selection: selection_details(catalog, medicine, insurance)?,
        medicine_comparison: medicine_comparison(catalog, insurance, Some(medicine))?,
        plan_comparison: plan_comparison(catalog, medicine, Some(insurance))?,
        recommendations: recommend(catalog, medicine, insurance)?,
    })
}
