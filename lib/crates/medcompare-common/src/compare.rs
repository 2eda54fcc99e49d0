//! The comparison page: selection handling, the "have you tried" walk-through,
//! and the resulting pairing list.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CoverageMap};
use crate::cost::{MONTHS_PER_YEAR, annual_cost};
use crate::error::CompareError;
use crate::pairing::{
    Pairing, PairingFilter, SortKey, SortOrder, build_pairings, flag_higher_tiers,
    goodrx_cash_row, sort_pairings,
};
use crate::types::{Coverage, InsurancePlan, Medicine};

/// Annual price charged by a plan when prior authorisation is not obtained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnauthorizedCost {
    pub insurance_name: String,
    pub medicine_name: String,
    pub annual: f64,
}

/// Static inputs to the comparison page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonRules {
    /// Medicines asked about, in order, by the "have you tried" walk-through.
    pub trial_sequence: Vec<String>,
    pub unauthorized_costs: Vec<UnauthorizedCost>,
}

impl Default for ComparisonRules {
    fn default() -> Self {
        let unauthorized = |insurance: &str, medicine: &str, annual: f64| UnauthorizedCost {
            insurance_name: insurance.to_owned(),
            medicine_name: medicine.to_owned(),
            annual,
        };
        Self {
            trial_sequence: [
                "Metformin",
                "Glipizide",
                "Invokana",
                "Januvia",
                "Tirzepatide",
                "Semaglutide",
                "Jardiance",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
            unauthorized_costs: vec![
                unauthorized("Cigna", "Empagliflozin", 811.0),
                unauthorized("Cigna", "Januvia", 721.0),
            ],
        }
    }
}

impl ComparisonRules {
    #[must_use]
    pub fn unauthorized_annual(&self, insurance: &str, medicine: &str) -> Option<f64> {
        self.unauthorized_costs
            .iter()
            .find(|u| u.insurance_name == insurance && u.medicine_name == medicine)
            .map(|u| u.annual)
    }
}

/// Answer to one "have you tried X?" question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrialAnswer {
    /// Position in the trial sequence the answer refers to.
    #[serde(default)]
    pub index: usize,
    /// `no` selects the medicine; anything else moves on to the next one.
    pub answer: String,
}

/// A submitted comparison form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComparisonRequest {
    pub medicine: Option<String>,
    pub insurance: Option<String>,
    /// The patient has already tried the selected medicine.
    pub tried: bool,
    pub sort_by: SortKey,
    pub order: SortOrder,
    /// Present when the request comes from the walk-through form.
    pub trial: Option<TrialAnswer>,
}

/// The exact selection, priced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentSelection {
    pub medicine: Medicine,
    pub insurance: InsurancePlan,
    pub coverage: Option<Coverage>,
    pub annual_cost: f64,
    pub monthly_cost: f64,
}

/// Everything the comparison page shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonView {
    pub medicines: Vec<String>,
    pub insurances: Vec<String>,
    pub selected_medicine: Option<String>,
    pub selected_insurance: Option<String>,
    pub current: Option<CurrentSelection>,
    pub pairings: Vec<Pairing>,
    pub coverage_map: CoverageMap,
    /// Next walk-through question, when one is pending.
    pub trial_question: Option<String>,
    pub trial_index: usize,
    pub trial_sequence: Vec<String>,
}

/// Where the walk-through leaves the request.
enum TrialStep {
    /// Not a walk-through submission.
    None,
    /// The patient has not tried this medicine (or ran off the end of the list).
    Select(Option<String>),
    /// Ask about the next medicine; build nothing yet.
    Ask,
    /// Every medicine has been tried: show everything.
    ShowAll,
}

/// Build the comparison page for `request`; `None` renders the empty form.
pub fn compare(
    catalog: &Catalog,
    rules: &ComparisonRules,
    request: Option<&ComparisonRequest>,
) -> Result<ComparisonView, CompareError> {
    let mut view = ComparisonView {
        medicines: owned(catalog.medicine_names()),
        insurances: owned(catalog.plan_names()),
        selected_medicine: None,
        selected_insurance: None,
        current: None,
        pairings: Vec::new(),
        coverage_map: catalog.coverage_map(),
        trial_question: None,
        trial_index: 0,
        trial_sequence: rules.trial_sequence.clone(),
    };
    let Some(request) = request else {
        return Ok(view);
    };

    let step = match &request.trial {
        None => TrialStep::None,
        Some(trial) => {
            let mut index = trial.index;
            let step = if trial.answer.trim().eq_ignore_ascii_case("no") {
                TrialStep::Select(rules.trial_sequence.get(index).cloned())
            } else {
                index += 1;
                match rules.trial_sequence.get(index) {
                    Some(next) => {
                        view.trial_question = Some(next.clone());
                        TrialStep::Ask
                    }
                    None => TrialStep::ShowAll,
                }
            };
            view.trial_index = index;
            step
        }
    };

    let trial_medicine = match &step {
        TrialStep::Select(m) => m.clone(),
        _ => None,
    };
    let medicine = trial_medicine.or_else(|| non_blank(request.medicine.as_deref()));
    let insurance = non_blank(request.insurance.as_deref());

    if let Some(m) = &medicine {
        if catalog.medicine(m).is_none() {
            return Err(CompareError::UnknownMedicine(m.clone()));
        }
    }
    if let Some(i) = &insurance {
        if catalog.plan(i).is_none() {
            return Err(CompareError::UnknownInsurance(i.clone()));
        }
    }
    view.selected_medicine.clone_from(&medicine);
    view.selected_insurance.clone_from(&insurance);

    if matches!(step, TrialStep::Ask) {
        return Ok(view);
    }

    let mut pairings = match (medicine.as_deref(), insurance.as_deref()) {
        (Some(med), Some(ins)) => {
            view.current = current_selection(catalog, med, ins);
            let mut all_for_med = build_pairings(
                catalog,
                PairingFilter {
                    medicine: Some(med),
                    insurance: None,
                },
            );
            all_for_med.retain(|p| !(p.medicine_name == med && p.insurance_name == ins));
            all_for_med
        }
        (med, ins) => {
            let filter = if matches!(step, TrialStep::ShowAll) {
                PairingFilter::default()
            } else {
                PairingFilter {
                    medicine: med,
                    insurance: ins,
                }
            };
            let mut pairings = build_pairings(catalog, filter);
            if let (Some(med), None) = (med, ins) {
                if let Some(cash) = catalog.medicine(med).and_then(goodrx_cash_row) {
                    pairings.insert(0, cash);
                }
            }
            pairings
        }
    };

    if request.tried {
        if let Some(med) = medicine.as_deref() {
            flag_higher_tiers(catalog, med, &mut pairings);
        }
    }
    for p in &mut pairings {
        p.unauth_annual = rules
            .unauthorized_annual(&p.insurance_name, &p.medicine_name)
            .or(Some(p.full_annual));
    }
    sort_pairings(&mut pairings, request.sort_by, request.order);

    view.pairings = pairings;
    Ok(view)
}

fn current_selection(catalog: &Catalog, medicine: &str, insurance: &str) -> Option<CurrentSelection> {
    let med = catalog.medicine(medicine)?;
    let plan = catalog.plan(insurance)?;
    let coverage = catalog.coverage(insurance, medicine);
    let annual = annual_cost(med, Some(plan), coverage, MONTHS_PER_YEAR);
    Some(CurrentSelection {
        medicine: med.clone(),
        insurance: plan.clone(),
        coverage: coverage.cloned(),
        annual_cost: annual,
        monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_owned).collect()
}
