//! Medicine × plan pairings and their ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::cost::{MONTHS_PER_YEAR, annual_cost, tier_number};
use crate::types::{Coverage, InsurancePlan, Medicine};

/// Label of the synthetic cash-price row.
pub const GOODRX_LABEL: &str = "GoodRx (CVS - DC)";

/// One medicine priced under one plan (or under cash for the GoodRx row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pairing {
    pub medicine_name: String,
    pub insurance_name: String,
    pub medicine: Medicine,
    pub insurance: Option<InsurancePlan>,
    pub coverage: Option<Coverage>,
    pub annual_cost: f64,
    pub monthly_cost: f64,
    /// Uninsured monthly price the savings are measured against.
    pub full_monthly: f64,
    pub full_annual: f64,
    pub goodrx_price: Option<f64>,
    pub goodrx_eligible: bool,
    /// Annual price without prior authorisation.
    pub unauth_annual: Option<f64>,
    pub copay_amount: Option<f64>,
    pub monthly_savings: Option<f64>,
    pub annual_savings: Option<f64>,
    #[serde(default)]
    pub is_cash: bool,
    #[serde(default)]
    pub is_higher_tier: bool,
}

/// Which pairings to build. `None` means "all".
#[derive(Debug, Clone, Copy, Default)]
pub struct PairingFilter<'a> {
    pub medicine: Option<&'a str>,
    pub insurance: Option<&'a str>,
}

/// Column to order pairings by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Annual,
    Monthly,
    Medicine,
    Insurance,
    Savings,
}

impl SortKey {
    /// Lenient parse used for form input: anything unknown sorts by annual cost.
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.unwrap_or_default() {
            "monthly" => Self::Monthly,
            "medicine" => Self::Medicine,
            "insurance" => Self::Insurance,
            "savings" => Self::Savings,
            _ => Self::Annual,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        if raw == Some("desc") { Self::Desc } else { Self::Asc }
    }
}

/// Build the pairings selected by `filter`.
///
/// Unknown names are skipped; callers validate selections first.
#[must_use]
pub fn build_pairings(catalog: &Catalog, filter: PairingFilter<'_>) -> Vec<Pairing> {
    let medicines = match filter.medicine {
        Some(m) => vec![m],
        None => catalog.medicine_names(),
    };
    let plans = match filter.insurance {
        Some(i) => vec![i],
        None => catalog.plan_names(),
    };
    let prefer_goodrx = filter.insurance.is_none();

    let mut out = Vec::with_capacity(medicines.len() * plans.len());
    for med in &medicines {
        let Some(medicine) = catalog.medicine(med) else {
            continue;
        };
        for ins in &plans {
            out.push(pair(catalog, medicine, ins, prefer_goodrx));
        }
    }
    out
}

fn pair(catalog: &Catalog, medicine: &Medicine, insurance: &str, prefer_goodrx: bool) -> Pairing {
    let plan = catalog.plan(insurance);
    let coverage = catalog.coverage(insurance, &medicine.medicine_name);
    let annual = annual_cost(medicine, plan, coverage, MONTHS_PER_YEAR);

    let full_monthly = match medicine.goodrx_price {
        Some(goodrx) if prefer_goodrx => goodrx,
        _ => medicine.average_cost_per_month.unwrap_or(0.0),
    };
    let full_annual = full_monthly * f64::from(MONTHS_PER_YEAR);
    let copay_amount = coverage.and_then(|c| c.copay_amount);

    Pairing {
        medicine_name: medicine.medicine_name.clone(),
        insurance_name: insurance.to_owned(),
        medicine: medicine.clone(),
        insurance: plan.cloned(),
        coverage: coverage.cloned(),
        annual_cost: annual,
        monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
        full_monthly,
        full_annual,
        goodrx_price: medicine.goodrx_price,
        goodrx_eligible: medicine.goodrx_price.is_some(),
        unauth_annual: None,
        copay_amount,
        monthly_savings: copay_amount.map(|copay| full_monthly - copay),
        annual_savings: Some(full_annual - annual),
        is_cash: false,
        is_higher_tier: false,
    }
}

/// Cash-price row offered when a medicine is chosen without a plan.
///
/// Returns `None` unless the medicine has a non-zero GoodRx price.
#[must_use]
pub fn goodrx_cash_row(medicine: &Medicine) -> Option<Pairing> {
    let goodrx = medicine.goodrx_price.filter(|p| p.abs() > 0.0)?;
    let annual = annual_cost(medicine, None, None, MONTHS_PER_YEAR);
    Some(Pairing {
        medicine_name: medicine.medicine_name.clone(),
        insurance_name: GOODRX_LABEL.to_owned(),
        medicine: medicine.clone(),
        insurance: None,
        coverage: None,
        annual_cost: annual,
        monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
        full_monthly: goodrx,
        full_annual: goodrx * f64::from(MONTHS_PER_YEAR),
        goodrx_price: Some(goodrx),
        goodrx_eligible: true,
        unauth_annual: None,
        copay_amount: None,
        monthly_savings: None,
        annual_savings: None,
        is_cash: true,
        is_higher_tier: false,
    })
}

/// Flag pairings whose tier is above the selected medicine's tier on the
/// same plan.
pub fn flag_higher_tiers(catalog: &Catalog, selected_medicine: &str, pairings: &mut [Pairing]) {
    for p in pairings {
        let selected_tier = catalog
            .coverage(&p.insurance_name, selected_medicine)
            .and_then(|c| tier_number(c.tier_level.as_deref()));
        let own_tier = p
            .coverage
            .as_ref()
            .and_then(|c| tier_number(c.tier_level.as_deref()));
        p.is_higher_tier = matches!((own_tier, selected_tier), (Some(own), Some(sel)) if own > sel);
    }
}

/// Stable sort; equal keys keep their relative order in both directions.
pub fn sort_pairings(pairings: &mut [Pairing], key: SortKey, order: SortOrder) {
    pairings.sort_by(|a, b| {
        let ord = compare_by(a, b, key);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

fn compare_by(a: &Pairing, b: &Pairing, key: SortKey) -> Ordering {
    match key {
        SortKey::Medicine => a
            .medicine_name
            .to_lowercase()
            .cmp(&b.medicine_name.to_lowercase()),
        SortKey::Insurance => a
            .insurance_name
            .to_lowercase()
            .cmp(&b.insurance_name.to_lowercase()),
        SortKey::Monthly => a.monthly_cost.total_cmp(&b.monthly_cost),
        SortKey::Annual => a.annual_cost.total_cmp(&b.annual_cost),
        SortKey::Savings => {
            let a = a.annual_savings.unwrap_or(f64::NEG_INFINITY);
            let b = b.annual_savings.unwrap_or(f64::NEG_INFINITY);
            a.total_cmp(&b)
        }
    }
}
