//! Pricing rules shared by the terminal tool and the HTTP app.

use crate::types::{Coverage, InsurancePlan, Medicine};

/// Months in a cost year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Total cost of taking `medicine` for `months` under an optional plan.
///
/// Coverage only counts when its `covered` flag says yes. Without it the
/// patient pays cash: the GoodRx price when there is no plan context at all,
/// otherwise the average list price. With coverage the cost is the plan
/// deductible plus the monthly copay.
#[must_use]
pub fn annual_cost(
    medicine: &Medicine,
    plan: Option<&InsurancePlan>,
    coverage: Option<&Coverage>,
    months: u32,
) -> f64 {
    let months = f64::from(months);
    let Some(coverage) = coverage.filter(|c| c.is_covered()) else {
        if plan.is_none() {
            if let Some(goodrx) = medicine.goodrx_price {
                return goodrx * months;
            }
        }
        return medicine.average_cost_per_month.unwrap_or(0.0) * months;
    };

    let copay = coverage.copay_amount.unwrap_or(0.0);
    let deductible = plan.and_then(|p| p.deductible).unwrap_or(0.0);
    deductible + copay * months
}

/// Render a dollar amount: whole numbers lose their decimals, everything else
/// gets two. Missing values render empty.
#[must_use]
pub fn format_money(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.is_nan() => String::new(),
        Some(v) if (v - v.trunc()).abs() < 1e-9 => format!("{v:.0}"),
        Some(v) => format!("{v:.2}"),
    }
}

/// Numeric tier from labels such as `Tier 2`.
#[must_use]
pub fn tier_number(label: Option<&str>) -> Option<i64> {
    let label = label?.trim();
    if label.is_empty() {
        return None;
    }
    label.to_lowercase().replace("tier", "").trim().parse().ok()
}
