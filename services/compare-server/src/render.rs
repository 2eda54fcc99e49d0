//! Server-side HTML for the comparison page.

use askama::Template;
use axum::response::Html;
use medcompare_common::{
    ComparisonRequest, ComparisonView, Coverage, Pairing, SortKey, SortOrder, format_money,
};

const SORT_KEYS: [(SortKey, &str, &str); 5] = [
    (SortKey::Annual, "annual", "Annual cost"),
    (SortKey::Monthly, "monthly", "Monthly cost"),
    (SortKey::Medicine, "medicine", "Medicine"),
    (SortKey::Insurance, "insurance", "Insurance"),
    (SortKey::Savings, "savings", "Savings"),
];

const ORDERS: [(SortOrder, &str, &str); 2] = [
    (SortOrder::Asc, "asc", "Ascending"),
    (SortOrder::Desc, "desc", "Descending"),
];

/// The comparison page. Values are escaped by the template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    error: Option<&'a str>,
    trial_question: Option<&'a str>,
    trial_index: usize,
    medicines: Vec<SelectOption<'a>>,
    insurances: Vec<SelectOption<'a>>,
    sort_keys: Vec<SelectOption<'a>>,
    orders: Vec<SelectOption<'a>>,
    tried: bool,
    current: Option<CurrentRow<'a>>,
    rows: Vec<PairingRow<'a>>,
    coverage_json: String,
}

/// One `<option>` of a dropdown.
pub struct SelectOption<'a> {
    value: &'a str,
    label: &'a str,
    selected: bool,
}

/// The priced exact selection.
pub struct CurrentRow<'a> {
    medicine: &'a str,
    insurance: &'a str,
    covered: &'static str,
    tier: &'a str,
    annual: String,
    monthly: String,
}

/// One line of the pairings table, formatted for display.
pub struct PairingRow<'a> {
    medicine: &'a str,
    insurance: &'a str,
    annual: String,
    monthly: String,
    full_monthly: String,
    copay: String,
    savings: String,
    unauth: String,
    notes: String,
    higher_tier: bool,
}

/// `$25`, `$25.50`, or `-` when there is no value.
pub fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", format_money(Some(v))),
        None => "-".to_string(),
    }
}

impl<'a> IndexTemplate<'a> {
    /// Build the page for `view`. `request` restores the submitted form state;
    /// `error` is shown above the forms.
    pub fn new(
        view: &'a ComparisonView,
        request: Option<&ComparisonRequest>,
        error: Option<&'a str>,
    ) -> Self {
        let sort_by = request.map_or(SortKey::Annual, |r| r.sort_by);
        let order = request.map_or(SortOrder::Asc, |r| r.order);
        let has_results = view.current.is_some() || !view.pairings.is_empty();

        let trial_question = if has_results {
            None
        } else {
            view.trial_question
                .as_deref()
                .or_else(|| view.trial_sequence.get(view.trial_index).map(String::as_str))
        };

        Self {
            error,
            trial_question,
            trial_index: view.trial_index,
            medicines: name_options(&view.medicines, view.selected_medicine.as_deref()),
            insurances: name_options(&view.insurances, view.selected_insurance.as_deref()),
            sort_keys: SORT_KEYS
                .into_iter()
                .map(|(key, value, label)| SelectOption {
                    value,
                    label,
                    selected: key == sort_by,
                })
                .collect(),
            orders: ORDERS
                .into_iter()
                .map(|(o, value, label)| SelectOption {
                    value,
                    label,
                    selected: o == order,
                })
                .collect(),
            tried: request.is_some_and(|r| r.tried),
            current: view.current.as_ref().map(|c| CurrentRow {
                medicine: &c.medicine.medicine_name,
                insurance: &c.insurance.insurance_name,
                covered: if c.coverage.as_ref().is_some_and(Coverage::is_covered) {
                    "Yes"
                } else {
                    "No"
                },
                tier: c
                    .coverage
                    .as_ref()
                    .and_then(|cov| cov.tier_level.as_deref())
                    .unwrap_or("-"),
                annual: money(Some(c.annual_cost)),
                monthly: money(Some(c.monthly_cost)),
            }),
            rows: view.pairings.iter().map(PairingRow::from).collect(),
            coverage_json: serde_json::to_string(&view.coverage_map)
                .unwrap_or_else(|_| "{}".to_string())
                .replace("</", "<\\/"),
        }
    }
}

impl<'a> From<&'a Pairing> for PairingRow<'a> {
    fn from(p: &'a Pairing) -> Self {
        let mut notes = Vec::new();
        if p.is_cash {
            notes.push("cash price");
        }
        if p.is_higher_tier {
            notes.push("higher tier");
        }
        Self {
            medicine: &p.medicine_name,
            insurance: &p.insurance_name,
            annual: money(Some(p.annual_cost)),
            monthly: money(Some(p.monthly_cost)),
            full_monthly: money(Some(p.full_monthly)),
            copay: money(p.copay_amount),
            savings: money(p.annual_savings),
            unauth: money(p.unauth_annual),
            notes: notes.join(", "),
            higher_tier: p.is_higher_tier,
        }
    }
}

fn name_options<'a>(names: &'a [String], selected: Option<&str>) -> Vec<SelectOption<'a>> {
    names
        .iter()
        .map(|name| SelectOption {
            value: name,
            label: name,
            selected: selected == Some(name.as_str()),
        })
        .collect()
}

/// Render the page for `view`.
pub fn page(
    view: &ComparisonView,
    request: Option<&ComparisonRequest>,
    error: Option<&str>,
) -> askama::Result<Html<String>> {
    IndexTemplate::new(view, request, error).render().map(Html)
}
