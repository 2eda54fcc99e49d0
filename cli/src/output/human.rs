//! Human-readable terminal renderer.

use std::path::Path;

use medcompare_common::recommend::{
    Alternative, MedicineRow, PlanRow, Recommendations, Report, SelectionDetails,
};
use medcompare_common::{ComparisonView, Coverage, Pairing, format_money};
use owo_colors::OwoColorize as _;

use crate::application::services::catalog_service::{Choice, CoverageReport};
use crate::domain::config::MedcompareConfig;
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;
use crate::output::table::Table;

const RULE_WIDTH: usize = 60;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("medcompare {version}");
    }

    fn section(&self, title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        println!();
        println!("{rule}");
        println!("{}", title.style(self.ctx.styles.header));
        println!("{rule}");
    }

    fn subsection(&self, title: &str) {
        println!();
        println!("{}", title.style(self.ctx.styles.bold));
        println!("{}", "-".repeat(RULE_WIDTH));
    }

    /// Render the comparison view produced by `compare`.
    pub fn render_view(&self, view: &ComparisonView) {
        if let Some(question) = &view.trial_question {
            self.ctx.info(&format!(
                "Have you tried {question}? ({} of {})",
                view.trial_index + 1,
                view.trial_sequence.len()
            ));
        }

        if let Some(current) = &view.current {
            self.section("YOUR CURRENT SELECTION");
            self.ctx.kv("Medicine:", &current.medicine.medicine_name);
            self.ctx.kv("Insurance:", &current.insurance.insurance_name);
            self.ctx
                .kv("Covered:", yes_no(current.coverage.as_ref().is_some_and(Coverage::is_covered)));
            if let Some(tier) = current.coverage.as_ref().and_then(|c| c.tier_level.as_deref()) {
                self.ctx.kv("Tier:", tier);
            }
            self.ctx.kv("Annual cost:", &money(current.annual_cost));
            self.ctx.kv("Monthly cost:", &money(current.monthly_cost));
        }

        if view.pairings.is_empty() {
            if view.trial_question.is_none() {
                self.ctx.info("No pairings match the selection.");
            }
            return;
        }
        let title = match (&view.selected_medicine, &view.selected_insurance) {
            (Some(med), Some(_)) => format!("OTHER PLANS FOR {}", med.to_uppercase()),
            (Some(med), None) => format!("PLANS FOR {}", med.to_uppercase()),
            (None, Some(ins)) => format!("MEDICINES UNDER {}", ins.to_uppercase()),
            (None, None) => "ALL MEDICINE AND PLAN PAIRINGS".to_string(),
        };
        self.section(&title);
        println!("{}", pairings_table(&view.pairings).render());
    }

    /// Render selection details, both comparisons and recommendations.
    pub fn render_report(&self, report: &Report) {
        self.render_selection(&report.selection);
        self.render_medicine_comparison(
            &report.selection.insurance.insurance_name,
            &report.medicine_comparison,
        );
        self.render_plan_comparison(
            &report.selection.medicine.medicine_name,
            &report.plan_comparison,
        );
        self.render_recommendations(&report.recommendations);
    }

    /// Render the details of the current medicine/plan selection.
    pub fn render_selection(&self, details: &SelectionDetails) {
        let med = &details.medicine;
        let plan = &details.insurance;
        self.section("YOUR CURRENT SELECTION DETAILS");

        self.subsection(&format!("MEDICINE: {}", med.medicine_name));
        let mut table = Table::default();
        table.push_row(["Type".to_string(), text(med.kind.as_deref())]);
        table.push_row([
            "Effectiveness Rating".to_string(),
            rating(med.effectiveness_rating),
        ]);
        table.push_row(["Possible Side Effects".to_string(), text(med.side_effects.as_deref())]);
        table.push_row([
            "Average Monthly Cost".to_string(),
            optional_money(med.average_cost_per_month),
        ]);
        println!("{}", table.render());

        self.subsection(&format!("INSURANCE: {}", plan.insurance_name));
        let mut table = Table::default();
        table.push_row(["Provider".to_string(), text(plan.provider.as_deref())]);
        table.push_row(["Primary Care Copay".to_string(), optional_money(plan.copay_primary_care)]);
        table.push_row(["Specialist Copay".to_string(), optional_money(plan.copay_specialist)]);
        table.push_row(["Emergency Copay".to_string(), optional_money(plan.copay_emergency)]);
        table.push_row(["Deductible".to_string(), optional_money(plan.deductible)]);
        table.push_row(["Annual Max Copay".to_string(), optional_money(plan.annual_max_copay)]);
        table.push_row(["Coverage Percentage".to_string(), percent(plan.coverage_percentage)]);
        println!("{}", table.render());

        self.subsection(&format!("COVERAGE FOR {}", med.medicine_name.to_uppercase()));
        println!("{}", coverage_table(details.coverage.as_ref()).render());

        println!();
        println!(
            "{} {}",
            "ESTIMATED ANNUAL COST:".style(self.ctx.styles.bold),
            money(details.annual_cost).style(self.ctx.styles.money)
        );
        println!("   Monthly Average: {}", money(details.monthly_cost));
    }

    /// Render every other medicine priced under `insurance`.
    pub fn render_medicine_comparison(&self, insurance: &str, rows: &[MedicineRow]) {
        self.section(&format!("MEDICINE COMPARISON (for {insurance})"));
        println!("{}", medicine_comparison_table(rows).render());
    }

    /// Render every other plan priced for `medicine`.
    pub fn render_plan_comparison(&self, medicine: &str, rows: &[PlanRow]) {
        self.section(&format!("INSURANCE COMPARISON (for {medicine})"));
        println!("{}", plan_comparison_table(rows).render());
    }

    /// Render cheaper alternatives.
    pub fn render_recommendations(&self, recs: &Recommendations) {
        self.section("RECOMMENDATIONS");
        println!("Your current annual cost: {}", money(recs.current_cost));

        self.subsection("ALTERNATIVE MEDICINES (with comparable effectiveness):");
        if recs.medicines.is_empty() {
            println!("  No comparable alternatives found.");
        }
        for alt in &recs.medicines {
            self.print_alternative(alt);
        }

        self.subsection("ALTERNATIVE INSURANCE PLANS:");
        if recs.plans.is_empty() {
            println!("  No cheaper plans available.");
        }
        for alt in &recs.plans {
            self.print_alternative(alt);
        }
    }

    fn print_alternative(&self, alt: &Alternative) {
        let line = alternative_line(alt);
        if alt.savings > 0.0 {
            println!("{}", line.style(self.ctx.styles.savings));
        } else {
            println!("{line}");
        }
    }

    /// Render the coverage inspection report.
    pub fn render_coverage(&self, report: &CoverageReport) {
        let stats = &report.stats;
        self.ctx.kv("Reading from:", &report.source.display().to_string());
        self.ctx
            .kv("Shape:", &format!("({}, {}) (rows, cols)", stats.rows, stats.columns.len()));
        self.ctx.kv("Columns:", &stats.columns.join(", "));

        self.subsection(&format!("First {} rows:", report.preview.len()));
        let mut table = Table::new([
            "insurance_name",
            "medicine_name",
            "covered",
            "copay_amount",
            "tier_level",
        ])
        .right_align(&[3]);
        for row in &report.preview {
            table.push_row([
                row.insurance_name.clone(),
                row.medicine_name.clone(),
                text(row.covered.as_deref()),
                format_money(row.copay_amount),
                text(row.tier_level.as_deref()),
            ]);
        }
        println!("{}", table.render());

        println!();
        self.ctx.kv("Unique medicines:", &stats.medicines.join(", "));
        self.ctx.kv("Unique insurances:", &stats.insurances.join(", "));
        self.ctx.kv("Total coverage entries:", &stats.rows.to_string());
        self.ctx.kv("Covered values:", &stats.covered_values.join(", "));

        self.subsection("Sample coverage map");
        for entry in &report.sample {
            println!("{}:", entry.medicine.style(self.ctx.styles.bold));
            for plan in &entry.plans {
                println!("  {}: covered={}", plan.insurance, text(plan.covered.as_deref()));
            }
        }
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &MedcompareConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<22} {}", "data.dir:", config.data.dir.display());
        println!("  {:<22} {}", "bootstrap.env_dir:", config.bootstrap.env_dir.display());
        println!("  {:<22} {}", "bootstrap.port:", config.bootstrap.port);
        println!("  {:<22} {}", "bootstrap.host:", config.bootstrap.host);
        println!("  {:<22} {}", "bootstrap.python:", config.bootstrap.python);
        println!("  {:<22} {}", "bootstrap.entry_point:", config.bootstrap.entry_point);
        println!("  {:<22} {}", "bootstrap.packages:", config.bootstrap.packages.join(" "));
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, "MEDCOMPARE_DATA_DIR", "NO_COLOR", "RUST_LOG"] {
            println!(
                "    {:<22} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
    }
}

// ── Formatting helpers ────────────────────────────────────────────────────────

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "n/a".to_string(),
    }
}

/// Dollar amount with cents.
#[must_use]
pub fn money(value: f64) -> String {
    format!("${value:.2}")
}

fn optional_money(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), money)
}

/// Compact dollar amount for dense tables; empty when missing.
fn short_money(value: Option<f64>) -> String {
    let formatted = format_money(value);
    if formatted.is_empty() {
        formatted
    } else {
        format!("${formatted}")
    }
}

fn rating(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{}/10", format_money(Some(v))))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{}%", format_money(Some(v))))
}

/// Label for a selectable name, e.g. `Aetna  (Covers: Yes)`.
#[must_use]
pub fn choice_label(choice: &Choice, verb: &str) -> String {
    match choice.covered {
        Some(covered) => format!("{}  ({verb}: {})", choice.name, yes_no(covered)),
        None => choice.name.clone(),
    }
}

/// One recommendation bullet.
#[must_use]
pub fn alternative_line(alt: &Alternative) -> String {
    if alt.savings > 0.0 {
        format!(
            "  • {}: {}/year (save {} annually)",
            alt.name,
            money(alt.annual_cost),
            money(alt.savings)
        )
    } else {
        format!(
            "  • {}: {}/year (costs {} more)",
            alt.name,
            money(alt.annual_cost),
            money(alt.savings.abs())
        )
    }
}

#[must_use]
pub fn coverage_table(coverage: Option<&Coverage>) -> Table {
    let mut table = Table::default();
    match coverage {
        Some(c) => {
            table.push_row(["Covered".to_string(), yes_no(c.says_yes()).to_string()]);
            table.push_row(["Copay Amount".to_string(), optional_money(c.copay_amount)]);
            table.push_row(["Tier Level".to_string(), text(c.tier_level.as_deref())]);
        }
        None => {
            table.push_row(["Covered", "Not specifically listed (likely not covered)"]);
            table.push_row(["Copay Amount", "Full Cost"]);
            table.push_row(["Tier Level", "Not covered"]);
        }
    }
    table
}

#[must_use]
pub fn pairings_table(pairings: &[Pairing]) -> Table {
    let mut table = Table::new([
        "Medicine",
        "Insurance",
        "Annual",
        "Monthly",
        "Full/mo",
        "Copay",
        "Savings/yr",
        "No auth/yr",
        "Notes",
    ])
    .right_align(&[2, 3, 4, 5, 6, 7]);
    for p in pairings {
        let mut notes = Vec::new();
        if p.is_cash {
            notes.push("cash price");
        }
        if p.is_higher_tier {
            notes.push("higher tier");
        }
        if p.coverage.as_ref().is_some_and(Coverage::is_covered) {
            notes.push("covered");
        }
        table.push_row([
            p.medicine_name.clone(),
            p.insurance_name.clone(),
            short_money(Some(p.annual_cost)),
            short_money(Some(p.monthly_cost)),
            short_money(Some(p.full_monthly)),
            short_money(p.copay_amount),
            short_money(p.annual_savings),
            short_money(p.unauth_annual),
            notes.join(", "),
        ]);
    }
    table
}

#[must_use]
pub fn medicine_comparison_table(rows: &[MedicineRow]) -> Table {
    let mut table = Table::new([
        "Medicine",
        "Type",
        "Effectiveness",
        "Base Cost/Mo",
        "Annual Cost",
        "Side Effects",
    ])
    .right_align(&[3, 4]);
    for row in rows {
        let med = &row.medicine;
        table.push_row([
            med.medicine_name.clone(),
            text(med.kind.as_deref()),
            rating(med.effectiveness_rating),
            optional_money(med.average_cost_per_month),
            money(row.annual_cost),
            text(med.side_effects.as_deref()),
        ]);
    }
    table
}

#[must_use]
pub fn plan_comparison_table(rows: &[PlanRow]) -> Table {
    let mut table = Table::new([
        "Insurance",
        "Primary Care Copay",
        "Deductible",
        "Coverage %",
        "Annual Cost",
        "Covers Med",
    ])
    .right_align(&[1, 2, 4]);
    for row in rows {
        let plan = &row.insurance;
        table.push_row([
            plan.insurance_name.clone(),
            optional_money(plan.copay_primary_care),
            optional_money(plan.deductible),
            percent(plan.coverage_percentage),
            money(row.annual_cost),
            yes_no(row.covers_medicine).to_string(),
        ]);
    }
    table
}
