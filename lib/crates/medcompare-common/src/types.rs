use serde::{Deserialize, Deserializer, Serialize};

/// A diabetes medicine row from `medicines.csv`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    pub medicine_name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Effectiveness on a 0-10 scale.
    #[serde(default, deserialize_with = "coerce_f64")]
    pub effectiveness_rating: Option<f64>,
    #[serde(default)]
    pub side_effects: Option<String>,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub average_cost_per_month: Option<f64>,
    /// Cash price through the GoodRx discount program, when one is known.
    #[serde(default, deserialize_with = "coerce_f64")]
    pub goodrx_price: Option<f64>,
}

/// An insurance plan row from `insurance.csv`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsurancePlan {
    pub insurance_name: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub copay_primary_care: Option<f64>,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub copay_specialist: Option<f64>,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub copay_emergency: Option<f64>,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub deductible: Option<f64>,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub annual_max_copay: Option<f64>,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub coverage_percentage: Option<f64>,
}

/// One plan/medicine coverage row from `insurance_medicine_coverage.csv`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coverage {
    pub insurance_name: String,
    pub medicine_name: String,
    /// Free-text flag, normally `Yes` / `No`.
    #[serde(default)]
    pub covered: Option<String>,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub copay_amount: Option<f64>,
    /// Formulary tier, e.g. `Tier 2`.
    #[serde(default)]
    pub tier_level: Option<String>,
}

impl Coverage {
    /// Case-insensitive check of the `covered` flag, used for pricing.
    #[must_use]
    pub fn is_covered(&self) -> bool {
        self.covered
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case("yes"))
    }

    /// Exact `Yes` check, used for the "covers" column in reports.
    #[must_use]
    pub fn says_yes(&self) -> bool {
        self.covered.as_deref() == Some("Yes")
    }
}

/// Compact coverage entry exposed to clients for dropdown annotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageSummary {
    pub covered: Option<String>,
    pub copay_amount: Option<f64>,
    pub tier_level: Option<String>,
}

impl From<&Coverage> for CoverageSummary {
    fn from(c: &Coverage) -> Self {
        Self {
            covered: c.covered.clone(),
            copay_amount: c.copay_amount,
            tier_level: c.tier_level.clone(),
        }
    }
}

/// Lenient numeric column: blanks, garbage and `NaN` become `None`.
fn coerce_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}
