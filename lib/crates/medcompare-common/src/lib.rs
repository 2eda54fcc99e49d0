//! Shared comparison engine for diabetes medicines and insurance plans.

pub mod catalog;
pub mod compare;
pub mod cost;
pub mod error;
pub mod pairing;
pub mod recommend;
pub mod types;

pub use catalog::{COVERAGE_FILE, Catalog, CoverageMap, CoverageStats, INSURANCE_FILE, MEDICINES_FILE};
pub use compare::{
    ComparisonRequest, ComparisonRules, ComparisonView, CurrentSelection, TrialAnswer,
    UnauthorizedCost, compare,
};
pub use cost::{MONTHS_PER_YEAR, annual_cost, format_money, tier_number};
pub use error::{CatalogError, CompareError};
pub use pairing::{GOODRX_LABEL, Pairing, PairingFilter, SortKey, SortOrder};
pub use types::*;
