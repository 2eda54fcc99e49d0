//! Shared, read-only state handed to every handler.

use medcompare_common::{Catalog, ComparisonRules};

/// Catalog and comparison rules, loaded once at startup.
#[derive(Debug)]
pub struct AppState {
    pub catalog: Catalog,
    pub rules: ComparisonRules,
}

impl AppState {
    pub fn new(catalog: Catalog, rules: ComparisonRules) -> Self {
        Self { catalog, rules }
    }
}
