//! `medcompare coverage` — inspect the coverage table.

use std::process::ExitCode;

use anyhow::Result;
use medcompare_common::COVERAGE_FILE;

use crate::app::AppContext;
use crate::application::services::catalog_service::coverage_report;

/// Run the coverage command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let (catalog, dir) = app.load_catalog()?;
    let report = coverage_report(&catalog, &dir.join(COVERAGE_FILE));
    app.renderer().render_coverage(&report)?;
    Ok(ExitCode::SUCCESS)
}
