//! `medcompare report` — selection details, comparisons and recommendations.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use medcompare_common::recommend::report;

use crate::app::AppContext;

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Current medicine
    #[arg(long, short)]
    pub medicine: String,

    /// Current insurance plan
    #[arg(long, short)]
    pub insurance: String,
}

/// Run the report command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or a name is unknown.
pub fn run(app: &AppContext, args: &ReportArgs) -> Result<ExitCode> {
    let (catalog, _) = app.load_catalog()?;
    let report = report(&catalog, args.medicine.trim(), args.insurance.trim())?;
    app.renderer().render_report(&report)?;
    Ok(ExitCode::SUCCESS)
}
