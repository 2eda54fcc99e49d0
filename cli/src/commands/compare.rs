//! `medcompare compare` — priced medicine/plan pairings.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use medcompare_common::{ComparisonRequest, ComparisonRules, SortKey, SortOrder, compare};

use crate::app::AppContext;

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Only pairings for this medicine
    #[arg(long, short)]
    pub medicine: Option<String>,

    /// Only pairings for this insurance plan
    #[arg(long, short)]
    pub insurance: Option<String>,

    /// You already tried the selected medicine; flag higher-tier alternatives
    #[arg(long)]
    pub tried: bool,

    /// Column to sort by
    #[arg(long, value_enum, default_value = "annual")]
    pub sort: SortKey,

    /// Sort direction
    #[arg(long, value_enum, default_value = "asc")]
    pub order: SortOrder,
}

impl From<CompareArgs> for ComparisonRequest {
    fn from(args: CompareArgs) -> Self {
        Self {
            medicine: args.medicine,
            insurance: args.insurance,
            tried: args.tried,
            sort_by: args.sort,
            order: args.order,
            trial: None,
        }
    }
}

/// Run the compare command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or a name is unknown.
pub fn run(app: &AppContext, args: CompareArgs) -> Result<ExitCode> {
    let (catalog, _) = app.load_catalog()?;
    let request = ComparisonRequest::from(args);
    let view = compare(&catalog, &ComparisonRules::default(), Some(&request))?;
    app.renderer().render_view(&view)?;
    Ok(ExitCode::SUCCESS)
}
