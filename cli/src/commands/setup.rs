//! `medcompare setup` — prepare the Python environment and launch the app.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::bootstrap::{BootstrapOptions, run_bootstrap};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::{LocalFs, absolutize};
use crate::output::TerminalReporter;

/// Run the bootstrap sequence. Returns once the launched app exits cleanly.
///
/// # Errors
///
/// Returns a `BootstrapError` carrying the failing tool's exit code, or an
/// error if the configuration cannot be loaded.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let env_root = absolutize(&config.bootstrap.env_dir)?;
    let inherited_path = std::env::var("PATH").ok();
    let reporter = TerminalReporter::new(&app.output);

    let summary = run_bootstrap(
        &TokioCommandRunner::default(),
        &LocalFs,
        BootstrapOptions {
            reporter: &reporter,
            config: &config.bootstrap,
            env_root: &env_root,
            inherited_path: inherited_path.as_deref(),
        },
    )
    .await?;
    tracing::debug!(?summary, "bootstrap finished");
    Ok(ExitCode::SUCCESS)
}
