//! Application service — environment bootstrap use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitStatus;

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::bootstrap::{
    BootstrapStep, EnvironmentLayout, PlannedCommand, launch_banner, plan_steps,
};
use crate::domain::config::BootstrapConfig;
use crate::domain::error::{BootstrapError, EXIT_NOT_EXECUTABLE, EXIT_NOT_FOUND};

pub struct BootstrapOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub config: &'a BootstrapConfig,
    /// Environment directory, already resolved against the working directory.
    pub env_root: &'a Path,
    /// `PATH` of the calling process, extended during activation.
    pub inherited_path: Option<&'a str>,
}

/// What a completed bootstrap run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSummary {
    pub created_environment: bool,
    pub steps_run: Vec<BootstrapStep>,
}

/// Prepare the environment and run the application in the foreground.
///
/// Steps run strictly in order and the first failure aborts the run. Returns
/// once the launched application exits successfully.
///
/// # Errors
///
/// Returns a [`BootstrapError`] (wrapped in `anyhow`) carrying the failing
/// tool's exit code, or a config error if the settings are invalid.
pub async fn run_bootstrap(
    runner: &impl CommandRunner,
    local_fs: &impl LocalFs,
    opts: BootstrapOptions<'_, impl ProgressReporter>,
) -> Result<BootstrapSummary> {
    let BootstrapOptions {
        reporter,
        config,
        env_root,
        inherited_path,
    } = opts;
    config.validate()?;

    let layout = EnvironmentLayout::new(env_root);
    let env_exists = local_fs.exists(layout.root());
    if env_exists {
        reporter.success(&format!(
            "Environment {} already exists",
            layout.root().display()
        ));
    } else if let Some(version) = probe_interpreter(runner, &config.python).await {
        reporter.success(&format!("Found {version}"));
    }

    let plan = plan_steps(config, &layout, env_exists, inherited_path);
    let mut steps_run = Vec::with_capacity(plan.len());
    for cmd in &plan {
        if cmd.step == BootstrapStep::LaunchApplication {
            for line in launch_banner(config) {
                reporter.step(&line);
            }
        } else {
            reporter.step(cmd.step.progress_message());
        }

        run_step(runner, cmd).await?;
        steps_run.push(cmd.step);

        match cmd.step {
            BootstrapStep::CreateEnvironment => reporter.success(&format!(
                "Created environment {}",
                layout.root().display()
            )),
            BootstrapStep::UpgradeTooling => reporter.success("Packaging tools up to date"),
            BootstrapStep::InstallDependencies => {
                reporter.success(&format!("Installed {} packages", config.packages.len()));
            }
            BootstrapStep::LaunchApplication => reporter.success("Application stopped"),
        }
    }

    Ok(BootstrapSummary {
        created_environment: !env_exists,
        steps_run,
    })
}

/// Best-effort `--version` probe of the creating interpreter. Failures are
/// left for the creation step to report.
async fn probe_interpreter(runner: &impl CommandRunner, python: &str) -> Option<String> {
    match runner.run(python, &["--version"]).await {
        Ok(output) if output.status.success() => {
            // Older interpreters print the version on stderr.
            let text = if output.stdout.is_empty() {
                output.stderr
            } else {
                output.stdout
            };
            let version = String::from_utf8_lossy(&text).trim().to_string();
            (!version.is_empty()).then_some(version)
        }
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(python, error = %err, "interpreter probe failed");
            None
        }
    }
}

async fn run_step(runner: &impl CommandRunner, cmd: &PlannedCommand) -> Result<(), BootstrapError> {
    let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();
    let envs: Vec<(&str, &str)> = cmd
        .envs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    tracing::debug!(step = %cmd.step, command = %cmd.display(), "running bootstrap step");

    match runner.run_status(&cmd.program, &args, &envs).await {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(BootstrapError::StepFailed {
            step: cmd.step,
            command: cmd.display(),
            code: exit_code(status),
        }),
        Err(err) => Err(spawn_failure(cmd, &err)),
    }
}

/// Exit code to propagate for a failed status: the tool's own code, or
/// `128 + signal` when it was killed.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    status.code().unwrap_or(1)
}

fn spawn_failure(cmd: &PlannedCommand, err: &anyhow::Error) -> BootstrapError {
    let io = err
        .chain()
        .find_map(|e| e.downcast_ref::<std::io::Error>());
    let code = match io.map(std::io::Error::kind) {
        Some(ErrorKind::PermissionDenied) => EXIT_NOT_EXECUTABLE,
        _ => EXIT_NOT_FOUND,
    };
    BootstrapError::CannotSpawn {
        step: cmd.step,
        program: cmd.program.clone(),
        reason: io.map_or_else(|| err.to_string(), ToString::to_string),
        code,
    }
}
