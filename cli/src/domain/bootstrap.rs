//! Bootstrap plan: the ordered commands that prepare the Python environment
//! and launch the application.
//!
//! Pure functions only. Nothing here checks the filesystem or spawns a
//! process; callers pass in what they observed.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::config::BootstrapConfig;
use crate::domain::error::ConfigError;

/// Build tooling upgraded before the dependencies are installed.
pub const PACKAGING_TOOLS: &[&str] = &["pip", "setuptools", "wheel"];

/// Application title shown when the server starts.
pub const APP_TITLE: &str = "Diabetes Medicine & Insurance Comparison Tool";

#[cfg(windows)]
const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_SEPARATOR: &str = ":";

// ── Steps ─────────────────────────────────────────────────────────────────────

/// One stage of the bootstrap sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapStep {
    CreateEnvironment,
    UpgradeTooling,
    InstallDependencies,
    LaunchApplication,
}

impl BootstrapStep {
    /// Message printed before the step runs.
    #[must_use]
    pub fn progress_message(self) -> &'static str {
        match self {
            Self::CreateEnvironment => "Creating isolated environment...",
            Self::UpgradeTooling => "Upgrading pip, setuptools and wheel...",
            Self::InstallDependencies => "Installing pinned dependencies...",
            Self::LaunchApplication => "Starting the application...",
        }
    }
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateEnvironment => "create environment",
            Self::UpgradeTooling => "upgrade packaging tools",
            Self::InstallDependencies => "install dependencies",
            Self::LaunchApplication => "launch application",
        };
        f.write_str(name)
    }
}

// ── Package requirements ──────────────────────────────────────────────────────

/// A `NAME` or `NAME==VERSION` requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub version: Option<String>,
}

impl PackageSpec {
    /// Parse a requirement line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPackage`] for empty names, characters
    /// outside `[A-Za-z0-9._-]`, or an empty version after `==`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let (name, version) = match trimmed.split_once("==") {
            Some((name, version)) => (name.trim(), Some(version.trim())),
            None => (trimmed, None),
        };
        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        let valid_version = version.is_none_or(|v| !v.is_empty() && !v.contains(char::is_whitespace));
        if !valid_name || !valid_version {
            return Err(ConfigError::InvalidPackage(raw.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            version: version.map(str::to_string),
        })
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.version.is_some()
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}=={version}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

// ── Environment layout ────────────────────────────────────────────────────────

/// Paths inside an isolated environment directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentLayout {
    root: PathBuf,
}

impl EnvironmentLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the environment's executables.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    /// The environment's own interpreter.
    #[must_use]
    pub fn interpreter(&self) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join("python.exe")
        } else {
            self.bin_dir().join("python")
        }
    }

    /// Variables that make a child process behave as if the environment were
    /// activated: `VIRTUAL_ENV` plus the environment's executables first on `PATH`.
    #[must_use]
    pub fn activation_env(&self, inherited_path: Option<&str>) -> Vec<(String, String)> {
        let bin = self.bin_dir().to_string_lossy().into_owned();
        let path = match inherited_path {
            Some(rest) if !rest.is_empty() => format!("{bin}{PATH_SEPARATOR}{rest}"),
            _ => bin,
        };
        vec![
            ("VIRTUAL_ENV".to_string(), self.root.to_string_lossy().into_owned()),
            ("PATH".to_string(), path),
        ]
    }
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// A single command in the bootstrap sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    pub step: BootstrapStep,
    pub program: String,
    pub args: Vec<String>,
    /// Extra environment variables layered over the inherited environment.
    pub envs: Vec<(String, String)>,
}

impl PlannedCommand {
    /// Shell-like rendering for messages and logs.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Compute the ordered commands for one bootstrap run.
///
/// `env_exists` is whether the environment directory was found; creation is
/// planned only when it was not. `inherited_path` is the caller's `PATH`.
/// An empty package list plans no install step.
#[must_use]
pub fn plan_steps(
    config: &BootstrapConfig,
    layout: &EnvironmentLayout,
    env_exists: bool,
    inherited_path: Option<&str>,
) -> Vec<PlannedCommand> {
    let interpreter = layout.interpreter().to_string_lossy().into_owned();
    let activation = layout.activation_env(inherited_path);
    let mut plan = Vec::with_capacity(4);

    if !env_exists {
        plan.push(PlannedCommand {
            step: BootstrapStep::CreateEnvironment,
            program: config.python.clone(),
            args: vec![
                "-m".to_string(),
                "venv".to_string(),
                layout.root().to_string_lossy().into_owned(),
            ],
            envs: Vec::new(),
        });
    }

    plan.push(PlannedCommand {
        step: BootstrapStep::UpgradeTooling,
        program: interpreter.clone(),
        args: ["-m", "pip", "install", "--upgrade", "--quiet"]
            .iter()
            .chain(PACKAGING_TOOLS)
            .map(|a| (*a).to_string())
            .collect(),
        envs: activation.clone(),
    });

    if !config.packages.is_empty() {
        let mut args: Vec<String> = ["-m", "pip", "install", "--force-reinstall", "--no-cache-dir"]
            .iter()
            .map(|a| (*a).to_string())
            .collect();
        args.extend(config.packages.iter().map(|p| p.trim().to_string()));
        plan.push(PlannedCommand {
            step: BootstrapStep::InstallDependencies,
            program: interpreter.clone(),
            args,
            envs: activation.clone(),
        });
    }

    let mut launch_env = activation;
    launch_env.extend([
        ("FLASK_RUN_HOST".to_string(), config.host.clone()),
        ("FLASK_RUN_PORT".to_string(), config.port.to_string()),
        ("MEDCOMPARE_SERVER_LISTEN_ADDR".to_string(), config.listen_addr()),
    ]);
    plan.push(PlannedCommand {
        step: BootstrapStep::LaunchApplication,
        program: interpreter,
        args: vec![config.entry_point.clone()],
        envs: launch_env,
    });

    plan
}

/// Operator-facing lines printed right before the application starts.
#[must_use]
pub fn launch_banner(config: &BootstrapConfig) -> Vec<String> {
    vec![
        format!("Starting {APP_TITLE}..."),
        format!("Open http://{} in your browser", config.listen_addr()),
        "Press Ctrl+C to stop the server".to_string(),
    ]
}
