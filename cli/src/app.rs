//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is constructed once per invocation and passed as
//! `&AppContext` to all command handlers, so a new cross-cutting concern
//! needs one field change here rather than new parameters everywhere.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use medcompare_common::{Catalog, CatalogError, CompareError};

use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::config::MedcompareConfig;
use crate::domain::error::{BootstrapError, ConfigError};
use crate::infra::config::YamlConfigStore;
use crate::output::json::format_error;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
#[derive(Debug, Default)]
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
#[derive(Debug, Default)]
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// `--data-dir` / `MEDCOMPARE_DATA_DIR`, overriding `data.dir`.
    pub data_dir: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Persistent configuration.
    pub config_store: YamlConfigStore,
    data_dir: Option<PathBuf>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store: YamlConfigStore::default(),
            data_dir: flags.data_dir,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Load the stored configuration (defaults when none is stored).
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_config(&self) -> Result<MedcompareConfig> {
        config_service::load_config(&self.config_store)
    }

    /// Directory holding the catalog CSV files.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        Ok(self.load_config()?.data.dir)
    }

    /// Load the catalog from the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a CSV file is missing or malformed.
    pub fn load_catalog(&self) -> Result<(Catalog, PathBuf)> {
        let dir = self.data_dir()?;
        tracing::debug!(dir = %dir.display(), "loading catalog");
        let catalog = Catalog::load(&dir)?;
        Ok((catalog, dir))
    }

    /// Location of the config file, for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn config_path(&self) -> Result<PathBuf> {
        self.config_store.path()
    }
}

/// Print a failed command's error and pick the process exit code.
///
/// Bootstrap failures propagate the failing tool's exit code; everything else
/// exits 1.
#[must_use]
pub fn report_error(err: &anyhow::Error, json: bool, no_color: bool) -> ExitCode {
    let bootstrap = err.downcast_ref::<BootstrapError>();
    if json {
        let code = error_code(err);
        match format_error(&format!("{err:#}"), code) {
            Ok(out) => println!("{out}"),
            Err(_) => eprintln!("Error: {err:#}"),
        }
    } else if bootstrap.is_some() {
        OutputContext::new(no_color, false).error(&err.to_string());
    } else {
        eprintln!("Error: {err:#}");
    }

    let code = bootstrap.map_or(1, BootstrapError::exit_code);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn error_code(err: &anyhow::Error) -> &'static str {
    if err.is::<BootstrapError>() {
        "bootstrap_failed"
    } else if err.is::<CompareError>() {
        "invalid_selection"
    } else if err.is::<CatalogError>() {
        "catalog_error"
    } else if err.is::<ConfigError>() {
        "invalid_config"
    } else {
        "error"
    }
}
