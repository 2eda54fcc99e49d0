//! JSON output helpers.
//!
//! `JsonRenderer` prints command results as pretty JSON on stdout. The
//! error-object formatter is used by all `--json` code paths when a command
//! fails.

use std::path::Path;

use anyhow::{Context, Result};
use medcompare_common::ComparisonView;
use medcompare_common::recommend::Report;
use serde::Serialize;

use crate::application::services::catalog_service::CoverageReport;
use crate::domain::config::MedcompareConfig;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

/// Renders command results as JSON.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        print_json(&serde_json::json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_view(view: &ComparisonView) -> Result<()> {
        print_json(view)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_report(report: &Report) -> Result<()> {
        print_json(report)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_coverage(report: &CoverageReport) -> Result<()> {
        print_json(report)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(config: &MedcompareConfig, path: &Path) -> Result<()> {
        print_json(&serde_json::json!({
            "path": path,
            "config": config,
        }))
    }
}
