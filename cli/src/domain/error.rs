//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::bootstrap::BootstrapStep;

/// Exit code used when a tool cannot be started at all.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code used when a tool exists but cannot be executed.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

// ── Bootstrap errors ──────────────────────────────────────────────────────────

/// Errors raised while preparing the environment and launching the app.
///
/// Each variant carries the exit code the process should terminate with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("{step} failed: `{command}` exited with code {code}")]
    StepFailed {
        step: BootstrapStep,
        command: String,
        code: i32,
    },

    #[error("{step} failed: cannot run '{program}': {reason}")]
    CannotSpawn {
        step: BootstrapStep,
        program: String,
        reason: String,
        code: i32,
    },
}

impl BootstrapError {
    /// The exit code to propagate to the calling shell.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed { code, .. } | Self::CannotSpawn { code, .. } => *code,
        }
    }

    /// The step that failed.
    #[must_use]
    pub fn step(&self) -> BootstrapStep {
        match self {
            Self::StepFailed { step, .. } | Self::CannotSpawn { step, .. } => *step,
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("Invalid package requirement '{0}': expected NAME or NAME==VERSION")]
    InvalidPackage(String),
}
