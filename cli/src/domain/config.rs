//! Domain types and validators for Medcompare configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use core::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::bootstrap::PackageSpec;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["data.dir", "bootstrap.env_dir", "bootstrap.port"];

/// Directory name of the isolated environment, relative to the working directory.
pub const DEFAULT_ENV_DIR: &str = "venv";
pub const DEFAULT_ENTRY_POINT: &str = "app.py";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Dependencies installed into the environment. Unversioned entries float.
pub const PINNED_PACKAGES: &[&str] = &[
    "numpy==1.26.4",
    "pandas==2.2.2",
    "tabulate==0.9.0",
    "flask",
    "gunicorn",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.medcompare/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MedcompareConfig {
    /// Environment bootstrap settings.
    pub bootstrap: BootstrapConfig,
    /// Catalog data location.
    pub data: DataConfig,
}

/// Settings for `medcompare setup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Environment directory. Relative paths resolve against the working directory.
    pub env_dir: PathBuf,
    /// Interpreter used only to create the environment.
    pub python: String,
    /// Requirements passed to the installer, `NAME` or `NAME==VERSION`.
    pub packages: Vec<String>,
    /// Script launched with the environment's interpreter.
    pub entry_point: String,
    /// Loopback address only: `127.0.0.1`, `::1` or `localhost`.
    pub host: String,
    pub port: u16,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            env_dir: PathBuf::from(DEFAULT_ENV_DIR),
            python: default_python().to_string(),
            packages: PINNED_PACKAGES.iter().map(|p| (*p).to_string()).collect(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl BootstrapConfig {
    /// Check every field before any command runs.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        validate_env_dir(&self.env_dir.to_string_lossy())?;
        if self.python.trim().is_empty() {
            return Err(invalid("bootstrap.python", &self.python, "an interpreter name or path"));
        }
        if self.entry_point.trim().is_empty() {
            return Err(invalid("bootstrap.entry_point", &self.entry_point, "a script path"));
        }
        if !is_loopback_host(&self.host) {
            return Err(invalid(
                "bootstrap.host",
                &self.host,
                "a loopback address (127.0.0.1, ::1 or localhost)",
            ));
        }
        if self.port == 0 {
            return Err(invalid("bootstrap.port", "0", "a port between 1 and 65535"));
        }
        for package in &self.packages {
            PackageSpec::parse(package)?;
        }
        Ok(())
    }

    /// `host:port` the launched application binds to.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Where the three catalog CSV files live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

fn is_loopback_host(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost")
        || host.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}

fn default_python() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

fn invalid(key: &str, value: &str, expected: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
    .into()
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "bootstrap.port" => parse_port(value).map(|_| ()),
        "bootstrap.env_dir" => validate_env_dir(value),
        "data.dir" if value.trim().is_empty() => Err(invalid(key, value, "a directory path")),
        _ => Ok(()),
    }
}

/// Set `key` to `value` on `config`. The key and value must already be valid.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value does not parse.
pub fn apply_config_value(config: &mut MedcompareConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "data.dir" => config.data.dir = PathBuf::from(value),
        "bootstrap.env_dir" => config.bootstrap.env_dir = PathBuf::from(value),
        "bootstrap.port" => config.bootstrap.port = parse_port(value)?,
        _ => validate_config_key(key)?,
    }
    Ok(())
}

fn parse_port(value: &str) -> Result<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(invalid("bootstrap.port", value, "a port between 1 and 65535")),
    }
}

fn validate_env_dir(value: &str) -> Result<()> {
    if value.trim().is_empty() || value.contains('\0') {
        return Err(invalid("bootstrap.env_dir", value, "a directory path"));
    }
    Ok(())
}
