//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod bootstrap;
pub mod config;
pub mod error;

pub use bootstrap::{
    BootstrapStep, EnvironmentLayout, PackageSpec, PlannedCommand, launch_banner, plan_steps,
};
pub use config::{
    BootstrapConfig, DataConfig, MedcompareConfig, apply_config_value, validate_config_key,
    validate_config_value,
};
pub use error::{BootstrapError, ConfigError};
