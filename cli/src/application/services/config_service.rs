//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{
    MedcompareConfig, apply_config_value, validate_config_key, validate_config_value,
};

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the stored configuration cannot be read.
pub fn load_config(store: &impl ConfigStore) -> Result<MedcompareConfig> {
    store.load()
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &MedcompareConfig) -> Result<()> {
    store.save(config)
}

/// Validate, apply and persist a single `key = value` change.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or store failures.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<MedcompareConfig> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
