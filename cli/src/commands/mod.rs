//! Command implementations

pub mod compare;
pub mod config;
pub mod coverage;
pub mod explore;
pub mod report;
pub mod setup;
pub mod version;
