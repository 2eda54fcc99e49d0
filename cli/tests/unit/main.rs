//! Unit tests for the medcompare CLI
//!
//! These tests use fake ports and run fast without spawning processes.

mod architecture;
mod catalog_service;
mod config_command;
mod helpers;
mod mocks;
