//! Integration tests for the medcompare CLI
//!
//! These tests spawn the actual binaries and test end-to-end behavior.
//! They are slower and should be run separately from unit tests.

mod catalog_commands;
mod cli_tests;
mod config_command;
