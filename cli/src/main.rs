//! medcompare CLI - diabetes medicine and insurance cost comparison

#![cfg_attr(test, allow(clippy::expect_used))]

use std::process::ExitCode;

use clap::Parser;
use medcompare_cli::app::report_error;
use medcompare_cli::cli::Cli;
use medcompare_cli::infra::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    let (json, no_color) = (cli.json, cli.no_color);
    match cli.run().await {
        Ok(code) => code,
        Err(e) => report_error(&e, json, no_color),
    }
}
