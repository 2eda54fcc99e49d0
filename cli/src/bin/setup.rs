//! `medcompare-setup` - create or reuse the Python environment, install the
//! pinned dependencies and launch the web app.
//!
//! Equivalent to `medcompare setup`. The environment location comes from
//! `bootstrap.env_dir` in the config file (see `MEDCOMPARE_CONFIG`).

use std::process::ExitCode;

use clap::Parser;
use medcompare_cli::app::{AppContext, AppFlags, OutputFlags, report_error};
use medcompare_cli::commands;
use medcompare_cli::infra::logging::init_tracing;

#[derive(Parser)]
#[command(name = "medcompare-setup", version)]
struct Args {
    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();
    let app = AppContext::new(AppFlags {
        output: OutputFlags {
            no_color: args.no_color,
            ..OutputFlags::default()
        },
        ..AppFlags::default()
    });
    match commands::setup::run(&app).await {
        Ok(code) => code,
        Err(e) => report_error(&e, false, args.no_color),
    }
}
