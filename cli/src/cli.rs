//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Compare diabetes medicine costs across insurance plans
#[derive(Parser)]
#[command(
    name = "medcompare",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Directory containing the catalog CSV files
    #[arg(long, global = true, env = "MEDCOMPARE_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the Python environment, install dependencies and launch the app
    Setup,

    /// List priced medicine/plan pairings
    Compare(commands::compare::CompareArgs),

    /// Full cost report for one medicine and plan
    Report(commands::report::ReportArgs),

    /// Pick a medicine and plan interactively
    Explore,

    /// Inspect the coverage table
    Coverage,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            data_dir,
            command,
        } = self;
        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            data_dir,
        });

        match command {
            Command::Setup => commands::setup::run(&app).await,
            Command::Compare(args) => commands::compare::run(&app, args),
            Command::Report(args) => commands::report::run(&app, &args),
            Command::Explore => commands::explore::run(&app),
            Command::Coverage => commands::coverage::run(&app),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
