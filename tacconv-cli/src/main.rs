//! tacconv CLI - Command-line interface
//!
//! Drives the remote TAC compilation service: one-shot actions on a file or
//! stdin, an interactive shell, and configuration helpers.

mod commands;
mod error;
mod runner;
mod terminal;

use std::process;

use clap::{Parser, Subcommand};
use tacconv::controller::{Action, Mode};
use tacconv::render::RenderOptions;

use commands::action::{read_source, SourceArgs};
use commands::config::ConfigCommands;
use commands::EXIT_ACTION_FAILED;
use error::CliError;
use runner::{CliRunner, Overrides};

#[derive(Parser)]
#[command(name = "tacconv")]
#[command(version, about = "Client for the TAC to assembly compilation service", long_about = None)]
struct Cli {
    /// Service base URL (overrides [api] base_url)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Request deadline in milliseconds (overrides [api] request_timeout_ms)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check TAC syntax
    Validate(SourceArgs),

    /// Compile TAC to assembly in a single stage
    #[command(alias = "tac")]
    Compile(SourceArgs),

    /// Assembly, resource analysis and optimization in one request
    Complete(SourceArgs),

    /// Generate assembly only
    Assembly(SourceArgs),

    /// Generate assembly with a resource analysis
    Resources(SourceArgs),

    /// Optimize TAC and compare against the original
    Optimize(SourceArgs),

    /// Check that the service is reachable
    Health,

    /// Start an interactive session
    Shell {
        /// Start with the side-by-side comparison enabled
        #[arg(long)]
        diff: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let overrides = Overrides {
        api_base: cli.api_base,
        timeout_ms: cli.timeout_ms,
    };

    let result = match cli.command {
        Commands::Config { command } => commands::config::run(command).map(|_| true),
        Commands::Shell { diff } => CliRunner::new(&overrides, cli.debug)
            .and_then(|runner| commands::shell::run(&runner, diff))
            .map(|_| true),
        Commands::Health => CliRunner::new(&overrides, cli.debug).and_then(|runner| {
            commands::action::run(&runner, Action::Health, "", RenderOptions::default())
        }),
        Commands::Validate(args) => run_mode(Mode::Validate, args, &overrides, cli.debug),
        Commands::Compile(args) => run_mode(Mode::Compile, args, &overrides, cli.debug),
        Commands::Complete(args) => run_mode(Mode::Complete, args, &overrides, cli.debug),
        Commands::Assembly(args) => run_mode(Mode::Assembly, args, &overrides, cli.debug),
        Commands::Resources(args) => run_mode(Mode::Resources, args, &overrides, cli.debug),
        Commands::Optimize(args) => run_mode(Mode::Optimize, args, &overrides, cli.debug),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_ACTION_FAILED),
        Err(e) => e.exit(),
    }
}

fn run_mode(
    mode: Mode,
    args: SourceArgs,
    overrides: &Overrides,
    debug: bool,
) -> Result<bool, CliError> {
    let runner = CliRunner::new(overrides, debug)?;
    let source = read_source(args.file.as_deref())?;
    let options = RenderOptions {
        show_diff: args.diff,
    };
    commands::action::run(&runner, Action::Run(mode), &source, options)
}
