mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use commands::{cmd_build, cmd_plan, cmd_validate};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Design token generator for design-tool variable exports.
#[derive(Parser)]
#[command(
    name = "tokenbake",
    version,
    about = "Split design-tool variable exports into per-mode token files"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the export and write one JSON file per bucket
    Build {
        /// Path to the variable export JSON (defaults to config, then the built-in path)
        input: Option<PathBuf>,
        /// Output directory for the token files
        #[arg(long)]
        out: Option<PathBuf>,
        /// Path to a tokenbake.toml config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the buckets a build would write, without writing anything
    Plan {
        /// Path to the variable export JSON
        input: Option<PathBuf>,
        /// Path to a tokenbake.toml config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a variable export against the embedded JSON Schema
    Validate {
        /// Path to the variable export JSON
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Build { input, out, config } => {
            cmd_build(
                input.as_deref(),
                out.as_deref(),
                config.as_deref(),
                cli.output,
                cli.quiet,
            );
        }
        Commands::Plan { input, config } => {
            cmd_plan(input.as_deref(), config.as_deref(), cli.output, cli.quiet);
        }
        Commands::Validate { input } => {
            cmd_validate(&input, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
