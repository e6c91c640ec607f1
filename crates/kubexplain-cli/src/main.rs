//! Kubexplain CLI - explain, validate and generate Kubernetes manifests

use clap::{Parser, Subcommand};
use kubexplain_core::MatchPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;
mod error;
mod exit_codes;

use config::Settings;

#[derive(Parser)]
#[command(name = "kubexplain")]
#[command(author = "Kubexplain Contributors")]
#[command(version)]
#[command(about = "Explain, validate and generate Kubernetes manifests", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Settings file (default: ~/.config/kubexplain/config.yaml)
    #[arg(long, global = true, env = "KUBEXPLAIN_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the Kubernetes resources in a manifest
    Parse {
        /// Manifest file, or - for stdin
        file: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check manifest structure and deprecated API versions
    Validate {
        /// Manifest file, or - for stdin
        file: String,

        /// Output validation results as JSON
        #[arg(long)]
        json: bool,

        /// Strict mode - treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Explain every known field of a manifest
    Explain {
        /// Manifest file, or - for stdin
        file: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Fallback match policy (longest-match, declaration-order)
        #[arg(long)]
        policy: Option<MatchPolicy>,

        /// Only print the summary
        #[arg(long)]
        summary_only: bool,
    },

    /// Generate a manifest (deployment, service, ingress, configmap)
    Generate {
        /// Resource type
        resource_type: String,

        /// Values file(s) to merge
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set values on command line (key=value)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Output file (if not set, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    let settings = Settings::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { file, json } => commands::parse::run(&file, json),

        Commands::Validate { file, json, strict } => {
            commands::validate::run(&file, json, strict || settings.strict)
        }

        Commands::Explain {
            file,
            json,
            policy,
            summary_only,
        } => commands::explain::run(
            &file,
            policy.unwrap_or(settings.match_policy),
            json,
            summary_only,
        ),

        Commands::Generate {
            resource_type,
            values,
            set,
            output,
        } => commands::generate::run(&resource_type, &values, &set, output.as_deref()),
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let code = match run(cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };

    std::process::exit(code);
}
