use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod commands;
mod data;
mod error;
mod mock;
mod output;

use commands::Command;
use error::AppError;

/// Environment variable name for the data file path
const CANOPY_DATA_ENV: &str = "CANOPY_DATA";

/// Canopy - a climate-finance project directory CLI
#[derive(Parser)]
#[command(name = "cnp")]
#[command(version = "0.1.0")]
#[command(about = "Browse and filter climate-finance projects", long_about = None)]
struct Args {
    /// Path to a JSON data file (a record array or a listing envelope);
    /// can also be set via the CANOPY_DATA env var. Defaults to the
    /// built-in sample records.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

fn main() {
    init_logging();

    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic - separated for testability
fn run_app() -> Result<(), AppError> {
    let args = Args::parse();
    run_with_args(&args)
}

/// Run the application with the given arguments
fn run_with_args(args: &Args) -> Result<(), AppError> {
    let records = data::load_records(resolve_data_path(args.data.clone()).as_deref())?;

    match &args.command {
        Some(cmd) => {
            let rendered = cmd.execute(&records)?;
            println!("{}", rendered);
        }
        None => {
            println!("Welcome to Canopy!");
            println!("Use 'cnp --help' for usage information.");
        }
    }

    Ok(())
}

/// Get the data file path from command line or environment variable.
///
/// Priority:
/// 1. Command line --data argument
/// 2. CANOPY_DATA environment variable (if non-empty)
/// 3. None (built-in sample records)
fn resolve_data_path(cli_data: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = cli_data {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(CANOPY_DATA_ENV)
        && !env_path.is_empty()
    {
        return Some(PathBuf::from(env_path));
    }

    None
}

/// Initialize logging from the default env filter, warn by default
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["cnp"]).unwrap();
        assert!(args.data.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_with_data_path() {
        let args = Args::try_parse_from(["cnp", "--data", "/tmp/projects.json"]).unwrap();
        assert_eq!(args.data, Some(PathBuf::from("/tmp/projects.json")));
    }

    #[test]
    fn test_args_with_list_command() {
        let args = Args::try_parse_from(["cnp", "list"]).unwrap();
        assert!(args.command.is_some());
    }

    #[test]
    fn test_args_with_data_and_command() {
        let args =
            Args::try_parse_from(["cnp", "--data", "/custom/projects.json", "facets"]).unwrap();
        assert_eq!(args.data, Some(PathBuf::from("/custom/projects.json")));
        assert!(args.command.is_some());
    }

    #[test]
    fn test_resolve_data_path_prefers_cli() {
        let resolved = resolve_data_path(Some(PathBuf::from("/cli/path.json")));
        assert_eq!(resolved, Some(PathBuf::from("/cli/path.json")));
    }
}
