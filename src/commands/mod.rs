//! CLI commands for Canopy
//!
//! This module contains all subcommand implementations for the cnp CLI.

pub mod facets;
pub mod list;
pub mod show;

pub use facets::FacetsCommand;
pub use list::ListCommand;
pub use show::ShowCommand;

use clap::Subcommand;

use canopy_query::ProjectRecord;

use crate::error::AppError;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects with filtering, sorting, and pagination
    List(ListCommand),
    /// Show one project in detail
    Show(ShowCommand),
    /// Show the filter options the current data offers
    Facets(FacetsCommand),
}

impl Command {
    /// Execute the command against the loaded working set.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the command execution fails.
    pub fn execute(&self, records: &[ProjectRecord]) -> Result<String, AppError> {
        match self {
            Command::List(cmd) => cmd.execute(records),
            Command::Show(cmd) => cmd.execute(records),
            Command::Facets(cmd) => cmd.execute(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Test struct to parse commands
    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_command_list_parses() {
        let cli = TestCli::try_parse_from(["test", "list"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Command::List(_)));
    }

    #[test]
    fn test_command_show_parses() {
        let cli = TestCli::try_parse_from(["test", "show", "101"]);
        assert!(cli.is_ok());
        match cli.unwrap().command {
            Command::Show(cmd) => assert_eq!(cmd.id, "101"),
            other => panic!("expected show command, got {:?}", other),
        }
    }

    #[test]
    fn test_command_facets_parses() {
        let cli = TestCli::try_parse_from(["test", "facets"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Command::Facets(_)));
    }
}
