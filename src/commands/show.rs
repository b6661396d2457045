//! Show command for one project's details

use clap::Args;

use canopy_query::ProjectRecord;

use crate::error::AppError;
use crate::output;

/// Show one project in detail
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// The project id
    pub id: String,
}

impl ShowCommand {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no record carries the given id.
    pub fn execute(&self, records: &[ProjectRecord]) -> Result<String, AppError> {
        let record = records
            .iter()
            .find(|r| r.id().as_deref() == Some(self.id.as_str()))
            .ok_or_else(|| AppError::NotFound {
                id: self.id.clone(),
            })?;

        Ok(output::format_project_details(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn test_show_known_project() {
        let records = mock::sample_projects();
        let cmd = ShowCommand {
            id: "102".to_string(),
        };
        let rendered = cmd.execute(&records).unwrap();
        assert!(rendered.contains("Bangladesh Coastal Protection Program"));
        assert!(rendered.contains("World Bank"));
    }

    #[test]
    fn test_show_unknown_project() {
        let records = mock::sample_projects();
        let cmd = ShowCommand {
            id: "999".to_string(),
        };
        let err = cmd.execute(&records).unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref id } if id == "999"));
    }
}
