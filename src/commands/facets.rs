//! Facets command
//!
//! Prints the distinct filter options the loaded data offers, the same
//! values a filter sidebar would turn into checkboxes.

use clap::Args;

use canopy_query::{FacetOptions, ProjectRecord};

use crate::error::AppError;

/// Show the filter options the current data offers
#[derive(Debug, Args)]
pub struct FacetsCommand {}

impl FacetsCommand {
    /// Execute the facets command
    pub fn execute(&self, records: &[ProjectRecord]) -> Result<String, AppError> {
        let options = FacetOptions::collect(records);
        if options.is_empty() {
            return Ok("No filter options available.".to_string());
        }

        let mut output = String::new();
        push_section(&mut output, "Status", &options.statuses);
        push_section(&mut output, "Region", &options.regions);
        push_section(&mut output, "Theme", &options.themes);
        push_section(&mut output, "Site", &options.sites);
        push_section(&mut output, "Institution", &options.institutions);
        push_section(&mut output, "Loan type", &options.loan_types);

        Ok(output.trim_end().to_string())
    }
}

/// Append one facet section, skipping facets with no options
fn push_section(output: &mut String, title: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    output.push_str(title);
    output.push_str(":\n");
    for value in values {
        output.push_str("  ");
        output.push_str(value);
        output.push('\n');
    }
    output.push('\n');
}
