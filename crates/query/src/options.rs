//! Facet option extraction
//!
//! The filter UI offers checkboxes built from the values actually present
//! in the working set. This module collects the distinct, sorted value set
//! per facet; absent fields and placeholder sentinels never become options.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::record::ProjectRecord;

/// Distinct filter options per facet, each sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetOptions {
    /// Raw status labels as stored (e.g. "진행 중", "COMPLETED")
    pub statuses: Vec<String>,
    pub regions: Vec<String>,
    pub themes: Vec<String>,
    pub sites: Vec<String>,
    pub institutions: Vec<String>,
    pub loan_types: Vec<String>,
}

impl FacetOptions {
    /// Collect the facet options offered by a record set
    pub fn collect(records: &[ProjectRecord]) -> Self {
        Self {
            statuses: distinct(records, |r| r.status_label()),
            regions: distinct(records, |r| r.region()),
            themes: distinct(records, |r| r.theme()),
            sites: distinct(records, |r| r.site()),
            institutions: distinct(records, |r| r.institution()),
            loan_types: distinct(records, |r| r.loan_type()),
        }
    }

    /// Whether no record contributed any option
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
            && self.regions.is_empty()
            && self.themes.is_empty()
            && self.sites.is_empty()
            && self.institutions.is_empty()
            && self.loan_types.is_empty()
    }
}

/// Distinct, sorted values of one accessor across a record set
fn distinct<'a, F>(records: &'a [ProjectRecord], accessor: F) -> Vec<String>
where
    F: Fn(&'a ProjectRecord) -> Option<&'a str>,
{
    let set: BTreeSet<&str> = records.iter().filter_map(accessor).collect();
    set.into_iter().map(|s| s.to_string()).collect()
}
