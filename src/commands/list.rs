//! List command for browsing projects
//!
//! Implements the `cnp list` command: every filter the directory supports
//! as a flag, plus sorting and pagination.

use clap::Args;

use canopy_query::{
    AmountBucket, DurationBucket, NumericRange, ProjectQuery, ProjectQueryEngine, ProjectRecord,
    SortDirection, SortKey, Status,
};

use crate::error::AppError;
use crate::output;

/// List projects with optional filters
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Search text in title, institution, region, and status (case-insensitive)
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Filter by status (can be specified multiple times)
    #[arg(short = 's', long = "status", value_parser = parse_status)]
    pub statuses: Vec<Status>,

    /// Filter by region/country label, substring match (repeatable)
    #[arg(short = 'r', long = "region")]
    pub regions: Vec<String>,

    /// Filter by theme area label, substring match (repeatable)
    #[arg(long = "theme")]
    pub themes: Vec<String>,

    /// Filter by source site, exact match (repeatable)
    #[arg(long = "site")]
    pub sites: Vec<String>,

    /// Filter by institution, exact match (repeatable)
    #[arg(short = 'i', long = "institution")]
    pub institutions: Vec<String>,

    /// Filter by loan type, exact match (repeatable)
    #[arg(long = "loan-type")]
    pub loan_types: Vec<String>,

    /// Filter by budget bucket: small, medium, large (repeatable)
    #[arg(long = "budget", value_parser = parse_budget_bucket)]
    pub budget_buckets: Vec<AmountBucket>,

    /// Filter by co-financing bucket: small, medium, large, none (repeatable)
    #[arg(long = "co-financing", value_parser = parse_co_financing_bucket)]
    pub co_financing_buckets: Vec<AmountBucket>,

    /// Filter by duration bucket: <1y, 1-3y, 3y+ (repeatable)
    #[arg(long = "duration", value_parser = parse_duration_bucket)]
    pub duration_buckets: Vec<DurationBucket>,

    /// Minimum budget in USD
    #[arg(long)]
    pub budget_min: Option<f64>,

    /// Maximum budget in USD
    #[arg(long)]
    pub budget_max: Option<f64>,

    /// Minimum co-financing in USD
    #[arg(long)]
    pub co_financing_min: Option<f64>,

    /// Maximum co-financing in USD
    #[arg(long)]
    pub co_financing_max: Option<f64>,

    /// Minimum duration in days
    #[arg(long)]
    pub duration_min: Option<f64>,

    /// Maximum duration in days
    #[arg(long)]
    pub duration_max: Option<f64>,

    /// Earliest start year
    #[arg(long)]
    pub year_from: Option<i32>,

    /// Latest start year
    #[arg(long)]
    pub year_to: Option<i32>,

    /// Show only projects owned by the given email
    #[arg(long = "mine", value_name = "EMAIL")]
    pub owner: Option<String>,

    /// Sort by attribute (id, title, status, region, institution,
    /// budget, co_financing, start_date, duration)
    #[arg(long, value_parser = parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "asc", value_parser = parse_sort_direction)]
    pub direction: SortDirection,

    /// Page number (1-based; out-of-range pages are clamped)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Records per page
    #[arg(long = "page-size", default_value_t = 10)]
    pub page_size: usize,
}

/// Parse a status string into a Status enum
fn parse_status(s: &str) -> Result<Status, String> {
    Status::parse(s).ok_or_else(|| {
        format!(
            "invalid status '{}'. Valid values: planned, in_progress, completed",
            s
        )
    })
}

/// Parse a budget bucket name; budget has no unknown bucket
fn parse_budget_bucket(s: &str) -> Result<AmountBucket, String> {
    match s.trim().to_lowercase().as_str() {
        "small" => Ok(AmountBucket::Small),
        "medium" => Ok(AmountBucket::Medium),
        "large" => Ok(AmountBucket::Large),
        _ => Err(format!(
            "invalid budget bucket '{}'. Valid values: small, medium, large",
            s
        )),
    }
}

/// Parse a co-financing bucket name, including the unknown bucket
fn parse_co_financing_bucket(s: &str) -> Result<AmountBucket, String> {
    match s.trim().to_lowercase().as_str() {
        "small" => Ok(AmountBucket::Small),
        "medium" => Ok(AmountBucket::Medium),
        "large" => Ok(AmountBucket::Large),
        "none" | "unknown" | "none_unknown" => Ok(AmountBucket::NoneUnknown),
        _ => Err(format!(
            "invalid co-financing bucket '{}'. Valid values: small, medium, large, none",
            s
        )),
    }
}

/// Parse a duration bucket name
fn parse_duration_bucket(s: &str) -> Result<DurationBucket, String> {
    match s.trim().to_lowercase().as_str() {
        "<1y" | "under_1y" | "under_one_year" => Ok(DurationBucket::UnderOneYear),
        "1-3y" | "1_3y" | "one_to_three_years" => Ok(DurationBucket::OneToThreeYears),
        "3y+" | "3y_plus" | "three_years_plus" => Ok(DurationBucket::ThreeYearsPlus),
        _ => Err(format!(
            "invalid duration bucket '{}'. Valid values: <1y, 1-3y, 3y+",
            s
        )),
    }
}

/// Parse a sort key, surfacing the engine's rejection message
fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse::<SortKey>().map_err(|e| e.to_string())
}

/// Parse a sort direction
fn parse_sort_direction(s: &str) -> Result<SortDirection, String> {
    s.parse::<SortDirection>()
}

impl ListCommand {
    /// Execute the list command.
    ///
    /// Builds a `ProjectQuery` from the flags, runs the engine over the
    /// working set, and renders the page as a table with a paging footer.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the query is rejected (zero page size).
    pub fn execute(&self, records: &[ProjectRecord]) -> Result<String, AppError> {
        let query = self.build_query();
        let page = ProjectQueryEngine::run(records, &query)?;
        Ok(output::format_listing(&page))
    }

    /// Build a ProjectQuery from the command options
    fn build_query(&self) -> ProjectQuery {
        let mut query = ProjectQuery::new()
            .with_statuses(self.statuses.iter().copied())
            .with_regions(self.regions.iter().cloned())
            .page(self.page)
            .page_size(self.page_size);

        if let Some(ref search) = self.search {
            query = query.with_search(search);
        }
        for theme in &self.themes {
            query = query.with_theme(theme);
        }
        for site in &self.sites {
            query = query.with_site(site);
        }
        for institution in &self.institutions {
            query = query.with_institution(institution);
        }
        for loan_type in &self.loan_types {
            query = query.with_loan_type(loan_type);
        }
        for bucket in &self.budget_buckets {
            query = query.with_budget_bucket(*bucket);
        }
        for bucket in &self.co_financing_buckets {
            query = query.with_co_financing_bucket(*bucket);
        }
        for bucket in &self.duration_buckets {
            query = query.with_duration_bucket(*bucket);
        }

        if let Some(range) = range_of(self.budget_min, self.budget_max) {
            query = query.with_budget_range(range);
        }
        if let Some(range) = range_of(self.co_financing_min, self.co_financing_max) {
            query = query.with_co_financing_range(range);
        }
        if let Some(range) = range_of(self.duration_min, self.duration_max) {
            query = query.with_duration_range(range);
        }
        if let Some(range) = range_of(
            self.year_from.map(|y| y as f64),
            self.year_to.map(|y| y as f64),
        ) {
            query = query.with_start_year_range(range);
        }

        if let Some(ref owner) = self.owner {
            query = query.owned_by(owner);
        }
        if let Some(sort) = self.sort {
            query = query.sorted_by(sort, self.direction);
        }

        query
    }
}

/// Combine optional bounds into a range, or nothing when both are absent
fn range_of(min: Option<f64>, max: Option<f64>) -> Option<NumericRange> {
    if min.is_none() && max.is_none() {
        None
    } else {
        Some(NumericRange::new(min, max))
    }
}
