//! Query specification for the project directory
//!
//! Provides the builder-pattern `ProjectQuery` plus the bucket, range,
//! and sort vocabulary it is built from. All filters are optional and
//! compose with AND semantics across categories; within a category,
//! multiple selected values use OR semantics. An empty category is a no-op.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::record::Status;

/// Lower bound of the Medium amount bucket, in USD
pub const MEDIUM_AMOUNT_FLOOR: f64 = 10_000_000.0;

/// Lower bound of the Large amount bucket, in USD
pub const LARGE_AMOUNT_FLOOR: f64 = 50_000_000.0;

/// Bucketed partition of a money amount.
///
/// Intervals are half-open `[lo, hi)`: Small is `[0, 10M)`, Medium is
/// `[10M, 50M)`, Large is `[50M, ∞)`. `NoneUnknown` matches only records
/// whose amount is absent or unparseable; a parsed zero is Small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountBucket {
    Small,
    Medium,
    Large,
    NoneUnknown,
}

impl AmountBucket {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountBucket::Small => "small",
            AmountBucket::Medium => "medium",
            AmountBucket::Large => "large",
            AmountBucket::NoneUnknown => "none_unknown",
        }
    }

    /// Whether a parsed amount falls inside this bucket.
    ///
    /// `NoneUnknown` never contains a parsed value.
    pub fn contains(&self, amount: f64) -> bool {
        match self {
            AmountBucket::Small => amount < MEDIUM_AMOUNT_FLOOR,
            AmountBucket::Medium => (MEDIUM_AMOUNT_FLOOR..LARGE_AMOUNT_FLOOR).contains(&amount),
            AmountBucket::Large => amount >= LARGE_AMOUNT_FLOOR,
            AmountBucket::NoneUnknown => false,
        }
    }

    /// Whether a possibly-absent amount matches this bucket.
    ///
    /// Absent matches only `NoneUnknown`; present values match per
    /// [`AmountBucket::contains`].
    pub fn matches(&self, amount: Option<f64>) -> bool {
        match amount {
            Some(value) => self.contains(value),
            None => matches!(self, AmountBucket::NoneUnknown),
        }
    }
}

impl std::fmt::Display for AmountBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One year in days, as the bucket boundaries define it
const YEAR_DAYS: f64 = 365.0;

/// Bucketed partition of a project duration in days.
///
/// Half-open intervals: `[0, 365)`, `[365, 1095)`, `[1095, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    UnderOneYear,
    OneToThreeYears,
    ThreeYearsPlus,
}

impl DurationBucket {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::UnderOneYear => "under_one_year",
            DurationBucket::OneToThreeYears => "one_to_three_years",
            DurationBucket::ThreeYearsPlus => "three_years_plus",
        }
    }

    /// Whether a parsed duration (in days) falls inside this bucket
    pub fn contains(&self, days: f64) -> bool {
        match self {
            DurationBucket::UnderOneYear => days < YEAR_DAYS,
            DurationBucket::OneToThreeYears => (YEAR_DAYS..YEAR_DAYS * 3.0).contains(&days),
            DurationBucket::ThreeYearsPlus => days >= YEAR_DAYS * 3.0,
        }
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An optional numeric interval with inclusive bounds.
///
/// Either bound may be absent. A record with no parsable value always
/// fails a range constraint: a range presumes a measurable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
}

impl NumericRange {
    /// Create a range with both bounds
    pub fn new(min: impl Into<Option<f64>>, max: impl Into<Option<f64>>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Range bounded below only
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Range bounded above only
    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Whether the range carries no bound at all (a no-op constraint)
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether a value satisfies the supplied bound(s)
    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min
            && value < min
        {
            return false;
        }
        if let Some(max) = self.max
            && value > max
        {
            return false;
        }
        true
    }
}

/// Attribute a result set can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Title,
    Status,
    Region,
    Institution,
    Budget,
    CoFinancing,
    StartDate,
    Duration,
}

impl SortKey {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::Status => "status",
            SortKey::Region => "region",
            SortKey::Institution => "institution",
            SortKey::Budget => "budget",
            SortKey::CoFinancing => "co_financing",
            SortKey::StartDate => "start_date",
            SortKey::Duration => "duration",
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    /// Parse a sort key name, accepting the synonyms the record fields use.
    ///
    /// Unknown names are rejected rather than silently ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "title" | "name" | "project_name" => Ok(SortKey::Title),
            "status" => Ok(SortKey::Status),
            "region" | "country" | "country_region" => Ok(SortKey::Region),
            "institution" | "organization" => Ok(SortKey::Institution),
            "budget" | "total_amount" => Ok(SortKey::Budget),
            "co_financing" | "cofinancing" => Ok(SortKey::CoFinancing),
            "start_date" | "start" => Ok(SortKey::StartDate),
            "duration" | "duration_days" => Ok(SortKey::Duration),
            _ => Err(QueryError::UnknownSortKey { key: s.to_string() }),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!(
                "invalid sort direction '{}'. Valid values: asc, desc",
                s
            )),
        }
    }
}

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Declarative filter/sort/page specification for one query.
///
/// Every field is optional and independently composable. An absent or
/// empty filter never excludes records.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectQuery {
    /// Case-insensitive substring search over title, institution,
    /// region, and status
    pub search: Option<String>,
    /// Normalized status membership (OR semantics)
    pub statuses: Vec<Status>,
    /// Region labels, matched by substring containment in the record field
    pub regions: Vec<String>,
    /// Theme labels, matched by substring containment
    pub themes: Vec<String>,
    /// Source sites, exact membership
    pub sites: Vec<String>,
    /// Institutions, exact membership
    pub institutions: Vec<String>,
    /// Loan types, exact membership
    pub loan_types: Vec<String>,
    /// Budget buckets (`NoneUnknown` is not meaningful for budget and
    /// matches nothing)
    pub budget_buckets: Vec<AmountBucket>,
    /// Co-financing buckets, including `NoneUnknown`
    pub co_financing_buckets: Vec<AmountBucket>,
    /// Duration buckets
    pub duration_buckets: Vec<DurationBucket>,
    /// Budget interval in USD
    pub budget_range: Option<NumericRange>,
    /// Co-financing interval in USD
    pub co_financing_range: Option<NumericRange>,
    /// Duration interval in days
    pub duration_range: Option<NumericRange>,
    /// Start-year interval
    pub start_year_range: Option<NumericRange>,
    /// Exact owner scope for the "my projects" view
    pub owner_email: Option<String>,
    /// Sort attribute; `None` keeps the input order
    pub sort_key: Option<SortKey>,
    /// Sort direction, ascending by default
    pub sort_direction: SortDirection,
    /// 1-based page number; out-of-range values are clamped
    pub page: usize,
    /// Records per page; must be at least 1
    pub page_size: usize,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            search: None,
            statuses: Vec::new(),
            regions: Vec::new(),
            themes: Vec::new(),
            sites: Vec::new(),
            institutions: Vec::new(),
            loan_types: Vec::new(),
            budget_buckets: Vec::new(),
            co_financing_buckets: Vec::new(),
            duration_buckets: Vec::new(),
            budget_range: None,
            co_financing_range: None,
            duration_range: None,
            start_year_range: None,
            owner_email: None,
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProjectQuery {
    /// Create a new empty query (matches everything, first page)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search string
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Add a status to filter by
    pub fn with_status(mut self, status: Status) -> Self {
        self.statuses.push(status);
        self
    }

    /// Add multiple statuses to filter by
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses.extend(statuses);
        self
    }

    /// Add a region label to filter by
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.regions.push(region.into());
        self
    }

    /// Add multiple region labels to filter by
    pub fn with_regions(mut self, regions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.regions.extend(regions.into_iter().map(|r| r.into()));
        self
    }

    /// Add a theme label to filter by
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.themes.push(theme.into());
        self
    }

    /// Add a source site to filter by
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.sites.push(site.into());
        self
    }

    /// Add an institution to filter by
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institutions.push(institution.into());
        self
    }

    /// Add a loan type to filter by
    pub fn with_loan_type(mut self, loan_type: impl Into<String>) -> Self {
        self.loan_types.push(loan_type.into());
        self
    }

    /// Add a budget bucket to filter by
    pub fn with_budget_bucket(mut self, bucket: AmountBucket) -> Self {
        self.budget_buckets.push(bucket);
        self
    }

    /// Add a co-financing bucket to filter by
    pub fn with_co_financing_bucket(mut self, bucket: AmountBucket) -> Self {
        self.co_financing_buckets.push(bucket);
        self
    }

    /// Add a duration bucket to filter by
    pub fn with_duration_bucket(mut self, bucket: DurationBucket) -> Self {
        self.duration_buckets.push(bucket);
        self
    }

    /// Constrain the budget to an interval
    pub fn with_budget_range(mut self, range: NumericRange) -> Self {
        self.budget_range = Some(range);
        self
    }

    /// Constrain the co-financing amount to an interval
    pub fn with_co_financing_range(mut self, range: NumericRange) -> Self {
        self.co_financing_range = Some(range);
        self
    }

    /// Constrain the duration (in days) to an interval
    pub fn with_duration_range(mut self, range: NumericRange) -> Self {
        self.duration_range = Some(range);
        self
    }

    /// Constrain the start year to an interval
    pub fn with_start_year_range(mut self, range: NumericRange) -> Self {
        self.start_year_range = Some(range);
        self
    }

    /// Scope to projects owned by the given email
    pub fn owned_by(mut self, email: impl Into<String>) -> Self {
        self.owner_email = Some(email.into());
        self
    }

    /// Sort by the given key and direction
    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = Some(key);
        self.sort_direction = direction;
        self
    }

    /// Request a specific page
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}
