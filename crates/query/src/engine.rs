//! The project query engine
//!
//! A pure transform from (records, query) to one page of results plus
//! paging metadata. No I/O, no caching, no mutation of the input: calling
//! twice with identical inputs yields identical output.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::query::{ProjectQuery, SortDirection, SortKey};
use crate::record::ProjectRecord;

/// One page of query results plus paging metadata
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage {
    /// Records on the requested (clamped) page, at most `page_size` of them
    pub items: Vec<ProjectRecord>,
    /// Number of records matching the filters, across all pages
    pub total_matches: usize,
    /// Number of pages the match set spans (at least 1)
    pub total_pages: usize,
    /// The page actually returned, clamped into `[1, total_pages]`
    pub page: usize,
}

/// Stateless filter/sort/paginate engine over project records
pub struct ProjectQueryEngine;

impl ProjectQueryEngine {
    /// Run a query against the full working set of records.
    ///
    /// Filters with AND semantics across categories, sorts stably (input
    /// order breaks ties), then slices out the requested page. A zero-result
    /// match set is not an error; it pages as one empty page.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidPageSize` if `query.page_size` is 0.
    pub fn run(records: &[ProjectRecord], query: &ProjectQuery) -> QueryResult<QueryPage> {
        if query.page_size == 0 {
            return Err(QueryError::InvalidPageSize);
        }

        let mut matched: Vec<&ProjectRecord> =
            records.iter().filter(|r| matches(r, query)).collect();

        if let Some(key) = query.sort_key {
            sort_records(&mut matched, key, query.sort_direction);
        }

        let total_matches = matched.len();
        let total_pages = total_matches.div_ceil(query.page_size).max(1);
        let page = query.page.clamp(1, total_pages);

        let start = (page - 1) * query.page_size;
        let end = (start + query.page_size).min(total_matches);
        let items: Vec<ProjectRecord> = matched
            .get(start..end)
            .unwrap_or(&[])
            .iter()
            .map(|r| (*r).clone())
            .collect();

        debug!(
            total = records.len(),
            matched = total_matches,
            page,
            total_pages,
            "query executed"
        );

        Ok(QueryPage {
            items,
            total_matches,
            total_pages,
            page,
        })
    }
}

static_assertions::assert_impl_all!(ProjectQueryEngine: Send, Sync);
static_assertions::assert_impl_all!(QueryPage: Send, Sync);

/// Whether a record passes every active filter in the query.
///
/// A record missing a field required by an active filter fails that filter;
/// the one exception is the explicit `NoneUnknown` co-financing bucket.
fn matches(record: &ProjectRecord, query: &ProjectQuery) -> bool {
    matches_search(record, query)
        && matches_statuses(record, query)
        && matches_containment(record.region(), &query.regions)
        && matches_containment(record.theme(), &query.themes)
        && matches_membership(record.site(), &query.sites)
        && matches_membership(record.institution(), &query.institutions)
        && matches_membership(record.loan_type(), &query.loan_types)
        && matches_budget_buckets(record, query)
        && matches_co_financing_buckets(record, query)
        && matches_duration_buckets(record, query)
        && matches_range(record.budget(), query.budget_range)
        && matches_range(record.co_financing(), query.co_financing_range)
        && matches_range(record.duration_days(), query.duration_range)
        && matches_range(
            record.start_year().map(|y| y as f64),
            query.start_year_range,
        )
        && matches_owner(record, query)
}

/// Case-insensitive substring search over the fixed searchable fields:
/// title, institution, region, and the raw status label.
fn matches_search(record: &ProjectRecord, query: &ProjectQuery) -> bool {
    let needle = match &query.search {
        Some(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
        _ => return true,
    };

    [
        record.title(),
        record.institution(),
        record.region(),
        record.status_label(),
    ]
    .iter()
    .flatten()
    .any(|haystack| haystack.to_lowercase().contains(&needle))
}

fn matches_statuses(record: &ProjectRecord, query: &ProjectQuery) -> bool {
    if query.statuses.is_empty() {
        return true;
    }
    match record.status() {
        Some(status) => query.statuses.contains(&status),
        None => false,
    }
}

/// Set filter with substring containment: the record matches if any
/// selected label occurs inside its field value. Supports compound
/// multi-value fields like "Bangladesh / India".
fn matches_containment(value: Option<&str>, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    match value {
        Some(field) => selected.iter().any(|label| field.contains(label.as_str())),
        None => false,
    }
}

/// Set filter with exact membership on the normalized field value
fn matches_membership(value: Option<&str>, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    match value {
        Some(field) => selected.iter().any(|label| label == field),
        None => false,
    }
}

/// Budget buckets require a parsed value; absent budgets never match.
fn matches_budget_buckets(record: &ProjectRecord, query: &ProjectQuery) -> bool {
    if query.budget_buckets.is_empty() {
        return true;
    }
    match record.budget() {
        Some(amount) => query.budget_buckets.iter().any(|b| b.contains(amount)),
        None => false,
    }
}

/// Co-financing buckets additionally support `NoneUnknown` for absent values.
fn matches_co_financing_buckets(record: &ProjectRecord, query: &ProjectQuery) -> bool {
    if query.co_financing_buckets.is_empty() {
        return true;
    }
    let amount = record.co_financing();
    query
        .co_financing_buckets
        .iter()
        .any(|b| b.matches(amount))
}

fn matches_duration_buckets(record: &ProjectRecord, query: &ProjectQuery) -> bool {
    if query.duration_buckets.is_empty() {
        return true;
    }
    match record.duration_days() {
        Some(days) => query.duration_buckets.iter().any(|b| b.contains(days)),
        None => false,
    }
}

/// Range filters require a parsable value; absent values are excluded.
fn matches_range(value: Option<f64>, range: Option<crate::query::NumericRange>) -> bool {
    let Some(range) = range else {
        return true;
    };
    if range.is_unbounded() {
        return true;
    }
    match value {
        Some(v) => range.contains(v),
        None => false,
    }
}

fn matches_owner(record: &ProjectRecord, query: &ProjectQuery) -> bool {
    let Some(owner) = &query.owner_email else {
        return true;
    };
    match record.owner_email() {
        Some(email) => email == owner,
        None => false,
    }
}

/// A comparable projection of one record under a sort key.
///
/// Numbers order before text so mixed-type id columns stay deterministic.
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Extract the sortable projection of a record for the given key.
///
/// Text keys compare case-insensitively; dates compare as day numbers.
fn sort_value(record: &ProjectRecord, key: SortKey) -> Option<SortValue> {
    let text = |s: &str| SortValue::Text(s.to_lowercase());
    match key {
        SortKey::Id => record.id().map(|id| match id.parse::<f64>() {
            Ok(n) => SortValue::Number(n),
            Err(_) => text(&id),
        }),
        SortKey::Title => record.title().map(text),
        SortKey::Status => record.status().map(|s| text(s.as_str())),
        SortKey::Region => record.region().map(text),
        SortKey::Institution => record.institution().map(text),
        SortKey::Budget => record.budget().map(SortValue::Number),
        SortKey::CoFinancing => record.co_financing().map(SortValue::Number),
        SortKey::StartDate => record
            .start_date()
            .map(|d| SortValue::Number(chrono::Datelike::num_days_from_ce(&d) as f64)),
        SortKey::Duration => record.duration_days().map(SortValue::Number),
    }
}

/// Stable sort by the given key.
///
/// Records without a sortable value order after all records that have one,
/// in both directions; the direction flips only comparisons between two
/// present values. Ties keep input order.
fn sort_records(records: &mut [&ProjectRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| {
        let av = sort_value(a, key);
        let bv = sort_value(b, key);
        match (av, bv) {
            (Some(a), Some(b)) => {
                let ord = a.compare(&b);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{AmountBucket, DurationBucket, NumericRange};
    use crate::record::Status;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ProjectRecord {
        ProjectRecord::from_value(value).expect("test record must be an object")
    }

    fn sample_records() -> Vec<ProjectRecord> {
        vec![
            record(json!({
                "id": 101,
                "title": "Afghanistan Climate Resilience Fund",
                "country_region": "Afghanistan",
                "institution": "Green Climate Fund",
                "status": "진행 중",
                "budget": 5_000_000,
                "co_financing": null,
                "ownerEmail": "aaa@aaa.com",
            })),
            record(json!({
                "id": 102,
                "title": "Bangladesh Coastal Protection Program",
                "country_region": "Bangladesh",
                "institution": "World Bank",
                "status": "진행 중",
                "budget": 15_000_000,
                "co_financing": 0,
                "ownerEmail": "aaa@aaa.com",
            })),
            record(json!({
                "id": 103,
                "title": "Brunei Renewable Energy Pilot",
                "country_region": "Brunei Darussalam",
                "institution": "GEF",
                "status": "예정",
                "budget": 60_000_000,
                "co_financing": 12_000_000,
                "ownerEmail": "bbb@bbb.com",
            })),
            record(json!({
                "id": 104,
                "title": "Regional Climate Data Platform",
                "country_region": "Hong Kong",
                "institution": "UNDP",
                "status": "완료",
                "budget": "NaN",
                "co_financing": 55_000_000,
                "ownerEmail": "admin@aaa.com",
            })),
            record(json!({
                "id": 105,
                "title": "Sahel Agroforestry Initiative",
                "country_region": "Bhutan",
                "institution": "IFAD",
                "status": "완료",
                "budget": 8_000_000,
                "co_financing": "",
                "ownerEmail": "bbb@bbb.com",
            })),
        ]
    }

    fn ids(page: &QueryPage) -> Vec<String> {
        page.items.iter().filter_map(|r| r.id()).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let records = sample_records();
        let page = ProjectQueryEngine::run(&records, &ProjectQuery::new()).unwrap();
        assert_eq!(page.total_matches, records.len());
        assert_eq!(page.page, 1);
        // Input order preserved with no sort key
        assert_eq!(ids(&page), vec!["101", "102", "103", "104", "105"]);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let records = sample_records();
        let query = ProjectQuery::new().page_size(0);
        let err = ProjectQueryEngine::run(&records, &query).unwrap_err();
        assert!(matches!(err, QueryError::InvalidPageSize));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = sample_records();
        let query = ProjectQuery::new().with_search("COASTAL");
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["102"]);
    }

    #[test]
    fn test_search_covers_institution_and_region() {
        let records = sample_records();

        let by_institution = ProjectQuery::new().with_search("world bank");
        let page = ProjectQueryEngine::run(&records, &by_institution).unwrap();
        assert_eq!(ids(&page), vec!["102"]);

        let by_region = ProjectQuery::new().with_search("bhutan");
        let page = ProjectQueryEngine::run(&records, &by_region).unwrap();
        assert_eq!(ids(&page), vec!["105"]);
    }

    #[test]
    fn test_whitespace_search_is_a_noop() {
        let records = sample_records();
        let query = ProjectQuery::new().with_search("   ");
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(page.total_matches, records.len());
    }

    #[test]
    fn test_status_filter_normalizes_tokens() {
        let records = sample_records();
        // Fixture statuses are Korean labels; the filter uses the enum
        let query = ProjectQuery::new().with_status(Status::Completed);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["104", "105"]);
    }

    #[test]
    fn test_region_filter_uses_substring_containment() {
        let records = sample_records();
        // "Brunei" is a substring of "Brunei Darussalam"
        let query = ProjectQuery::new().with_region("Brunei");
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["103"]);
    }

    #[test]
    fn test_institution_filter_is_exact() {
        let records = sample_records();
        let query = ProjectQuery::new().with_institution("GEF");
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["103"]);

        // A prefix is not a member
        let query = ProjectQuery::new().with_institution("GE");
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(page.total_matches, 0);
    }

    #[test]
    fn test_record_missing_field_fails_active_filter() {
        let records = vec![
            record(json!({ "id": 1, "institution": "UNDP" })),
            record(json!({ "id": 2 })),
        ];
        let query = ProjectQuery::new().with_institution("UNDP");
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["1"]);
    }

    #[test]
    fn test_budget_bucket_excludes_unparseable() {
        let records = sample_records();
        let query = ProjectQuery::new().with_budget_bucket(AmountBucket::Small);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        // 5M and 8M match; "NaN" budget (104) is excluded
        assert_eq!(ids(&page), vec!["101", "105"]);
    }

    #[test]
    fn test_co_financing_none_unknown_bucket() {
        let records = sample_records();
        let query =
            ProjectQuery::new().with_co_financing_bucket(AmountBucket::NoneUnknown);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        // null (101) and "" (105) are unknown; zero (102) is not
        assert_eq!(ids(&page), vec!["101", "105"]);
    }

    #[test]
    fn test_co_financing_zero_is_small() {
        let records = sample_records();
        let query = ProjectQuery::new().with_co_financing_bucket(AmountBucket::Small);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["102"]);
    }

    #[test]
    fn test_range_filter_excludes_absent_values() {
        let records = sample_records();
        let query =
            ProjectQuery::new().with_co_financing_range(NumericRange::at_least(1_000_000.0));
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        // null/"" co-financing excluded; 0 fails the bound
        assert_eq!(ids(&page), vec!["103", "104"]);
    }

    #[test]
    fn test_unbounded_range_is_a_noop() {
        let records = sample_records();
        let query = ProjectQuery::new().with_budget_range(NumericRange::default());
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(page.total_matches, records.len());
    }

    #[test]
    fn test_duration_bucket_filter() {
        let records = vec![
            record(json!({ "id": 1, "duration_days": 200 })),
            record(json!({ "id": 2, "duration_days": 365 })),
            record(json!({ "id": 3, "start_date": "2020-01-01", "end_date": "2024-01-01" })),
            record(json!({ "id": 4 })),
        ];

        let query = ProjectQuery::new().with_duration_bucket(DurationBucket::UnderOneYear);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["1"]);

        let query = ProjectQuery::new().with_duration_bucket(DurationBucket::ThreeYearsPlus);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["3"]);
    }

    #[test]
    fn test_start_year_range() {
        let records = vec![
            record(json!({ "id": 1, "start_date": "2014-05-01" })),
            record(json!({ "id": 2, "start_date": "2018-05-01" })),
            record(json!({ "id": 3, "startDate": "2025-01-01T00:00:00" })),
            record(json!({ "id": 4 })),
        ];
        let query =
            ProjectQuery::new().with_start_year_range(NumericRange::new(2015.0, 2025.0));
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["2", "3"]);
    }

    #[test]
    fn test_owner_scope_filter() {
        let records = sample_records();
        let query = ProjectQuery::new().owned_by("bbb@bbb.com");
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["103", "105"]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let records = sample_records();
        let query = ProjectQuery::new()
            .with_status(Status::InProgress)
            .with_budget_bucket(AmountBucket::Small);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["101"]);
    }

    #[test]
    fn test_sort_by_title_ascending() {
        let records = sample_records();
        let query = ProjectQuery::new()
            .sorted_by(SortKey::Title, SortDirection::Ascending)
            .page_size(10);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(ids(&page), vec!["101", "102", "103", "104", "105"]);
    }

    #[test]
    fn test_sort_by_budget_descending_absent_last() {
        let records = sample_records();
        let query = ProjectQuery::new().sorted_by(SortKey::Budget, SortDirection::Descending);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        // 60M, 15M, 8M, 5M, then the record with no parsable budget
        assert_eq!(ids(&page), vec!["103", "102", "105", "101", "104"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let records = sample_records();
        let query = ProjectQuery::new().sorted_by(SortKey::Status, SortDirection::Ascending);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        // completed (104, 105), in_progress (101, 102), planned (103);
        // within each group, input order is preserved
        assert_eq!(ids(&page), vec!["104", "105", "101", "102", "103"]);
    }

    #[test]
    fn test_pagination_slices_and_counts() {
        let records = sample_records();
        let query = ProjectQuery::new().page_size(2);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(page.total_matches, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);

        let last = ProjectQueryEngine::run(&records, &query.clone().page(3)).unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(ids(&last), vec!["105"]);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let records = sample_records();
        let query = ProjectQuery::new().page_size(2).page(9999);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(ids(&page), vec!["105"]);

        // Page 0 clamps up to 1
        let query = ProjectQuery::new().page_size(2).page(0);
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(ids(&page), vec!["101", "102"]);
    }

    #[test]
    fn test_zero_matches_is_one_empty_page() {
        let records = sample_records();
        let query = ProjectQuery::new().with_search("geothermal");
        let page = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(page.total_matches, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_run_does_not_mutate_records() {
        let records = sample_records();
        let before = records.clone();
        let query = ProjectQuery::new()
            .with_search("climate")
            .sorted_by(SortKey::Title, SortDirection::Descending);
        let _ = ProjectQueryEngine::run(&records, &query).unwrap();
        assert_eq!(records, before);
    }
}
