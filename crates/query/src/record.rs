//! Project records and field normalization
//!
//! Records arrive from several origins (mock fixtures, a mapped REST DTO,
//! CSV-derived generators) with non-uniform field names. Each logical
//! attribute is read through a fixed synonym table: the first present,
//! non-placeholder value wins and is coerced to the attribute's type.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Project lifecycle status
///
/// Source data carries status either as the backend's coded tokens
/// (`PLANNED`, `IN_PROGRESS`, `COMPLETED`) or as the human-readable
/// Korean labels used by the fixtures (`예정`, `진행 중`, `완료`).
/// Both normalize to this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Planned,
    InProgress,
    Completed,
}

impl Status {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Planned => "planned",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }

    /// Parse a status token into a Status.
    ///
    /// Accepts the coded enum tokens, their snake_case forms, and the
    /// Korean display labels. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Status> {
        match s.trim() {
            "PLANNED" | "planned" | "예정" => Some(Status::Planned),
            "IN_PROGRESS" | "in_progress" | "진행 중" | "진행중" => Some(Status::InProgress),
            "COMPLETED" | "completed" | "완료" => Some(Status::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Synonym tables, in resolution priority order. The first present,
// non-placeholder field wins. Order is part of the contract: changing it
// changes which value a mixed-shape record resolves to.
const ID_FIELDS: &[&str] = &["id", "projectId", "project_id"];
const TITLE_FIELDS: &[&str] = &["title", "projectName", "project_name", "name"];
const DESCRIPTION_FIELDS: &[&str] = &["description", "link"];
const STATUS_FIELDS: &[&str] = &["status", "rawStatus", "raw_status"];
const REGION_FIELDS: &[&str] = &["country_region", "countryRegion", "region", "country"];
const THEME_FIELDS: &[&str] = &["theme_area", "themeArea", "theme"];
const SITE_FIELDS: &[&str] = &["site", "source_site"];
const INSTITUTION_FIELDS: &[&str] = &["institution", "organization", "agency_name"];
const LOAN_TYPE_FIELDS: &[&str] = &["loan_type", "loanType", "funding_type"];
const BUDGET_FIELDS: &[&str] = &["budget", "total_amount", "budget_usd"];
const CO_FINANCING_FIELDS: &[&str] = &["co_financing", "cofinancing"];
const START_DATE_FIELDS: &[&str] = &["start_date", "startDate", "start"];
const END_DATE_FIELDS: &[&str] = &["end_date", "endDate", "end"];
const DURATION_FIELDS: &[&str] = &["duration_days", "durationDays"];
const OWNER_FIELDS: &[&str] = &["ownerEmail", "owner_email"];

/// A loosely-typed record describing one funded project.
///
/// Wraps the raw JSON object as delivered by the data source. All reads go
/// through the typed accessors below, which resolve synonyms and coerce
/// values; malformed or placeholder values resolve to absent, never panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRecord(Map<String, Value>);

impl ProjectRecord {
    /// Create a record from a raw field map
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Create a record from a JSON value, if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Access the underlying field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The unique record identifier, as a string.
    ///
    /// Numeric ids are rendered in decimal so fixture ids (`101`) and DTO
    /// ids compare equal to their string forms.
    pub fn id(&self) -> Option<String> {
        match self.first_present(ID_FIELDS)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Display title
    pub fn title(&self) -> Option<&str> {
        self.string_field(TITLE_FIELDS)
    }

    /// Free-text description (the DTO reuses its `link` field here)
    pub fn description(&self) -> Option<&str> {
        self.string_field(DESCRIPTION_FIELDS)
    }

    /// Raw status token as stored, before normalization
    pub fn status_label(&self) -> Option<&str> {
        self.string_field(STATUS_FIELDS)
    }

    /// Normalized status, if the stored token is recognized
    pub fn status(&self) -> Option<Status> {
        self.string_field(STATUS_FIELDS).and_then(Status::parse)
    }

    /// Region or country string (free text)
    pub fn region(&self) -> Option<&str> {
        self.string_field(REGION_FIELDS)
    }

    /// Theme / topic area
    pub fn theme(&self) -> Option<&str> {
        self.string_field(THEME_FIELDS)
    }

    /// Source site
    pub fn site(&self) -> Option<&str> {
        self.string_field(SITE_FIELDS)
    }

    /// Implementing institution
    pub fn institution(&self) -> Option<&str> {
        self.string_field(INSTITUTION_FIELDS)
    }

    /// Funding / loan type
    pub fn loan_type(&self) -> Option<&str> {
        self.string_field(LOAN_TYPE_FIELDS)
    }

    /// Budget amount in USD
    pub fn budget(&self) -> Option<f64> {
        self.number_field(BUDGET_FIELDS)
    }

    /// Co-financing amount in USD
    pub fn co_financing(&self) -> Option<f64> {
        self.number_field(CO_FINANCING_FIELDS)
    }

    /// Project start date
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.date_field(START_DATE_FIELDS)
    }

    /// Project end date
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.date_field(END_DATE_FIELDS)
    }

    /// Year the project starts.
    ///
    /// Extracted from the parsed start date; if the date string is not a
    /// full parsable date, a leading 4-digit year is still accepted.
    pub fn start_year(&self) -> Option<i32> {
        if let Some(date) = self.start_date() {
            return Some(date.year());
        }
        let raw = self.string_field(START_DATE_FIELDS)?;
        let prefix = raw.get(..4)?;
        if prefix.bytes().all(|b| b.is_ascii_digit()) {
            prefix.parse().ok()
        } else {
            None
        }
    }

    /// Duration in days, provided or derived from start/end dates
    pub fn duration_days(&self) -> Option<f64> {
        if let Some(days) = self.number_field(DURATION_FIELDS) {
            return Some(days);
        }
        let start = self.start_date()?;
        let end = self.end_date()?;
        Some((end - start).num_days() as f64)
    }

    /// Owning user's email, where the source carries one
    pub fn owner_email(&self) -> Option<&str> {
        self.string_field(OWNER_FIELDS)
    }

    /// Resolve the first present, non-placeholder value among synonyms.
    fn first_present(&self, names: &[&str]) -> Option<&Value> {
        names
            .iter()
            .filter_map(|name| self.0.get(*name))
            .find(|value| !is_placeholder(value))
    }

    /// Resolve a string-valued attribute
    fn string_field(&self, names: &[&str]) -> Option<&str> {
        match self.first_present(names)? {
            Value::String(s) => Some(s.trim()),
            _ => None,
        }
    }

    /// Resolve a numeric attribute, accepting numbers and numeric strings
    fn number_field(&self, names: &[&str]) -> Option<f64> {
        match self.first_present(names)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Resolve a date-valued attribute
    fn date_field(&self, names: &[&str]) -> Option<NaiveDate> {
        let raw = self.string_field(names)?;
        parse_date(raw)
    }
}

/// Whether a raw value is an absence sentinel.
///
/// The CSV-derived fixtures use empty strings and textual "nan"/"NaN" to
/// mean "no value"; JSON null means the same from the DTO mapper.
fn is_placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let t = s.trim();
            t.is_empty() || t.eq_ignore_ascii_case("nan")
        }
        _ => false,
    }
}

/// Parse a date string in the formats the sources actually produce:
/// plain ISO dates, ISO datetimes with or without offset, and slashed dates.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return Some(date);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ProjectRecord {
        ProjectRecord::from_value(value).expect("test record must be an object")
    }

    #[test]
    fn test_status_parse_coded_tokens() {
        assert_eq!(Status::parse("PLANNED"), Some(Status::Planned));
        assert_eq!(Status::parse("IN_PROGRESS"), Some(Status::InProgress));
        assert_eq!(Status::parse("COMPLETED"), Some(Status::Completed));
    }

    #[test]
    fn test_status_parse_korean_labels() {
        assert_eq!(Status::parse("예정"), Some(Status::Planned));
        assert_eq!(Status::parse("진행 중"), Some(Status::InProgress));
        assert_eq!(Status::parse("완료"), Some(Status::Completed));
    }

    #[test]
    fn test_status_parse_unknown_token() {
        assert_eq!(Status::parse("archived"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_id_from_number_and_string() {
        let numeric = record(json!({ "id": 101 }));
        assert_eq!(numeric.id(), Some("101".to_string()));

        let string = record(json!({ "projectId": "P-7" }));
        assert_eq!(string.id(), Some("P-7".to_string()));
    }

    #[test]
    fn test_title_synonym_priority() {
        // "title" wins over "name" when both are present
        let r = record(json!({ "name": "fallback", "title": "Coastal resilience" }));
        assert_eq!(r.title(), Some("Coastal resilience"));

        let r = record(json!({ "projectName": "Mangrove restoration" }));
        assert_eq!(r.title(), Some("Mangrove restoration"));
    }

    #[test]
    fn test_region_synonyms() {
        let r = record(json!({ "country_region": "Bangladesh" }));
        assert_eq!(r.region(), Some("Bangladesh"));

        let r = record(json!({ "country": "Bhutan" }));
        assert_eq!(r.region(), Some("Bhutan"));

        let r = record(json!({ "region": "Southeast Asia", "country": "Laos" }));
        assert_eq!(r.region(), Some("Southeast Asia"));
    }

    #[test]
    fn test_placeholder_values_are_absent() {
        let r = record(json!({
            "country_region": "nan",
            "theme_area": "NaN",
            "site": "",
            "institution": null,
        }));
        assert_eq!(r.region(), None);
        assert_eq!(r.theme(), None);
        assert_eq!(r.site(), None);
        assert_eq!(r.institution(), None);
    }

    #[test]
    fn test_placeholder_falls_through_to_next_synonym() {
        // A placeholder in the highest-priority field must not mask a real
        // value stored under a lower-priority synonym.
        let r = record(json!({ "country_region": "nan", "country": "Fiji" }));
        assert_eq!(r.region(), Some("Fiji"));
    }

    #[test]
    fn test_budget_from_number_and_numeric_string() {
        let r = record(json!({ "budget": 12_500_000 }));
        assert_eq!(r.budget(), Some(12_500_000.0));

        let r = record(json!({ "total_amount": "8000000" }));
        assert_eq!(r.budget(), Some(8_000_000.0));
    }

    #[test]
    fn test_budget_unparseable_is_absent() {
        let r = record(json!({ "budget": "approx ten million" }));
        assert_eq!(r.budget(), None);

        let r = record(json!({ "budget": null }));
        assert_eq!(r.budget(), None);
    }

    #[test]
    fn test_co_financing_synonyms() {
        let r = record(json!({ "cofinancing": 3_000_000 }));
        assert_eq!(r.co_financing(), Some(3_000_000.0));
    }

    #[test]
    fn test_start_date_formats() {
        let plain = record(json!({ "start_date": "2021-03-15" }));
        assert_eq!(
            plain.start_date(),
            NaiveDate::from_ymd_opt(2021, 3, 15)
        );

        let datetime = record(json!({ "startDate": "2021-03-15T00:00:00" }));
        assert_eq!(
            datetime.start_date(),
            NaiveDate::from_ymd_opt(2021, 3, 15)
        );

        let offset = record(json!({ "startDate": "2021-03-15T09:00:00+09:00" }));
        assert_eq!(
            offset.start_date(),
            NaiveDate::from_ymd_opt(2021, 3, 15)
        );
    }

    #[test]
    fn test_start_year_from_date_and_prefix() {
        let r = record(json!({ "start_date": "2019-06-01" }));
        assert_eq!(r.start_year(), Some(2019));

        // Unparseable as a full date, but carries a usable year prefix
        let r = record(json!({ "start_date": "2022 (estimated)" }));
        assert_eq!(r.start_year(), Some(2022));

        let r = record(json!({ "start_date": "unknown" }));
        assert_eq!(r.start_year(), None);
    }

    #[test]
    fn test_duration_provided_wins_over_derived() {
        let r = record(json!({
            "duration_days": 500,
            "start_date": "2020-01-01",
            "end_date": "2020-02-01",
        }));
        assert_eq!(r.duration_days(), Some(500.0));
    }

    #[test]
    fn test_duration_derived_from_dates() {
        let r = record(json!({
            "start_date": "2020-01-01",
            "end_date": "2021-01-01",
        }));
        assert_eq!(r.duration_days(), Some(366.0)); // 2020 is a leap year
    }

    #[test]
    fn test_duration_absent_without_dates() {
        let r = record(json!({ "start_date": "2020-01-01" }));
        assert_eq!(r.duration_days(), None);
    }

    #[test]
    fn test_owner_email_synonyms() {
        let r = record(json!({ "ownerEmail": "aaa@aaa.com" }));
        assert_eq!(r.owner_email(), Some("aaa@aaa.com"));

        let r = record(json!({ "owner_email": "bbb@bbb.com" }));
        assert_eq!(r.owner_email(), Some("bbb@bbb.com"));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(ProjectRecord::from_value(json!([1, 2, 3])).is_none());
        assert!(ProjectRecord::from_value(json!("text")).is_none());
    }

    #[test]
    fn test_record_serde_transparent_round_trip() {
        let r = record(json!({ "id": 1, "title": "Solar microgrid" }));
        let encoded = serde_json::to_value(&r).unwrap();
        assert_eq!(encoded, json!({ "id": 1, "title": "Solar microgrid" }));
    }
}
