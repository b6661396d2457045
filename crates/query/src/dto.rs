//! Backend listing DTOs
//!
//! The REST listing endpoint returns `{ code, message, data: { projects } }`
//! with camelCase project DTOs. This module deserializes that envelope and
//! maps each DTO into a canonical `ProjectRecord`, so downstream code sees
//! the same record shape regardless of where the data came from.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{QueryError, QueryResult};
use crate::record::ProjectRecord;

/// One project as the backend serializes it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDto {
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    pub country_region: Option<String>,
    pub budget: Option<f64>,
    /// Coded status token: PLANNED | IN_PROGRESS | COMPLETED
    pub status: Option<String>,
    pub link: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration_days: Option<f64>,
    pub institution: Option<String>,
    pub site: Option<String>,
    pub theme_area: Option<String>,
    pub cofinancing: Option<f64>,
    pub loan_type: Option<String>,
    pub created_at: Option<String>,
}

impl ProjectDto {
    /// Map this DTO into a canonical record.
    ///
    /// Fields land under the snake_case names the synonym tables resolve
    /// first; absent DTO fields are simply not written, so they normalize
    /// to absent rather than to null placeholders. The backend has no
    /// owner concept, so mapped records carry no owner email.
    pub fn into_record(self) -> ProjectRecord {
        let mut fields = Map::new();

        if let Some(id) = self.project_id {
            fields.insert("id".to_string(), Value::from(id));
        }
        put_string(&mut fields, "title", self.project_name);
        // The listing has no description field; the project link stands in
        put_string(&mut fields, "description", self.link);
        put_string(&mut fields, "country_region", self.country_region);
        put_string(&mut fields, "status", self.status);
        put_string(&mut fields, "institution", self.institution);
        put_string(&mut fields, "site", self.site);
        put_string(&mut fields, "theme_area", self.theme_area);
        put_string(&mut fields, "loan_type", self.loan_type);
        put_string(&mut fields, "start_date", self.start_date);
        put_string(&mut fields, "end_date", self.end_date);
        put_string(&mut fields, "created_at", self.created_at);
        put_number(&mut fields, "budget", self.budget);
        put_number(&mut fields, "co_financing", self.cofinancing);
        put_number(&mut fields, "duration_days", self.duration_days);

        ProjectRecord::new(fields)
    }
}

fn put_string(fields: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(v) = value {
        fields.insert(key.to_string(), Value::String(v));
    }
}

fn put_number(fields: &mut Map<String, Value>, key: &str, value: Option<f64>) {
    if let Some(v) = value
        && let Some(n) = serde_json::Number::from_f64(v)
    {
        fields.insert(key.to_string(), Value::Number(n));
    }
}

/// Payload of a successful listing response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub projects: Vec<ProjectDto>,
}

/// The backend's response envelope.
///
/// `code == 0` means success; any other code is a rejection carrying a
/// human-readable message.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ListingData>,
}

impl ListingEnvelope {
    /// Unwrap the envelope into canonical records.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::ListingRejected` when `code != 0`.
    pub fn into_records(self) -> QueryResult<Vec<ProjectRecord>> {
        if self.code != 0 {
            return Err(QueryError::ListingRejected {
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| "no message provided".to_string()),
            });
        }

        Ok(self
            .data
            .unwrap_or_default()
            .projects
            .into_iter()
            .map(ProjectDto::into_record)
            .collect())
    }
}
