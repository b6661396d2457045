//! Data source for the CLI
//!
//! Loads the working set of project records from a JSON file. Two shapes
//! are accepted and auto-detected: a bare array of record objects (fixture
//! dumps), or the backend's listing envelope. With no path at all, the
//! built-in sample records are used.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use canopy_query::{ListingEnvelope, ProjectRecord};

use crate::error::{AppError, AppResult};
use crate::mock;

/// Load the working set from the given path, or the samples without one
pub fn load_records(path: Option<&Path>) -> AppResult<Vec<ProjectRecord>> {
    match path {
        Some(path) => load_from_file(path),
        None => Ok(mock::sample_projects()),
    }
}

/// Read and parse a data file
fn load_from_file(path: &Path) -> AppResult<Vec<ProjectRecord>> {
    let raw = fs::read_to_string(path).map_err(|e| AppError::ReadData {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: Value = serde_json::from_str(&raw).map_err(|e| AppError::ParseData {
        path: path.to_path_buf(),
        source: e,
    })?;

    records_from_value(value, path)
}

/// Interpret a parsed JSON document as a record set.
///
/// Arrays are taken as records directly; non-object elements are skipped
/// with a warning rather than failing the whole load. Objects are taken as
/// a listing envelope.
fn records_from_value(value: Value, path: &Path) -> AppResult<Vec<ProjectRecord>> {
    match value {
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match ProjectRecord::from_value(item) {
                    Some(record) => records.push(record),
                    None => warn!(path = %path.display(), "skipping non-object array element"),
                }
            }
            Ok(records)
        }
        value @ Value::Object(_) => {
            let envelope: ListingEnvelope =
                serde_json::from_value(value).map_err(|e| AppError::ParseData {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            Ok(envelope.into_records()?)
        }
        _ => Err(AppError::UnsupportedShape {
            path: path.to_path_buf(),
        }),
    }
}
