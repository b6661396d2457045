use thiserror::Error;

/// Query error types for Canopy
#[derive(Error, Debug)]
pub enum QueryError {
    /// Error when a query asks for a page size that cannot produce a page
    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// Error when a sort key string does not name a sortable attribute
    #[error(
        "unknown sort key '{key}'. Valid keys: id, title, status, region, institution, budget, co_financing, start_date, duration"
    )]
    UnknownSortKey { key: String },

    /// Error when the backend listing envelope reports a failure code
    #[error("project listing rejected (code {code}): {message}")]
    ListingRejected { code: i64, message: String },
}

/// Result type alias for query operations
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_page_size_display() {
        let err = QueryError::InvalidPageSize;
        assert_eq!(err.to_string(), "page size must be at least 1");
    }

    #[test]
    fn test_unknown_sort_key_display() {
        let err = QueryError::UnknownSortKey {
            key: "color".to_string(),
        };
        let msg = err.to_string();
        assert!(
            msg.contains("unknown sort key 'color'"),
            "message should name the rejected key, got: {}",
            msg
        );
        assert!(
            msg.contains("Valid keys"),
            "message should list valid keys, got: {}",
            msg
        );
    }

    #[test]
    fn test_listing_rejected_display() {
        let err = QueryError::ListingRejected {
            code: 42,
            message: "backend unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "project listing rejected (code 42): backend unavailable"
        );
    }

    #[test]
    fn test_query_result_type_alias() {
        let ok: QueryResult<usize> = Ok(7);
        assert_eq!(ok.unwrap(), 7);

        let err: QueryResult<usize> = Err(QueryError::InvalidPageSize);
        assert!(err.is_err());
    }
}
