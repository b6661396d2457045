//! Query engine for the Canopy project directory
//!
//! Takes a working set of loosely-typed project records plus a declarative
//! filter/sort/page specification and produces the page of records to
//! display, along with paging metadata. The engine is a pure transform:
//! no I/O, no caching, no mutation of its inputs.
//!
//! Supporting modules cover the boundary collaborators: synonym-resolving
//! record accessors, backend DTO mapping, facet option extraction, and the
//! caller-owned selection state.

pub mod dto;
pub mod engine;
pub mod error;
pub mod options;
pub mod query;
pub mod record;
pub mod selection;

pub use dto::{ListingData, ListingEnvelope, ProjectDto};
pub use engine::{ProjectQueryEngine, QueryPage};
pub use error::{QueryError, QueryResult};
pub use options::FacetOptions;
pub use query::{
    AmountBucket, DurationBucket, NumericRange, ProjectQuery, SortDirection, SortKey,
};
pub use record::{ProjectRecord, Status};

static_assertions::assert_impl_all!(ProjectRecord: Send, Sync);
static_assertions::assert_impl_all!(ProjectQuery: Send, Sync);
