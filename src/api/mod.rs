//! Remote findings API: wire types, errors, and the blocking HTTP client
//!
//! The remote service owns ranking, filtering and pagination. This module
//! only shapes requests to it and decodes its responses.

mod client;
mod error;
mod types;

pub use client::{FindingsClient, API_KEY_HEADER};
pub use error::ApiError;
pub(crate) use types::optional_string_or_number;
pub use types::{
    Filters, FilterRequest, Finder, FinderLink, Finding, Impact, LabeledValue, RateLimit,
    ReportedWindow, SearchMetadata, SearchResponse, SortDirection, SortField, Tag, TagLink,
};
