//! Search endpoint API for the Medlook UI.
//!
//! Wire types for the `/api/search` JSON contract and the HTTP client
//! used to execute queries against it.

pub mod client;
pub mod protocol;

pub use client::{HttpSearchClient, SearchClient};
pub use protocol::{ResultItem, SearchResponse};
