//! Minimal client for the Appwrite Databases REST API, scoped to the search
//! counter collection.

pub mod client;
pub mod counters;
pub mod error;
pub mod query;
pub mod types;

pub use client::AppwriteClient;
pub use error::AppwriteError;
pub use query::Query;
pub use types::{CounterDocument, DocumentList};
