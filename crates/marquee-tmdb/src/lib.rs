//! Client for the TMDB (The Movie Database) v3 REST API.
//!
//! Only the two listing shapes the catalogue needs are covered: discover by
//! popularity and free-text search.

pub mod client;
pub mod error;
pub mod types;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use types::MoviePage;
