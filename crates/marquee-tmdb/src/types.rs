//! TMDB response types.

use marquee_core::Movie;
use serde::Deserialize;

/// One page of a `discover/movie` or `search/movie` listing.
///
/// `results` falls back to an empty list when the field is absent or null.
#[derive(Debug, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Movie>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Movie>>::deserialize(deserializer)?.unwrap_or_default())
}
