use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A movie summary as returned by the metadata service.
///
/// Only the fields the catalogue shows are modelled; anything else in the
/// payload is ignored. Missing or null fields fall back to their defaults so
/// one incomplete entry never rejects a whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Movie {
    /// Release year parsed from `release_date` (`"YYYY-MM-DD"`), if present.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| y.len() == 4)
    }
}

/// Search popularity counter for one normalized search term.
///
/// `movie_id`, `title` and `poster_url` are a snapshot of the top result
/// taken when the counter was first created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCount {
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The representative movie stored alongside a new counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovieSnapshot<'a> {
    pub movie_id: i64,
    pub title: &'a str,
    pub poster_url: Option<&'a str>,
}

/// Normalize a raw search term into a counter key.
///
/// Trims, collapses whitespace runs to a single space and lowercases.
/// Returns `None` when nothing is left.
#[must_use]
pub fn normalize_search_term(raw: &str) -> Option<String> {
    let normalized = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Build the full poster URL for a movie's `poster_path`.
#[must_use]
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    let path = poster_path.map(str::trim).filter(|p| !p.is_empty())?;
    let base = image_base_url.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{base}{path}"))
    } else {
        Some(format!("{base}/{path}"))
    }
}
