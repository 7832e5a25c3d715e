//! HTTP client for the TMDB v3 REST API.
//!
//! Wraps `reqwest` with bearer-token authentication and typed response
//! deserialization. Every listing checks the JSON body for a service-reported
//! failure and surfaces it as [`TmdbError::ApiError`].

use std::time::Duration;

use marquee_core::Movie;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};

use crate::error::TmdbError;
use crate::types::MoviePage;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for the TMDB REST API.
///
/// Use [`TmdbClient::new`] for production or [`TmdbClient::with_base_url`]
/// to point at a mock server in tests. The bearer token is fixed for the
/// lifetime of the client.
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl TmdbClient {
    /// Creates a new client pointed at the production TMDB API.
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, TmdbError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TmdbError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, TmdbError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("marquee/0.1 (movie-catalogue)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends to the version
        // segment instead of replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TmdbError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the catalogue listing for a committed query.
    ///
    /// A missing or blank query lists movies by descending popularity;
    /// anything else runs a free-text search.
    ///
    /// # Errors
    ///
    /// See [`TmdbClient::discover_movies`] and [`TmdbClient::search_movies`].
    pub async fn fetch_movies(&self, query: Option<&str>) -> Result<Vec<Movie>, TmdbError> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => self.search_movies(q).await,
            None => self.discover_movies().await,
        }
    }

    /// Lists movies sorted by descending popularity (`discover/movie`).
    ///
    /// # Errors
    ///
    /// - [`TmdbError::ApiError`] if the body reports a failure.
    /// - [`TmdbError::Http`] on network failure.
    /// - [`TmdbError::UnexpectedStatus`] on a non-2xx status.
    /// - [`TmdbError::Deserialize`] if the body does not match the expected shape.
    pub async fn discover_movies(&self) -> Result<Vec<Movie>, TmdbError> {
        let url = self.discover_url()?;
        tracing::debug!(url = %url, "TMDB discover request");
        self.fetch_page(&url, "discover/movie").await
    }

    /// Searches movies by free text (`search/movie`).
    ///
    /// # Errors
    ///
    /// Same as [`TmdbClient::discover_movies`].
    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, TmdbError> {
        let url = self.search_url(query)?;
        tracing::debug!(query = %query, "TMDB search request");
        self.fetch_page(&url, &format!("search/movie(query={query})"))
            .await
    }

    fn discover_url(&self) -> Result<Url, TmdbError> {
        self.build_url("discover/movie", "sort_by=popularity.desc")
    }

    fn search_url(&self, query: &str) -> Result<Url, TmdbError> {
        let encoded = utf8_percent_encode(query, QUERY_COMPONENT).to_string();
        self.build_url("search/movie", &format!("query={encoded}"))
    }

    /// Joins `path` onto the base URL and attaches an already-encoded query.
    fn build_url(&self, path: &str, encoded_query: &str) -> Result<Url, TmdbError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| TmdbError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.set_query(Some(encoded_query));
        Ok(url)
    }

    async fn fetch_page(&self, url: &Url, context: &str) -> Result<Vec<Movie>, TmdbError> {
        let body = self.request_json(url).await?;
        Self::check_api_error(&body)?;

        let page: MoviePage =
            serde_json::from_value(body).map_err(|e| TmdbError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;

        Ok(page.results)
    }

    /// Sends an authenticated GET, asserts a 2xx status, and parses the body
    /// as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, TmdbError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.path().to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TmdbError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    /// Checks the body for a failure flag embedded in a successful response.
    ///
    /// Two envelopes are recognised: `{"Response": "False", "Error": ...}`
    /// and TMDB's own `{"success": false, "status_message": ...}`.
    fn check_api_error(body: &serde_json::Value) -> Result<(), TmdbError> {
        let response_flag_false = match body.get("Response") {
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("false"),
            Some(serde_json::Value::Bool(b)) => !b,
            _ => false,
        };
        if response_flag_false {
            return Err(TmdbError::ApiError(Self::message_from(body, "Error")));
        }

        if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            return Err(TmdbError::ApiError(Self::message_from(
                body,
                "status_message",
            )));
        }

        Ok(())
    }

    fn message_from(body: &serde_json::Value, field: &str) -> String {
        body.get(field)
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(marquee_core::FETCH_FAILED_MESSAGE)
            .to_string()
    }
}
