pub mod app_config;
pub mod config;
pub mod movies;

use thiserror::Error;

pub use app_config::{AppConfig, AppwriteSettings, Environment, PopularityBackend};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use movies::{normalize_search_term, poster_url, Movie, MovieSnapshot, SearchCount};

/// Error message shown to users whenever the movie service cannot be reached
/// or answers with something other than a usable result list.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch movies";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
