use marquee_appwrite::AppwriteError;
use marquee_core::FETCH_FAILED_MESSAGE;
use marquee_db::DbError;
use marquee_tmdb::TmdbError;
use thiserror::Error;

/// Why a movie listing could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The service answered but reported a failure in the body.
    #[error("movie service reported: {0}")]
    Service(String),

    /// The request failed or the response was unusable.
    #[error("movie service unavailable: {0}")]
    Transport(String),
}

impl FetchFailure {
    /// Text shown to the user in place of the result list.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            FetchFailure::Service(message) => message,
            FetchFailure::Transport(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

impl From<TmdbError> for FetchFailure {
    fn from(err: TmdbError) -> Self {
        match err {
            TmdbError::ApiError(_) => FetchFailure::Service(err.user_message()),
            other => FetchFailure::Transport(other.to_string()),
        }
    }
}

/// Popularity store failures. Never shown to the user; logged only.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("search term is empty after normalization")]
    EmptyTerm,

    #[error("postgres store: {0}")]
    Postgres(#[source] DbError),

    #[error("appwrite store: {0}")]
    Appwrite(#[source] AppwriteError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::EmptySearchTerm => StoreError::EmptyTerm,
            other => StoreError::Postgres(other),
        }
    }
}

impl From<AppwriteError> for StoreError {
    fn from(err: AppwriteError) -> Self {
        match err {
            AppwriteError::EmptySearchTerm => StoreError::EmptyTerm,
            other => StoreError::Appwrite(other),
        }
    }
}

/// Failures while wiring the catalogue from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("TMDB_API_KEY is not set")]
    MissingTmdbKey,

    #[error("APPWRITE_* settings are required for the appwrite backend")]
    MissingAppwriteSettings,

    #[error(transparent)]
    Tmdb(#[from] TmdbError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Appwrite(#[from] AppwriteError),
}
