//! Wires concrete collaborators from [`AppConfig`].

use std::sync::Arc;

use marquee_appwrite::AppwriteClient;
use marquee_core::{AppConfig, PopularityBackend};
use marquee_tmdb::TmdbClient;

use crate::adapters::{AppwritePopularityStore, PgPopularityStore};
use crate::error::BuildError;
use crate::service::Catalogue;
use crate::store::{MemoryPopularityStore, MovieSource, PopularityStore};

/// Builds the TMDB-backed movie source.
///
/// # Errors
///
/// Returns [`BuildError::MissingTmdbKey`] when no key is configured, or
/// [`BuildError::Tmdb`] if the client cannot be constructed.
pub fn build_movie_source(config: &AppConfig) -> Result<Arc<dyn MovieSource>, BuildError> {
    let api_key = config
        .tmdb_api_key
        .as_deref()
        .ok_or(BuildError::MissingTmdbKey)?;
    let client = TmdbClient::with_base_url(
        api_key,
        config.tmdb_request_timeout_secs,
        &config.tmdb_base_url,
    )?;
    Ok(Arc::new(client))
}

/// Builds the configured popularity store.
///
/// The Postgres backend connects and applies pending migrations.
///
/// # Errors
///
/// Returns [`BuildError`] if the backend cannot be reached or is missing
/// settings.
pub async fn build_popularity_store(
    config: &AppConfig,
) -> Result<Arc<dyn PopularityStore>, BuildError> {
    let image_base = config.tmdb_image_base_url.clone();

    let store: Arc<dyn PopularityStore> = match config.popularity_backend {
        PopularityBackend::Postgres => {
            let pool = marquee_db::connect_pool_from_config(config).await?;
            let applied = marquee_db::run_migrations(&pool).await?;
            if applied > 0 {
                tracing::info!(applied, "applied database migrations");
            }
            Arc::new(PgPopularityStore::new(pool, image_base))
        }
        PopularityBackend::Appwrite => {
            let settings = config
                .appwrite
                .as_ref()
                .ok_or(BuildError::MissingAppwriteSettings)?;
            let client = AppwriteClient::new(settings, config.tmdb_request_timeout_secs)?;
            Arc::new(AppwritePopularityStore::new(client, image_base))
        }
        PopularityBackend::Memory => Arc::new(MemoryPopularityStore::new(image_base)),
    };

    tracing::debug!(backend = store.backend_name(), "popularity store ready");
    Ok(store)
}

/// Builds the movie source and popularity store together.
///
/// # Errors
///
/// See [`build_movie_source`] and [`build_popularity_store`].
pub async fn build_catalogue(config: &AppConfig) -> Result<Catalogue, BuildError> {
    let source = build_movie_source(config)?;
    let store = build_popularity_store(config).await?;
    Ok(Catalogue::new(source, store))
}
