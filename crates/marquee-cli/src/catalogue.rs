//! One-shot `movies` and `trending` commands.

use marquee_catalogue::PopularityStore;
use marquee_core::AppConfig;

use crate::render::{render_movies, render_trending};

/// Fetch and print one listing.
///
/// Waits for the search to be recorded before returning so the process does
/// not exit with the write still in flight.
///
/// # Errors
///
/// Returns an error if the catalogue cannot be built or the fetch fails.
pub(crate) async fn run_movies(config: &AppConfig, query: Option<&str>) -> anyhow::Result<()> {
    let catalogue = marquee_catalogue::build_catalogue(config).await?;
    let query = query.unwrap_or_default();

    let (movies, recording) = match catalogue.search_tracked(query).await {
        Ok(found) => found,
        Err(failure) => anyhow::bail!("{}", failure.user_message()),
    };

    print!("{}", render_movies(&movies));

    if let Some(recording) = recording {
        if let Err(e) = recording.await {
            tracing::warn!(error = %e, "search recording task failed");
        }
    }
    Ok(())
}

/// Print the top searched terms.
///
/// Only the popularity store is needed, so no TMDB key is required.
///
/// # Errors
///
/// Returns an error if the store cannot be reached.
pub(crate) async fn run_trending(config: &AppConfig, limit: Option<usize>) -> anyhow::Result<()> {
    let store = marquee_catalogue::build_popularity_store(config).await?;
    let limit = limit.unwrap_or(config.trending_limit);

    let entries = store.list_trending(limit).await?;
    print!("{}", render_trending(&entries));
    Ok(())
}
