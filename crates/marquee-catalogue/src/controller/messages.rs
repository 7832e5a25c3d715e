use marquee_core::{Movie, SearchCount};

use crate::error::FetchFailure;
use crate::state::RequestToken;

/// Requests sent by [`CatalogueHandle`](super::CatalogueHandle).
#[derive(Debug)]
pub(crate) enum CatalogueCommand {
    /// Reload the trending list.
    RefreshTrending,
}

/// Results reported back by tasks the actor spawned.
#[derive(Debug)]
pub(crate) enum Completion {
    Fetched {
        token: RequestToken,
        result: Result<Vec<Movie>, FetchFailure>,
    },
    Trending(Vec<SearchCount>),
}
