//! Catalogue view state as an explicit state machine.
//!
//! [`CatalogueState::handle`] is the only way the state changes. It returns
//! the side effects the runtime must perform; it never performs I/O itself.

use marquee_core::{normalize_search_term, Movie, SearchCount};

/// Identifies one fetch. Only the latest token may update the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No query committed yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub enum CatalogueEvent {
    QueryCommitted {
        query: String,
    },
    FetchSucceeded {
        token: RequestToken,
        movies: Vec<Movie>,
    },
    FetchFailed {
        token: RequestToken,
        message: String,
    },
    TrendingLoaded {
        entries: Vec<SearchCount>,
    },
}

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch movies for `query` and report back with `token`.
    Fetch { token: RequestToken, query: String },
    /// Increment the popularity counter for `term`. Fire-and-forget.
    RecordSearch { term: String, movie: Movie },
}

/// What a renderer should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    Movies(&'a [Movie]),
}

#[derive(Debug, Clone, Default)]
pub struct CatalogueState {
    query: String,
    phase: Phase,
    error: Option<String>,
    movies: Vec<Movie>,
    trending: Vec<SearchCount>,
    issued: u64,
    in_flight: Option<RequestToken>,
}

impl CatalogueState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `event` and returns the effects to run.
    pub fn handle(&mut self, event: CatalogueEvent) -> Vec<Effect> {
        match event {
            CatalogueEvent::QueryCommitted { query } => {
                self.issued += 1;
                let token = RequestToken(self.issued);
                self.in_flight = Some(token);
                self.phase = Phase::Loading;
                self.error = None;
                self.query.clone_from(&query);
                vec![Effect::Fetch { token, query }]
            }
            CatalogueEvent::FetchSucceeded { token, movies } => {
                if !self.accept(token) {
                    return Vec::new();
                }
                self.phase = Phase::Loaded;
                self.movies = movies;

                recording_target(&self.query, &self.movies)
                    .map(|(term, movie)| {
                        vec![Effect::RecordSearch {
                            term,
                            movie: movie.clone(),
                        }]
                    })
                    .unwrap_or_default()
            }
            CatalogueEvent::FetchFailed { token, message } => {
                if !self.accept(token) {
                    return Vec::new();
                }
                self.phase = Phase::Failed;
                self.error = Some(message);
                self.movies.clear();
                Vec::new()
            }
            CatalogueEvent::TrendingLoaded { entries } => {
                self.trending = entries;
                Vec::new()
            }
        }
    }

    /// Consumes the in-flight token if `token` is it.
    fn accept(&mut self, token: RequestToken) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            tracing::debug!(
                token = token.get(),
                latest = self.issued,
                "discarding stale fetch result"
            );
            false
        }
    }

    #[must_use]
    pub fn view(&self) -> View<'_> {
        if self.phase == Phase::Loading {
            View::Loading
        } else if let Some(message) = self.error.as_deref() {
            View::Error(message)
        } else {
            View::Movies(&self.movies)
        }
    }

    /// The last committed query, as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    #[must_use]
    pub fn trending(&self) -> &[SearchCount] {
        &self.trending
    }

    /// Token of the fetch whose result is still awaited.
    #[must_use]
    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }
}

/// The counter to increment after a successful fetch, if any.
///
/// A search is recorded only when the query normalizes to a non-empty term
/// and at least one movie came back; the first result is the snapshot.
#[must_use]
pub fn recording_target<'a>(query: &str, movies: &'a [Movie]) -> Option<(String, &'a Movie)> {
    let term = normalize_search_term(query)?;
    let first = movies.first()?;
    Some((term, first))
}
