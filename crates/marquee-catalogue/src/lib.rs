//! Catalogue orchestration: the movie source and popularity store seams,
//! the search debouncer, the view state machine and its runtime.

pub mod adapters;
pub mod builder;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod service;
pub mod state;
pub mod store;

pub use builder::{build_catalogue, build_movie_source, build_popularity_store};
pub use controller::{CatalogueController, CatalogueHandle, ControllerOptions};
pub use debounce::{spawn_debouncer, DebouncerHandle, DEFAULT_DEBOUNCE};
pub use error::{BuildError, FetchFailure, StoreError};
pub use service::Catalogue;
pub use state::{CatalogueEvent, CatalogueState, Effect, Phase, RequestToken, View};
pub use store::{spawn_record_search, MemoryPopularityStore, MovieSource, PopularityStore};
