// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Leaf components first: existence guard, relation registry, activity
// feed, then the read components, then the per-aggregate services that
// compose them.

pub mod activity_feed;
pub mod common_films;
pub mod director_film_sorter;
pub mod director_service;
pub mod entity_guard;
pub mod film_service;
pub mod limit;
pub mod popularity_ranker;
pub mod reference_service;
pub mod review_service;
pub mod search_index;
pub mod user_service;
pub mod vote_registry;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod review_service_tests;

// Re-export all services and their types
pub use activity_feed::ActivityFeed;
pub use common_films::CommonFilmsIntersector;
pub use director_film_sorter::{DirectorFilmSorter, DirectorSort};
pub use director_service::DirectorService;
pub use entity_guard::EntityExistenceGuard;
pub use film_service::FilmService;
pub use limit::resolve_limit;
pub use popularity_ranker::{rank_films, PopularFilter, PopularityRanker};
pub use reference_service::CatalogReferenceService;
pub use review_service::ReviewService;
pub use search_index::{parse_fields, SearchField, SearchIndex};
pub use user_service::UserService;
pub use vote_registry::VoteRegistry;
