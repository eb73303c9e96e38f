// src/repositories/mod.rs
//
// Repository layer - the persistence collaborator
//
// RULES:
// - Repositories are data mappers over SQLite
// - NO business logic, NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod director_repository;
pub mod event_repository;
pub mod film_repository;
pub mod reference_repository;
pub mod relation_repository;
pub mod review_repository;
pub mod user_repository;

pub use director_repository::{DirectorRepository, SqliteDirectorRepository};
pub use event_repository::{EventRepository, SqliteEventRepository};
pub use film_repository::{FilmRepository, SqliteFilmRepository};
pub use reference_repository::{ReferenceRepository, SqliteReferenceRepository};
pub use relation_repository::{RelationRepository, RelationTable, SqliteRelationRepository};
pub use review_repository::{ReviewRepository, SqliteReviewRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[cfg(test)]
pub use director_repository::MockDirectorRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use film_repository::MockFilmRepository;
#[cfg(test)]
pub use reference_repository::MockReferenceRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
