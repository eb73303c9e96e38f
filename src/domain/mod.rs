// src/domain/mod.rs
//
// Domain Root - entities, identifiers, relation kinds and invariants.
// All other modules import from `crate::domain::*`

pub mod activity;
pub mod director;
pub mod film;
pub mod ids;
pub mod reference;
pub mod relation;
pub mod review;
pub mod user;

pub use activity::{Event, EventType, NewEvent, Operation};
pub use director::{validate_director_name, Director};
pub use film::{earliest_release_date, validate_film, Film, NewFilm};
pub use ids::{DirectorId, EventId, FilmId, GenreId, MpaId, ReviewId, UserId};
pub use reference::{Genre, Mpa};
pub use relation::{FilmLike, Friendship, RelationKind, ReviewVote, VotePolarity};
pub use review::{validate_review_content, NewReview, Review, ReviewEdit};
pub use user::{validate_user, NewUser, User};

use thiserror::Error;

/// Domain-level errors
/// These represent violations of entity invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
