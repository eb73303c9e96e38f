pub mod entity;
pub mod invariants;

pub use entity::{Film, NewFilm};
pub use invariants::{earliest_release_date, validate_film};
