pub mod entity;
pub mod invariants;

pub use entity::{NewUser, User};
pub use invariants::validate_user;
