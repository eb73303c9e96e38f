// src/application/mod.rs
//
// Application Layer
//
// - Wires repositories, core components and services into AppState
// - Translates AppError into caller-facing responses

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
