// src/services/reference_service.rs
//
// Read-only access to the seeded genres and MPA ratings

use std::sync::Arc;

use crate::domain::{Genre, GenreId, Mpa, MpaId};
use crate::error::{AppError, AppResult};
use crate::repositories::ReferenceRepository;

pub struct CatalogReferenceService {
    reference_repo: Arc<dyn ReferenceRepository>,
}

impl CatalogReferenceService {
    pub fn new(reference_repo: Arc<dyn ReferenceRepository>) -> Self {
        Self { reference_repo }
    }

    pub fn genres(&self) -> AppResult<Vec<Genre>> {
        self.reference_repo.genres()
    }

    pub fn genre(&self, id: GenreId) -> AppResult<Genre> {
        self.reference_repo
            .genre(id)?
            .ok_or_else(|| AppError::not_found(format!("Genre {} doesn't exist", id)))
    }

    pub fn ratings(&self) -> AppResult<Vec<Mpa>> {
        self.reference_repo.ratings()
    }

    pub fn rating(&self, id: MpaId) -> AppResult<Mpa> {
        self.reference_repo
            .rating(id)?
            .ok_or_else(|| AppError::not_found(format!("Rating {} doesn't exist", id)))
    }
}
