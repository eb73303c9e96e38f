// src/services/entity_guard.rs
//
// Existence checks run before any mutation. A miss becomes NotFound and
// nothing downstream is touched.

use std::sync::Arc;

use crate::domain::{DirectorId, FilmId, ReviewId, UserId};
use crate::error::{AppError, AppResult};
use crate::repositories::{DirectorRepository, FilmRepository, ReviewRepository, UserRepository};

pub struct EntityExistenceGuard {
    films: Arc<dyn FilmRepository>,
    users: Arc<dyn UserRepository>,
    directors: Arc<dyn DirectorRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl EntityExistenceGuard {
    pub fn new(
        films: Arc<dyn FilmRepository>,
        users: Arc<dyn UserRepository>,
        directors: Arc<dyn DirectorRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            films,
            users,
            directors,
            reviews,
        }
    }

    pub fn require_film(&self, id: FilmId) -> AppResult<()> {
        if !self.films.exists(id)? {
            log::debug!("Film with id {} not found", id);
            return Err(AppError::not_found(format!("Film {} doesn't exist", id)));
        }
        Ok(())
    }

    pub fn require_user(&self, id: UserId) -> AppResult<()> {
        if !self.users.exists(id)? {
            log::debug!("User with id {} not found", id);
            return Err(AppError::not_found(format!("User with id {} doesn't exist", id)));
        }
        Ok(())
    }

    pub fn require_director(&self, id: DirectorId) -> AppResult<()> {
        if !self.directors.exists(id)? {
            log::debug!("Director with id {} not found", id);
            return Err(AppError::not_found(format!("Director with ID = {} not found", id)));
        }
        Ok(())
    }

    pub fn require_review(&self, id: ReviewId) -> AppResult<()> {
        if !self.reviews.exists(id)? {
            log::debug!("Review with id {} not found", id);
            return Err(AppError::not_found(format!("Review {} doesn't exist", id)));
        }
        Ok(())
    }
}
