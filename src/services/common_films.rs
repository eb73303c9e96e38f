// src/services/common_films.rs
//
// Films liked by both of two users. The result is ordered by popularity,
// then ascending id, and does not depend on argument order.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{Film, FilmId, FilmLike, UserId};
use crate::error::AppResult;
use crate::repositories::FilmRepository;
use crate::services::popularity_ranker::sort_by_likes;
use crate::services::{EntityExistenceGuard, VoteRegistry};

pub struct CommonFilmsIntersector {
    film_repo: Arc<dyn FilmRepository>,
    likes: Arc<VoteRegistry<FilmLike>>,
    guard: Arc<EntityExistenceGuard>,
}

impl CommonFilmsIntersector {
    pub fn new(
        film_repo: Arc<dyn FilmRepository>,
        likes: Arc<VoteRegistry<FilmLike>>,
        guard: Arc<EntityExistenceGuard>,
    ) -> Self {
        Self {
            film_repo,
            likes,
            guard,
        }
    }

    pub fn common_films(&self, user: UserId, other: UserId) -> AppResult<Vec<Film>> {
        self.guard.require_user(user)?;
        self.guard.require_user(other)?;

        let liked: BTreeSet<FilmId> = self.likes.targets_of(user)?.into_iter().collect();
        let shared: Vec<FilmId> = self
            .likes
            .targets_of(other)?
            .into_iter()
            .filter(|film| liked.contains(film))
            .collect();

        if shared.is_empty() {
            return Ok(Vec::new());
        }

        let mut films = self.film_repo.find_by_ids(&shared)?;
        let counts = self.film_repo.like_counts()?;
        sort_by_likes(&mut films, &counts);
        Ok(films)
    }
}
