// src/services/film_service.rs
//
// Film catalog orchestration.
//
// Mutations check every referenced entity first and only then touch the
// store. Reads delegate to the ranking, search, sorting and intersection
// components and pass their results through unchanged.

use std::sync::Arc;

use crate::domain::{validate_film, DirectorId, Film, FilmId, FilmLike, GenreId, NewFilm, UserId};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FilmCreated, FilmRemoved, FilmUpdated};
use crate::repositories::{DirectorRepository, FilmRepository, ReferenceRepository};
use crate::services::common_films::CommonFilmsIntersector;
use crate::services::director_film_sorter::{DirectorFilmSorter, DirectorSort};
use crate::services::limit::resolve_limit;
use crate::services::popularity_ranker::{PopularFilter, PopularityRanker};
use crate::services::search_index::{parse_fields, SearchIndex};
use crate::services::{EntityExistenceGuard, VoteRegistry};

pub struct FilmService {
    film_repo: Arc<dyn FilmRepository>,
    director_repo: Arc<dyn DirectorRepository>,
    reference_repo: Arc<dyn ReferenceRepository>,
    guard: Arc<EntityExistenceGuard>,
    likes: Arc<VoteRegistry<FilmLike>>,
    ranker: PopularityRanker,
    search_index: SearchIndex,
    director_sorter: DirectorFilmSorter,
    common: CommonFilmsIntersector,
    event_bus: Arc<EventBus>,
    default_popular_limit: usize,
}

impl FilmService {
    pub fn new(
        film_repo: Arc<dyn FilmRepository>,
        director_repo: Arc<dyn DirectorRepository>,
        reference_repo: Arc<dyn ReferenceRepository>,
        guard: Arc<EntityExistenceGuard>,
        likes: Arc<VoteRegistry<FilmLike>>,
        event_bus: Arc<EventBus>,
        default_popular_limit: usize,
    ) -> Self {
        Self {
            ranker: PopularityRanker::new(Arc::clone(&film_repo)),
            search_index: SearchIndex::new(Arc::clone(&film_repo)),
            director_sorter: DirectorFilmSorter::new(Arc::clone(&film_repo), Arc::clone(&guard)),
            common: CommonFilmsIntersector::new(
                Arc::clone(&film_repo),
                Arc::clone(&likes),
                Arc::clone(&guard),
            ),
            film_repo,
            director_repo,
            reference_repo,
            guard,
            likes,
            event_bus,
            default_popular_limit,
        }
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    pub fn find_all(&self) -> AppResult<Vec<Film>> {
        self.film_repo.find_all()
    }

    pub fn find_by_id(&self, id: FilmId) -> AppResult<Film> {
        self.film_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("Film {} doesn't exist", id)))
    }

    pub fn exists(&self, id: FilmId) -> AppResult<bool> {
        self.film_repo.exists(id)
    }

    pub fn create(&self, film: NewFilm) -> AppResult<Film> {
        validate_film(&film)?;
        self.check_references(&film)?;

        let id = self.film_repo.create(&film)?;
        let created = self.find_by_id(id)?;
        log::info!("Created film {} '{}'", created.id, created.name);

        self.event_bus.emit(FilmCreated::new(created.id, created.name.clone()));
        Ok(created)
    }

    pub fn update(&self, id: FilmId, film: NewFilm) -> AppResult<Film> {
        self.guard.require_film(id)?;
        validate_film(&film)?;
        self.check_references(&film)?;

        self.film_repo.update(id, &film)?;

        let mut updated = self.find_by_id(id)?;
        updated.directors = self.director_repo.find_by_film(id)?.into_iter().collect();
        log::info!("Updated film {}", id);

        self.event_bus.emit(FilmUpdated::new(id));
        Ok(updated)
    }

    pub fn remove(&self, id: FilmId) -> AppResult<()> {
        self.guard.require_film(id)?;

        self.film_repo.delete(id)?;
        log::info!("Removed film {}", id);

        self.event_bus.emit(FilmRemoved::new(id));
        Ok(())
    }

    fn check_references(&self, film: &NewFilm) -> AppResult<()> {
        if self.reference_repo.rating(film.mpa)?.is_none() {
            return Err(AppError::not_found(format!("Rating {} doesn't exist", film.mpa)));
        }
        for genre in &film.genres {
            if self.reference_repo.genre(*genre)?.is_none() {
                return Err(AppError::not_found(format!("Genre {} doesn't exist", genre)));
            }
        }
        for director in &film.directors {
            self.guard.require_director(*director)?;
        }
        Ok(())
    }

    // ========================================================================
    // Likes
    // ========================================================================

    pub fn add_like(&self, film: FilmId, user: UserId) -> AppResult<()> {
        self.guard.require_film(film)?;
        self.guard.require_user(user)?;
        self.likes.add(user, film, ())
    }

    pub fn remove_like(&self, film: FilmId, user: UserId) -> AppResult<()> {
        self.guard.require_film(film)?;
        self.guard.require_user(user)?;
        self.likes.remove(user, film, ())
    }

    pub fn is_liked(&self, film: FilmId, user: UserId) -> AppResult<bool> {
        self.likes.exists(user, film)
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// Most liked films. `count` defaults to the configured limit.
    pub fn get_popular(
        &self,
        genre: Option<GenreId>,
        year: Option<i32>,
        count: Option<i64>,
    ) -> AppResult<Vec<Film>> {
        let limit = resolve_limit(count, self.default_popular_limit)?;
        self.ranker.get_popular(PopularFilter { genre, year }, limit)
    }

    /// Substring search; `by` names the fields, "title" and/or "director"
    pub fn search<S: AsRef<str>>(&self, query: &str, by: &[S]) -> AppResult<Vec<Film>> {
        let fields = parse_fields(by)?;
        self.search_index.search(query, &fields)
    }

    /// A director's films sorted by "year" or "likes"
    pub fn find_by_director(&self, director: DirectorId, sort_by: &str) -> AppResult<Vec<Film>> {
        let sort: DirectorSort = sort_by.parse()?;
        self.director_sorter.find_by_director(director, sort)
    }

    pub fn common_films(&self, user: UserId, friend: UserId) -> AppResult<Vec<Film>> {
        self.common.common_films(user, friend)
    }
}
