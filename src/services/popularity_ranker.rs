// src/services/popularity_ranker.rs
//
// Top-N films by like count.
//
// Every film is a candidate; a film without likes scores 0 and sorts after
// every liked film. Ties go to the lower film id so results are stable.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Film, FilmId, GenreId};
use crate::error::{AppError, AppResult};
use crate::repositories::FilmRepository;

/// Conjunctive popularity filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopularFilter {
    pub genre: Option<GenreId>,
    pub year: Option<i32>,
}

impl PopularFilter {
    fn accepts(&self, film: &Film) -> bool {
        self.genre.map_or(true, |genre| film.has_genre(genre))
            && self.year.map_or(true, |year| film.release_year() == year)
    }
}

pub struct PopularityRanker {
    film_repo: Arc<dyn FilmRepository>,
}

impl PopularityRanker {
    pub fn new(film_repo: Arc<dyn FilmRepository>) -> Self {
        Self { film_repo }
    }

    pub fn get_popular(&self, filter: PopularFilter, limit: usize) -> AppResult<Vec<Film>> {
        let films = self.film_repo.find_all()?;
        let counts = self.film_repo.like_counts()?;
        rank_films(films, &counts, filter, limit)
    }
}

/// Order films by descending like count, then ascending id, after filtering
pub fn rank_films(
    films: Vec<Film>,
    counts: &HashMap<FilmId, u64>,
    filter: PopularFilter,
    limit: usize,
) -> AppResult<Vec<Film>> {
    if limit == 0 {
        return Err(AppError::invalid_argument("count must be positive"));
    }

    let mut ranked: Vec<Film> = films.into_iter().filter(|f| filter.accepts(f)).collect();
    sort_by_likes(&mut ranked, counts);
    ranked.truncate(limit);

    log::debug!(
        "Ranked {} films (genre {:?}, year {:?}, limit {})",
        ranked.len(), filter.genre, filter.year, limit
    );
    Ok(ranked)
}

/// Descending like count, ties broken by ascending id
pub(crate) fn sort_by_likes(films: &mut [Film], counts: &HashMap<FilmId, u64>) {
    films.sort_by_key(|f| (Reverse(counts.get(&f.id).copied().unwrap_or(0)), f.id));
}
