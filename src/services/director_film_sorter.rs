// src/services/director_film_sorter.rs

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{DirectorId, Film};
use crate::error::{AppError, AppResult};
use crate::repositories::FilmRepository;
use crate::services::popularity_ranker::sort_by_likes;
use crate::services::EntityExistenceGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorSort {
    /// Ascending release date
    Year,
    /// Descending like count
    Likes,
}

impl FromStr for DirectorSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" => Ok(DirectorSort::Year),
            "likes" => Ok(DirectorSort::Likes),
            other => Err(AppError::invalid_argument(format!(
                "Unknown sort '{}', expected year or likes",
                other
            ))),
        }
    }
}

pub struct DirectorFilmSorter {
    film_repo: Arc<dyn FilmRepository>,
    guard: Arc<EntityExistenceGuard>,
}

impl DirectorFilmSorter {
    pub fn new(film_repo: Arc<dyn FilmRepository>, guard: Arc<EntityExistenceGuard>) -> Self {
        Self { film_repo, guard }
    }

    /// A director's films. Equal keys fall back to ascending film id.
    pub fn find_by_director(&self, director: DirectorId, sort: DirectorSort) -> AppResult<Vec<Film>> {
        self.guard.require_director(director)?;

        let ids = self.film_repo.film_ids_by_director(director)?;
        let mut films = self.film_repo.find_by_ids(&ids)?;

        match sort {
            DirectorSort::Year => films.sort_by_key(|f| (f.release_date, f.id)),
            DirectorSort::Likes => {
                let counts = self.film_repo.like_counts()?;
                sort_by_likes(&mut films, &counts);
            }
        }

        Ok(films)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilmId, Mpa, MpaId};
    use crate::repositories::{
        MockDirectorRepository, MockFilmRepository, MockReviewRepository, MockUserRepository,
    };
    use chrono::NaiveDate;
    use std::collections::{BTreeSet, HashMap};

    fn film(id: i64, year: i32) -> Film {
        Film {
            id: FilmId(id),
            name: format!("Film {}", id),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            duration: 90,
            mpa: Mpa { id: MpaId(1), name: "G".to_string() },
            genres: BTreeSet::new(),
            directors: BTreeSet::new(),
        }
    }

    fn guard(director_exists: bool) -> Arc<EntityExistenceGuard> {
        let mut directors = MockDirectorRepository::new();
        directors.expect_exists().returning(move |_| Ok(director_exists));
        Arc::new(EntityExistenceGuard::new(
            Arc::new(MockFilmRepository::new()),
            Arc::new(MockUserRepository::new()),
            Arc::new(directors),
            Arc::new(MockReviewRepository::new()),
        ))
    }

    fn sorter() -> DirectorFilmSorter {
        let mut films = MockFilmRepository::new();
        films
            .expect_film_ids_by_director()
            .returning(|_| Ok(vec![FilmId(1), FilmId(2), FilmId(3)]));
        films
            .expect_find_by_ids()
            .returning(|_| Ok(vec![film(1, 2010), film(2, 1995), film(3, 2010)]));
        films
            .expect_like_counts()
            .returning(|| Ok(HashMap::from([(FilmId(1), 1), (FilmId(3), 4)])));
        DirectorFilmSorter::new(Arc::new(films), guard(true))
    }

    fn ids(films: &[Film]) -> Vec<i64> {
        films.iter().map(|f| f.id.get()).collect()
    }

    #[test]
    fn test_sort_by_year() {
        let films = sorter().find_by_director(DirectorId(1), DirectorSort::Year).unwrap();
        assert_eq!(ids(&films), vec![2, 1, 3]);
        assert!(films.windows(2).all(|w| w[0].release_date <= w[1].release_date));
    }

    #[test]
    fn test_sort_by_likes() {
        let films = sorter().find_by_director(DirectorId(1), DirectorSort::Likes).unwrap();
        assert_eq!(ids(&films), vec![3, 1, 2]);
    }

    #[test]
    fn test_unknown_director() {
        let sorter = DirectorFilmSorter::new(Arc::new(MockFilmRepository::new()), guard(false));
        let result = sorter.find_by_director(DirectorId(9), DirectorSort::Year);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("year".parse::<DirectorSort>().unwrap(), DirectorSort::Year);
        assert_eq!("Likes".parse::<DirectorSort>().unwrap(), DirectorSort::Likes);
        assert!(matches!("title".parse::<DirectorSort>(), Err(AppError::InvalidArgument(_))));
    }
}
