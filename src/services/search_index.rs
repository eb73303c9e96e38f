// src/services/search_index.rs
//
// Case-insensitive substring search over film titles and director names.
// A film matches when any selected field contains the query. The empty
// query is contained in every string, so it matches every film.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::Film;
use crate::error::{AppError, AppResult};
use crate::repositories::FilmRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchField {
    Title,
    Director,
}

impl FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "director" => Ok(SearchField::Director),
            other => Err(AppError::invalid_argument(format!(
                "Unknown search field '{}', expected title or director",
                other
            ))),
        }
    }
}

/// Parse a non-empty list of field names
pub fn parse_fields<S: AsRef<str>>(raw: &[S]) -> AppResult<BTreeSet<SearchField>> {
    let fields = raw
        .iter()
        .map(|s| s.as_ref().parse())
        .collect::<AppResult<BTreeSet<SearchField>>>()?;

    if fields.is_empty() {
        return Err(AppError::invalid_argument("At least one search field is required"));
    }
    Ok(fields)
}

pub struct SearchIndex {
    film_repo: Arc<dyn FilmRepository>,
}

impl SearchIndex {
    pub fn new(film_repo: Arc<dyn FilmRepository>) -> Self {
        Self { film_repo }
    }

    /// Films matching `query` on any of `fields`, ascending id
    pub fn search(&self, query: &str, fields: &BTreeSet<SearchField>) -> AppResult<Vec<Film>> {
        if fields.is_empty() {
            return Err(AppError::invalid_argument("At least one search field is required"));
        }

        let needle = query.to_lowercase();
        let found: Vec<Film> = self
            .film_repo
            .find_all()?
            .into_iter()
            .filter(|film| fields.iter().any(|field| matches_field(film, *field, &needle)))
            .collect();

        log::debug!("Search {:?} over {:?}: {} films", query, fields, found.len());
        Ok(found)
    }
}

fn matches_field(film: &Film, field: SearchField, needle: &str) -> bool {
    match field {
        SearchField::Title => film.name.to_lowercase().contains(needle),
        SearchField::Director => film
            .directors
            .iter()
            .any(|d| d.name.to_lowercase().contains(needle)),
    }
}
