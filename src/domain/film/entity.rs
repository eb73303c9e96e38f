use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::director::Director;
use crate::domain::ids::{DirectorId, FilmId, GenreId, MpaId};
use crate::domain::reference::{Genre, Mpa};

/// A persisted film
///
/// The identifier is assigned by the store on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,

    pub name: String,

    pub description: String,

    pub release_date: NaiveDate,

    /// Duration in minutes
    pub duration: u32,

    /// Rating classification
    pub mpa: Mpa,

    /// Unordered, unique
    pub genres: BTreeSet<Genre>,

    pub directors: BTreeSet<Director>,
}

/// Film fields as supplied by a caller, before the store assigns an id.
/// Genres, rating and directors are references only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFilm {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub mpa: MpaId,
    #[serde(default)]
    pub genres: BTreeSet<GenreId>,
    #[serde(default)]
    pub directors: BTreeSet<DirectorId>,
}

impl Film {
    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }

    pub fn has_genre(&self, genre: GenreId) -> bool {
        self.genres.iter().any(|g| g.id == genre)
    }
}

impl std::fmt::Display for Film {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Film #{} \"{}\" ({})", self.id, self.name, self.release_date)
    }
}
