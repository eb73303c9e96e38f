// src/repositories/reference_repository.rs
//
// Read-only access to the seeded genre and MPA rating tables

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};

use crate::db::ConnectionPool;
use crate::domain::{Genre, GenreId, Mpa, MpaId};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait ReferenceRepository: Send + Sync {
    fn genres(&self) -> AppResult<Vec<Genre>>;
    fn genre(&self, id: GenreId) -> AppResult<Option<Genre>>;
    fn ratings(&self) -> AppResult<Vec<Mpa>>;
    fn rating(&self, id: MpaId) -> AppResult<Option<Mpa>>;
}

pub struct SqliteReferenceRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteReferenceRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl ReferenceRepository for SqliteReferenceRepository {
    fn genres(&self) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, name FROM genre ORDER BY id")?;
        let genres = stmt
            .query_map([], |row| Ok(Genre { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    fn genre(&self, id: GenreId) -> AppResult<Option<Genre>> {
        let conn = self.pool.get()?;
        let genre = conn
            .query_row("SELECT id, name FROM genre WHERE id = ?1", params![id], |row| {
                Ok(Genre { id: row.get(0)?, name: row.get(1)? })
            })
            .optional()?;
        Ok(genre)
    }

    fn ratings(&self) -> AppResult<Vec<Mpa>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, name FROM mpa ORDER BY id")?;
        let ratings = stmt
            .query_map([], |row| Ok(Mpa { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ratings)
    }

    fn rating(&self, id: MpaId) -> AppResult<Option<Mpa>> {
        let conn = self.pool.get()?;
        let rating = conn
            .query_row("SELECT id, name FROM mpa WHERE id = ?1", params![id], |row| {
                Ok(Mpa { id: row.get(0)?, name: row.get(1)? })
            })
            .optional()?;
        Ok(rating)
    }
}
