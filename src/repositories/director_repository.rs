// src/repositories/director_repository.rs

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::{Director, DirectorId, FilmId};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait DirectorRepository: Send + Sync {
    fn create(&self, name: &str) -> AppResult<Director>;
    /// Returns false when no director has this id
    fn update(&self, director: &Director) -> AppResult<bool>;
    fn find_by_id(&self, id: DirectorId) -> AppResult<Option<Director>>;
    fn find_all(&self) -> AppResult<Vec<Director>>;
    fn find_by_film(&self, film: FilmId) -> AppResult<Vec<Director>>;
    /// Returns false when no director has this id
    fn delete(&self, id: DirectorId) -> AppResult<bool>;
    fn exists(&self, id: DirectorId) -> AppResult<bool>;
}

pub struct SqliteDirectorRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteDirectorRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_director(row: &Row) -> Result<Director, rusqlite::Error> {
        Ok(Director {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl DirectorRepository for SqliteDirectorRepository {
    fn create(&self, name: &str) -> AppResult<Director> {
        let conn = self.pool.get()?;
        conn.execute("INSERT INTO director (name) VALUES (?1)", params![name])?;

        Ok(Director {
            id: DirectorId(conn.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    fn update(&self, director: &Director) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE director SET name = ?1 WHERE id = ?2",
            params![director.name, director.id],
        )?;
        Ok(rows > 0)
    }

    fn find_by_id(&self, id: DirectorId) -> AppResult<Option<Director>> {
        let conn = self.pool.get()?;
        let director = conn
            .query_row(
                "SELECT id, name FROM director WHERE id = ?1",
                params![id],
                Self::row_to_director,
            )
            .optional()?;
        Ok(director)
    }

    fn find_all(&self) -> AppResult<Vec<Director>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, name FROM director ORDER BY id")?;
        let directors = stmt
            .query_map([], Self::row_to_director)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(directors)
    }

    fn find_by_film(&self, film: FilmId) -> AppResult<Vec<Director>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT d.id, d.name
             FROM film_director fd JOIN director d ON d.id = fd.director_id
             WHERE fd.film_id = ?1
             ORDER BY d.id",
        )?;
        let directors = stmt
            .query_map(params![film], Self::row_to_director)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(directors)
    }

    fn delete(&self, id: DirectorId) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM director WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn exists(&self, id: DirectorId) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM director WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_pool;

    #[test]
    fn test_director_lifecycle() {
        let (_dir, pool) = create_test_pool();
        let repo = SqliteDirectorRepository::new(Arc::new(pool));

        let director = repo.create("Agnès Varda").unwrap();
        assert!(repo.exists(director.id).unwrap());

        let renamed = Director { id: director.id, name: "Agnes Varda".to_string() };
        assert!(repo.update(&renamed).unwrap());
        assert_eq!(repo.find_by_id(director.id).unwrap(), Some(renamed));

        assert!(repo.delete(director.id).unwrap());
        assert!(!repo.delete(director.id).unwrap());
        assert!(repo.find_by_id(director.id).unwrap().is_none());
    }

    #[test]
    fn test_update_unknown_director() {
        let (_dir, pool) = create_test_pool();
        let repo = SqliteDirectorRepository::new(Arc::new(pool));

        let ghost = Director { id: DirectorId(77), name: "Nobody".to_string() };
        assert!(!repo.update(&ghost).unwrap());
    }
}
