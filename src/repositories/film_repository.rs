// src/repositories/film_repository.rs
//
// Film persistence: films, their genre set and director set, plus the
// like-count and director join queries the ranking components read.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::db::ConnectionPool;
use crate::domain::{Director, DirectorId, Film, FilmId, Genre, Mpa, NewFilm};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait FilmRepository: Send + Sync {
    /// Insert a film with its genre and director links. Returns the assigned id.
    fn create(&self, film: &NewFilm) -> AppResult<FilmId>;
    /// Overwrite scalar fields and replace genre and director links
    fn update(&self, id: FilmId, film: &NewFilm) -> AppResult<()>;
    fn find_by_id(&self, id: FilmId) -> AppResult<Option<Film>>;
    /// All films in ascending id order
    fn find_all(&self) -> AppResult<Vec<Film>>;
    /// Films for the given ids in ascending id order; unknown ids are skipped
    fn find_by_ids(&self, ids: &[FilmId]) -> AppResult<Vec<Film>>;
    fn delete(&self, id: FilmId) -> AppResult<()>;
    fn exists(&self, id: FilmId) -> AppResult<bool>;
    /// Like count for every film with at least one like
    fn like_counts(&self) -> AppResult<HashMap<FilmId, u64>>;
    /// Ids of the films linked to a director
    fn film_ids_by_director(&self, director: DirectorId) -> AppResult<Vec<FilmId>>;
}

pub struct SqliteFilmRepository {
    pool: Arc<ConnectionPool>,
}

const SELECT_FILM: &str = "SELECT f.id, f.name, f.description, f.release_date, f.duration,
                                  f.mpa_id, m.name AS mpa_name
                           FROM film f JOIN mpa m ON m.id = f.mpa_id";

impl SqliteFilmRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a film row; genre and director sets are attached separately
    fn row_to_film(row: &Row) -> Result<Film, rusqlite::Error> {
        let release_str: String = row.get("release_date")?;
        let release_date = NaiveDate::parse_from_str(&release_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e)))?;

        let duration: i64 = row.get("duration")?;
        let duration = u32::try_from(duration)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Integer, Box::new(e)))?;

        Ok(Film {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            release_date,
            duration,
            mpa: Mpa {
                id: row.get("mpa_id")?,
                name: row.get("mpa_name")?,
            },
            genres: BTreeSet::new(),
            directors: BTreeSet::new(),
        })
    }

    fn attach_links(conn: &Connection, films: &mut [Film]) -> AppResult<()> {
        if films.is_empty() {
            return Ok(());
        }

        // Only links of the films being loaded
        let ids: Vec<FilmId> = films.iter().map(|f| f.id).collect();
        let placeholders = vec!["?"; ids.len()].join(", ");

        let mut genres: HashMap<FilmId, BTreeSet<Genre>> = HashMap::new();
        let mut stmt = conn.prepare(&format!(
            "SELECT fg.film_id, g.id, g.name
             FROM film_genre fg JOIN genre g ON g.id = fg.genre_id
             WHERE fg.film_id IN ({})",
            placeholders
        ))?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((
                row.get::<_, FilmId>(0)?,
                Genre { id: row.get(1)?, name: row.get(2)? },
            ))
        })?;
        for row in rows {
            let (film_id, genre) = row?;
            genres.entry(film_id).or_default().insert(genre);
        }

        let mut directors: HashMap<FilmId, BTreeSet<Director>> = HashMap::new();
        let mut stmt = conn.prepare(&format!(
            "SELECT fd.film_id, d.id, d.name
             FROM film_director fd JOIN director d ON d.id = fd.director_id
             WHERE fd.film_id IN ({})",
            placeholders
        ))?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((
                row.get::<_, FilmId>(0)?,
                Director { id: row.get(1)?, name: row.get(2)? },
            ))
        })?;
        for row in rows {
            let (film_id, director) = row?;
            directors.entry(film_id).or_default().insert(director);
        }

        for film in films.iter_mut() {
            film.genres = genres.remove(&film.id).unwrap_or_default();
            film.directors = directors.remove(&film.id).unwrap_or_default();
        }
        Ok(())
    }

    fn write_links(conn: &Connection, id: FilmId, film: &NewFilm) -> AppResult<()> {
        conn.execute("DELETE FROM film_genre WHERE film_id = ?1", params![id])?;
        for genre in &film.genres {
            conn.execute(
                "INSERT INTO film_genre (film_id, genre_id) VALUES (?1, ?2)",
                params![id, genre],
            )?;
        }

        conn.execute("DELETE FROM film_director WHERE film_id = ?1", params![id])?;
        for director in &film.directors {
            conn.execute(
                "INSERT INTO film_director (film_id, director_id) VALUES (?1, ?2)",
                params![id, director],
            )?;
        }
        Ok(())
    }
}

impl FilmRepository for SqliteFilmRepository {
    fn create(&self, film: &NewFilm) -> AppResult<FilmId> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO film (name, description, release_date, duration, mpa_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                film.name,
                film.description,
                film.release_date.to_string(),
                i64::from(film.duration),
                film.mpa,
            ],
        )?;
        let id = FilmId(tx.last_insert_rowid());
        Self::write_links(&tx, id, film)?;

        tx.commit()?;
        Ok(id)
    }

    fn update(&self, id: FilmId, film: &NewFilm) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "UPDATE film SET name = ?1, description = ?2, release_date = ?3,
                             duration = ?4, mpa_id = ?5
             WHERE id = ?6",
            params![
                film.name,
                film.description,
                film.release_date.to_string(),
                i64::from(film.duration),
                film.mpa,
                id,
            ],
        )?;
        Self::write_links(&tx, id, film)?;

        tx.commit()?;
        Ok(())
    }

    fn find_by_id(&self, id: FilmId) -> AppResult<Option<Film>> {
        Ok(self.find_by_ids(&[id])?.into_iter().next())
    }

    fn find_all(&self) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY f.id", SELECT_FILM))?;
        let mut films: Vec<Film> = stmt
            .query_map([], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        Self::attach_links(&conn, &mut films)?;
        Ok(films)
    }

    fn find_by_ids(&self, ids: &[FilmId]) -> AppResult<Vec<Film>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.pool.get()?;

        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
            "{} WHERE f.id IN ({}) ORDER BY f.id",
            SELECT_FILM, placeholders
        ))?;
        let mut films: Vec<Film> = stmt
            .query_map(params_from_iter(ids.iter()), Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        Self::attach_links(&conn, &mut films)?;
        Ok(films)
    }

    fn delete(&self, id: FilmId) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM film WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn exists(&self, id: FilmId) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM film WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn like_counts(&self) -> AppResult<HashMap<FilmId, u64>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT film_id, COUNT(*) FROM film_likes GROUP BY film_id")?;
        let counts = stmt
            .query_map([], |row| {
                let count: i64 = row.get(1)?;
                Ok((row.get::<_, FilmId>(0)?, count.unsigned_abs()))
            })?
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(counts)
    }

    fn film_ids_by_director(&self, director: DirectorId) -> AppResult<Vec<FilmId>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT film_id FROM film_director WHERE director_id = ?1 ORDER BY film_id",
        )?;
        let ids = stmt
            .query_map(params![director], |row| row.get(0))?
            .collect::<Result<Vec<FilmId>, _>>()?;

        Ok(ids)
    }
}
