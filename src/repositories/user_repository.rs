// src/repositories/user_repository.rs

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::{NewUser, User, UserId};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn create(&self, user: &NewUser) -> AppResult<User>;
    /// Returns false when no user has this id
    fn update(&self, id: UserId, user: &NewUser) -> AppResult<bool>;
    fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;
    fn find_all(&self) -> AppResult<Vec<User>>;
    /// Users for the given ids in ascending id order; unknown ids are skipped
    fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>>;
    fn exists(&self, id: UserId) -> AppResult<bool>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let birthday_str: Option<String> = row.get("birthday")?;
        let birthday = birthday_str
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(User {
            id: row.get("id")?,
            email: row.get("email")?,
            login: row.get("login")?,
            name: row.get("name")?,
            birthday,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: &NewUser) -> AppResult<User> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO users (email, login, name, birthday) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.map(|d| d.to_string()),
            ],
        )?;

        Ok(User {
            id: UserId(conn.last_insert_rowid()),
            email: user.email.clone(),
            login: user.login.clone(),
            name: user.name.clone(),
            birthday: user.birthday,
        })
    }

    fn update(&self, id: UserId, user: &NewUser) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE users SET email = ?1, login = ?2, name = ?3, birthday = ?4 WHERE id = ?5",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.map(|d| d.to_string()),
                id,
            ],
        )?;
        Ok(rows > 0)
    }

    fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(
                "SELECT id, email, login, name, birthday FROM users WHERE id = ?1",
                params![id],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    fn find_all(&self) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, email, login, name, birthday FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.pool.get()?;

        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
            "SELECT id, email, login, name, birthday FROM users WHERE id IN ({}) ORDER BY id",
            placeholders
        ))?;
        let users = stmt
            .query_map(params_from_iter(ids.iter()), Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn exists(&self, id: UserId) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
