// src/repositories/review_repository.rs
//
// Review persistence. Usefulness is never stored: every read sums the
// review's votes (+1 useful, -1 useless).

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::{FilmId, NewReview, Review, ReviewEdit, ReviewId};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait ReviewRepository: Send + Sync {
    fn create(&self, review: &NewReview) -> AppResult<ReviewId>;
    fn update(&self, id: ReviewId, edit: &ReviewEdit) -> AppResult<()>;
    fn find_by_id(&self, id: ReviewId) -> AppResult<Option<Review>>;
    /// Reviews of one film, or of all films when `film` is None.
    /// Most useful first, then ascending id.
    fn find_by_film(&self, film: Option<FilmId>, limit: usize) -> AppResult<Vec<Review>>;
    fn delete(&self, id: ReviewId) -> AppResult<()>;
    fn exists(&self, id: ReviewId) -> AppResult<bool>;
}

pub struct SqliteReviewRepository {
    pool: Arc<ConnectionPool>,
}

const SELECT_REVIEW: &str = "SELECT r.id, r.content, r.is_positive, r.user_id, r.film_id,
                                    COALESCE((SELECT SUM(CASE WHEN v.is_useful THEN 1 ELSE -1 END)
                                              FROM review_votes v WHERE v.review_id = r.id), 0) AS useful
                             FROM reviews r";

impl SqliteReviewRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &Row) -> Result<Review, rusqlite::Error> {
        Ok(Review {
            id: row.get("id")?,
            content: row.get("content")?,
            is_positive: row.get("is_positive")?,
            user_id: row.get("user_id")?,
            film_id: row.get("film_id")?,
            useful: row.get("useful")?,
        })
    }
}

impl ReviewRepository for SqliteReviewRepository {
    fn create(&self, review: &NewReview) -> AppResult<ReviewId> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO reviews (content, is_positive, user_id, film_id) VALUES (?1, ?2, ?3, ?4)",
            params![review.content, review.is_positive, review.user_id, review.film_id],
        )?;
        Ok(ReviewId(conn.last_insert_rowid()))
    }

    fn update(&self, id: ReviewId, edit: &ReviewEdit) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "UPDATE reviews SET content = ?1, is_positive = ?2 WHERE id = ?3",
            params![edit.content, edit.is_positive, id],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: ReviewId) -> AppResult<Option<Review>> {
        let conn = self.pool.get()?;
        let review = conn
            .query_row(
                &format!("{} WHERE r.id = ?1", SELECT_REVIEW),
                params![id],
                Self::row_to_review,
            )
            .optional()?;
        Ok(review)
    }

    fn find_by_film(&self, film: Option<FilmId>, limit: usize) -> AppResult<Vec<Review>> {
        let conn = self.pool.get()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(&format!(
            "{} WHERE (?1 IS NULL OR r.film_id = ?1) ORDER BY useful DESC, r.id LIMIT ?2",
            SELECT_REVIEW
        ))?;
        let reviews = stmt
            .query_map(params![film, limit], Self::row_to_review)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reviews)
    }

    fn delete(&self, id: ReviewId) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM reviews WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn exists(&self, id: ReviewId) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
