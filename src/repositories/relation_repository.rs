// src/repositories/relation_repository.rs
//
// Storage for (subject, target) relations: film likes, review votes and
// friendships. One SQLite implementation serves every relation kind; the
// table layout comes from `RelationTable`.
//
// Each table's primary key is (subject, target). `insert` and `delete`
// report whether a row actually changed, so a caller that lost a race
// against a concurrent writer sees `false` instead of a silent success.

use std::marker::PhantomData;
use std::sync::Arc;

use rusqlite::types::FromSql;
use rusqlite::{params, OptionalExtension, ToSql};

use crate::db::ConnectionPool;
use crate::domain::{FilmLike, Friendship, RelationKind, ReviewVote, VotePolarity};
use crate::error::AppResult;

pub trait RelationRepository<K: RelationKind>: Send + Sync {
    /// Store the relation. Returns false if the pair was already present.
    fn insert(&self, subject: K::Subject, target: K::Target, payload: K::Payload) -> AppResult<bool>;
    /// Drop the relation. Returns false if the pair was absent.
    fn delete(&self, subject: K::Subject, target: K::Target) -> AppResult<bool>;
    /// Payload of the stored relation, if present
    fn find(&self, subject: K::Subject, target: K::Target) -> AppResult<Option<K::Payload>>;
    /// Every target related to `subject`, ascending
    fn targets_of(&self, subject: K::Subject) -> AppResult<Vec<K::Target>>;
}

/// Table layout of a relation kind
pub trait RelationTable: RelationKind {
    const TABLE: &'static str;
    const SUBJECT_COLUMN: &'static str;
    const TARGET_COLUMN: &'static str;
    /// Column holding the payload, if the relation carries one
    const PAYLOAD_COLUMN: Option<&'static str>;

    fn encode_payload(payload: Self::Payload) -> i64;

    fn decode_payload(raw: i64) -> Self::Payload;
}

impl RelationTable for FilmLike {
    const TABLE: &'static str = "film_likes";
    const SUBJECT_COLUMN: &'static str = "user_id";
    const TARGET_COLUMN: &'static str = "film_id";
    const PAYLOAD_COLUMN: Option<&'static str> = None;

    fn encode_payload(_: ()) -> i64 {
        0
    }

    fn decode_payload(_: i64) {}
}

impl RelationTable for Friendship {
    const TABLE: &'static str = "friendships";
    const SUBJECT_COLUMN: &'static str = "user_id";
    const TARGET_COLUMN: &'static str = "friend_id";
    const PAYLOAD_COLUMN: Option<&'static str> = None;

    fn encode_payload(_: ()) -> i64 {
        0
    }

    fn decode_payload(_: i64) {}
}

impl RelationTable for ReviewVote {
    const TABLE: &'static str = "review_votes";
    const SUBJECT_COLUMN: &'static str = "user_id";
    const TARGET_COLUMN: &'static str = "review_id";
    const PAYLOAD_COLUMN: Option<&'static str> = Some("is_useful");

    fn encode_payload(polarity: VotePolarity) -> i64 {
        i64::from(polarity.is_useful())
    }

    fn decode_payload(raw: i64) -> VotePolarity {
        VotePolarity::from_is_useful(raw != 0)
    }
}

pub struct SqliteRelationRepository<K> {
    pool: Arc<ConnectionPool>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> SqliteRelationRepository<K> {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }
}

impl<K> RelationRepository<K> for SqliteRelationRepository<K>
where
    K: RelationTable,
    K::Subject: ToSql + FromSql,
    K::Target: ToSql + FromSql,
{
    fn insert(&self, subject: K::Subject, target: K::Target, payload: K::Payload) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows = match K::PAYLOAD_COLUMN {
            Some(payload_column) => conn.execute(
                &format!(
                    "INSERT OR IGNORE INTO {} ({}, {}, {}) VALUES (?1, ?2, ?3)",
                    K::TABLE, K::SUBJECT_COLUMN, K::TARGET_COLUMN, payload_column
                ),
                params![subject, target, K::encode_payload(payload)],
            )?,
            None => conn.execute(
                &format!(
                    "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?1, ?2)",
                    K::TABLE, K::SUBJECT_COLUMN, K::TARGET_COLUMN
                ),
                params![subject, target],
            )?,
        };

        Ok(rows > 0)
    }

    fn delete(&self, subject: K::Subject, target: K::Target) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1 AND {} = ?2",
                K::TABLE, K::SUBJECT_COLUMN, K::TARGET_COLUMN
            ),
            params![subject, target],
        )?;
        Ok(rows > 0)
    }

    fn find(&self, subject: K::Subject, target: K::Target) -> AppResult<Option<K::Payload>> {
        let conn = self.pool.get()?;
        let payload_expr = K::PAYLOAD_COLUMN.unwrap_or("0");

        let raw: Option<i64> = conn
            .query_row(
                &format!(
                    "SELECT {} FROM {} WHERE {} = ?1 AND {} = ?2",
                    payload_expr, K::TABLE, K::SUBJECT_COLUMN, K::TARGET_COLUMN
                ),
                params![subject, target],
                |row| row.get(0),
            )
            .optional()?;

        Ok(raw.map(K::decode_payload))
    }

    fn targets_of(&self, subject: K::Subject) -> AppResult<Vec<K::Target>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {target} FROM {table} WHERE {subject} = ?1 ORDER BY {target}",
            target = K::TARGET_COLUMN,
            table = K::TABLE,
            subject = K::SUBJECT_COLUMN,
        ))?;

        let targets = stmt
            .query_map(params![subject], |row| row.get(0))?
            .collect::<Result<Vec<K::Target>, _>>()?;
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_pool;
    use crate::domain::{FilmId, ReviewId, UserId};

    fn seeded_pool() -> (tempfile::TempDir, Arc<ConnectionPool>) {
        let (dir, pool) = create_test_pool();
        pool.get()
            .unwrap()
            .execute_batch(
                "INSERT INTO users (email, login, name) VALUES ('a@x.io', 'a', 'a'), ('b@x.io', 'b', 'b');
                 INSERT INTO film (name, description, release_date, duration, mpa_id)
                     VALUES ('One', '', '2000-01-01', 90, 1), ('Two', '', '2001-01-01', 95, 2);
                 INSERT INTO reviews (content, is_positive, user_id, film_id) VALUES ('ok', 1, 1, 1);",
            )
            .unwrap();
        (dir, Arc::new(pool))
    }

    #[test]
    fn test_like_insert_is_unique_per_pair() {
        let (_dir, pool) = seeded_pool();
        let likes = SqliteRelationRepository::<FilmLike>::new(pool);

        assert!(likes.insert(UserId(1), FilmId(2), ()).unwrap());
        assert!(!likes.insert(UserId(1), FilmId(2), ()).unwrap());
        assert_eq!(likes.find(UserId(1), FilmId(2)).unwrap(), Some(()));
        assert_eq!(likes.find(UserId(2), FilmId(2)).unwrap(), None);
    }

    #[test]
    fn test_delete_reports_absence() {
        let (_dir, pool) = seeded_pool();
        let likes = SqliteRelationRepository::<FilmLike>::new(pool);

        assert!(!likes.delete(UserId(1), FilmId(1)).unwrap());
        likes.insert(UserId(1), FilmId(1), ()).unwrap();
        assert!(likes.delete(UserId(1), FilmId(1)).unwrap());
        assert_eq!(likes.find(UserId(1), FilmId(1)).unwrap(), None);
    }

    #[test]
    fn test_vote_payload_round_trips_polarity() {
        let (_dir, pool) = seeded_pool();
        let votes = SqliteRelationRepository::<ReviewVote>::new(pool);

        votes.insert(UserId(2), ReviewId(1), VotePolarity::Useless).unwrap();
        assert_eq!(votes.find(UserId(2), ReviewId(1)).unwrap(), Some(VotePolarity::Useless));
    }

    #[test]
    fn test_targets_of_sorted() {
        let (_dir, pool) = seeded_pool();
        let friends = SqliteRelationRepository::<Friendship>::new(Arc::clone(&pool));
        let likes = SqliteRelationRepository::<FilmLike>::new(pool);

        likes.insert(UserId(1), FilmId(2), ()).unwrap();
        likes.insert(UserId(1), FilmId(1), ()).unwrap();
        assert_eq!(likes.targets_of(UserId(1)).unwrap(), vec![FilmId(1), FilmId(2)]);

        friends.insert(UserId(1), UserId(2), ()).unwrap();
        assert_eq!(friends.targets_of(UserId(1)).unwrap(), vec![UserId(2)]);
        assert!(friends.targets_of(UserId(2)).unwrap().is_empty());
    }
}
