// src/repositories/event_repository.rs
//
// Append-only activity feed storage. There is no update or delete.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{Event, EventId, NewEvent, UserId};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait EventRepository: Send + Sync {
    fn append(&self, event: &NewEvent) -> AppResult<Event>;
    /// Events whose actor is `user`, in append order
    fn find_by_user(&self, user: UserId) -> AppResult<Vec<Event>>;
}

pub struct SqliteEventRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteEventRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn conversion_error(column: usize, message: String) -> rusqlite::Error {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
        )
    }

    fn row_to_event(row: &Row) -> Result<Event, rusqlite::Error> {
        let event_type: String = row.get("event_type")?;
        let event_type = event_type.parse().map_err(|e| Self::conversion_error(2, e))?;

        let operation: String = row.get("operation")?;
        let operation = operation.parse().map_err(|e| Self::conversion_error(3, e))?;

        let timestamp_str: String = row.get("timestamp")?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e)))?;

        Ok(Event {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            event_type,
            operation,
            entity_id: row.get("entity_id")?,
            timestamp,
        })
    }
}

impl EventRepository for SqliteEventRepository {
    fn append(&self, event: &NewEvent) -> AppResult<Event> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO events (user_id, event_type, operation, entity_id, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.user_id,
                event.event_type.to_string(),
                event.operation.to_string(),
                event.entity_id,
                event.timestamp.to_rfc3339(),
            ],
        )?;

        Ok(Event {
            id: EventId(conn.last_insert_rowid()),
            user_id: event.user_id,
            event_type: event.event_type,
            operation: event.operation,
            entity_id: event.entity_id,
            timestamp: event.timestamp,
        })
    }

    fn find_by_user(&self, user: UserId) -> AppResult<Vec<Event>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, event_type, operation, entity_id, timestamp
             FROM events WHERE user_id = ?1 ORDER BY id",
        )?;
        let events = stmt
            .query_map(params![user], Self::row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }
}
