// src/services/test_support.rs
//
// In-memory stand-ins shared by the service tests

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use crate::application::AppState;
use crate::config::AppConfig;
use crate::db::connection::create_test_pool;
use crate::domain::{
    DirectorId, Event, EventId, Film, GenreId, MpaId, NewEvent, NewFilm, NewUser, RelationKind, User,
    UserId,
};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{EventRepository, RelationRepository};
use crate::services::ActivityFeed;

/// Relation store backed by a BTreeMap
pub struct InMemoryRelations<K: RelationKind> {
    rows: Mutex<BTreeMap<(K::Subject, K::Target), K::Payload>>,
    reject_next_insert: AtomicBool,
}

impl<K: RelationKind> Default for InMemoryRelations<K> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            reject_next_insert: AtomicBool::new(false),
        }
    }
}

impl<K: RelationKind> InMemoryRelations<K> {
    /// Make the next insert report a lost race
    pub fn reject_next_insert(&self) {
        self.reject_next_insert.store(true, Ordering::SeqCst);
    }
}

impl<K: RelationKind> RelationRepository<K> for InMemoryRelations<K> {
    fn insert(&self, subject: K::Subject, target: K::Target, payload: K::Payload) -> AppResult<bool> {
        if self.reject_next_insert.swap(false, Ordering::SeqCst) {
            return Ok(false);
        }
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&(subject, target)) {
            return Ok(false);
        }
        rows.insert((subject, target), payload);
        Ok(true)
    }

    fn delete(&self, subject: K::Subject, target: K::Target) -> AppResult<bool> {
        Ok(self.rows.lock().unwrap().remove(&(subject, target)).is_some())
    }

    fn find(&self, subject: K::Subject, target: K::Target) -> AppResult<Option<K::Payload>> {
        Ok(self.rows.lock().unwrap().get(&(subject, target)).copied())
    }

    fn targets_of(&self, subject: K::Subject) -> AppResult<Vec<K::Target>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .keys()
            .filter(|(s, _)| *s == subject)
            .map(|(_, t)| *t)
            .collect())
    }
}

/// Event store that keeps appended records in memory
#[derive(Default)]
pub struct InMemoryEvents {
    events: Mutex<Vec<Event>>,
    next_id: AtomicI64,
}

impl InMemoryEvents {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventRepository for InMemoryEvents {
    fn append(&self, event: &NewEvent) -> AppResult<Event> {
        let stored = Event {
            id: EventId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            user_id: event.user_id,
            event_type: event.event_type,
            operation: event.operation,
            entity_id: event.entity_id,
            timestamp: Utc::now(),
        };
        self.events.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    fn find_by_user(&self, user: UserId) -> AppResult<Vec<Event>> {
        Ok(self.events().into_iter().filter(|e| e.user_id == user).collect())
    }
}

pub type RecordedFeed = Arc<InMemoryEvents>;

/// A best-effort feed over an in-memory event store
pub fn recording_feed() -> (Arc<ActivityFeed>, RecordedFeed) {
    let events = Arc::new(InMemoryEvents::default());
    let feed = ActivityFeed::new(events.clone(), Arc::new(EventBus::new()), false);
    (Arc::new(feed), events)
}

// ============================================================================
// Full application over a temporary database
// ============================================================================

/// Wired application state. The directory guard must outlive the state.
pub fn test_state() -> (tempfile::TempDir, AppState) {
    let (dir, pool) = create_test_pool();
    let state = AppState::with_pool(Arc::new(pool), &AppConfig::default()).unwrap();
    (dir, state)
}

pub fn new_user(login: &str) -> NewUser {
    NewUser {
        email: format!("{}@example.com", login),
        login: login.to_string(),
        name: String::new(),
        birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
    }
}

pub fn new_film(name: &str, year: i32, genres: &[i64], directors: &[DirectorId]) -> NewFilm {
    NewFilm {
        name: name.to_string(),
        description: format!("{} ({})", name, year),
        release_date: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
        duration: 110,
        mpa: MpaId(2),
        genres: genres.iter().map(|g| GenreId(*g)).collect::<BTreeSet<_>>(),
        directors: directors.iter().copied().collect(),
    }
}

pub fn add_user(state: &AppState, login: &str) -> User {
    state.user_service.create(new_user(login)).unwrap()
}

pub fn add_film(state: &AppState, name: &str, year: i32, genres: &[i64]) -> Film {
    state.film_service.create(new_film(name, year, genres, &[])).unwrap()
}

pub fn film_ids(films: &[Film]) -> Vec<i64> {
    films.iter().map(|f| f.id.get()).collect()
}
