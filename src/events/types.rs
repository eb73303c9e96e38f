// events/types.rs
//
// In-process domain events.
// Each event is an immutable fact that has already occurred.
//
// RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Event, FilmId};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a film is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub film_id: FilmId,
    pub name: String,
}

impl FilmCreated {
    pub fn new(film_id: FilmId, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            film_id,
            name,
        }
    }
}

domain_event!(FilmCreated);

/// Emitted when a film's fields or links are replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub film_id: FilmId,
}

impl FilmUpdated {
    pub fn new(film_id: FilmId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            film_id,
        }
    }
}

domain_event!(FilmUpdated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub film_id: FilmId,
}

impl FilmRemoved {
    pub fn new(film_id: FilmId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            film_id,
        }
    }
}

domain_event!(FilmRemoved);

// ============================================================================
// ACTIVITY FEED
// ============================================================================

/// Emitted after an activity record was appended to the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecorded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub activity: Event,
}

impl ActivityRecorded {
    pub fn new(activity: Event) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            activity,
        }
    }
}

domain_event!(ActivityRecorded);
