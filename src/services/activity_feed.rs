// src/services/activity_feed.rs
//
// Append-only log of user actions.
//
// Appends are best-effort by default: a failed append is logged and the
// mutation that caused it still succeeds. With `strict` set, the failure
// is returned to the caller instead (the mutation itself is not undone).

use std::sync::Arc;

use crate::domain::{Event, EventType, NewEvent, Operation, UserId};
use crate::error::AppResult;
use crate::events::{ActivityRecorded, EventBus};
use crate::repositories::EventRepository;

pub struct ActivityFeed {
    events: Arc<dyn EventRepository>,
    event_bus: Arc<EventBus>,
    strict: bool,
}

impl ActivityFeed {
    pub fn new(events: Arc<dyn EventRepository>, event_bus: Arc<EventBus>, strict: bool) -> Self {
        Self {
            events,
            event_bus,
            strict,
        }
    }

    /// Append one record describing `actor`'s action on `entity_id`
    pub fn record(
        &self,
        actor: UserId,
        event_type: EventType,
        operation: Operation,
        entity_id: i64,
    ) -> AppResult<()> {
        match self.events.append(&NewEvent::new(actor, event_type, operation, entity_id)) {
            Ok(event) => {
                log::debug!(
                    "Feed: user {} {} {} {}",
                    event.user_id, event.event_type, event.operation, event.entity_id
                );
                self.event_bus.emit(ActivityRecorded::new(event));
                Ok(())
            }
            Err(e) if self.strict => Err(e),
            Err(e) => {
                log::warn!(
                    "Dropped feed record (user {}, {} {} {}): {}",
                    actor, event_type, operation, entity_id, e
                );
                Ok(())
            }
        }
    }

    /// Every record whose actor is `user`, in append order
    pub fn feed(&self, user: UserId) -> AppResult<Vec<Event>> {
        self.events.find_by_user(user)
    }
}
