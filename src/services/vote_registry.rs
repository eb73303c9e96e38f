// src/services/vote_registry.rs
//
// Add/remove/exists for one relation kind (film likes, review votes,
// friendships).
//
// State per (subject, target) pair: ABSENT or PRESENT.
//   add:    ABSENT  -> PRESENT, otherwise Conflict
//   remove: PRESENT -> ABSENT,  otherwise Conflict
// There is no toggle and no silent upsert.
//
// Callers must have confirmed that subject and target exist. A successful
// add or remove of a relation kind with a feed event type appends exactly
// one activity record, after the store accepted the change.

use std::sync::Arc;

use crate::domain::{Operation, RelationKind, UserId};
use crate::error::{AppError, AppResult};
use crate::repositories::RelationRepository;
use crate::services::ActivityFeed;

pub struct VoteRegistry<K: RelationKind<Subject = UserId>> {
    store: Arc<dyn RelationRepository<K>>,
    feed: Arc<ActivityFeed>,
}

impl<K: RelationKind<Subject = UserId>> VoteRegistry<K> {
    pub fn new(store: Arc<dyn RelationRepository<K>>, feed: Arc<ActivityFeed>) -> Self {
        Self { store, feed }
    }

    pub fn exists(&self, subject: K::Subject, target: K::Target) -> AppResult<bool> {
        Ok(self.store.find(subject, target)?.is_some())
    }

    /// Payload of the stored relation, if present
    pub fn get(&self, subject: K::Subject, target: K::Target) -> AppResult<Option<K::Payload>> {
        self.store.find(subject, target)
    }

    pub fn add(&self, subject: K::Subject, target: K::Target, payload: K::Payload) -> AppResult<()> {
        if self.exists(subject, target)? {
            let message = K::already_present(subject, target);
            log::debug!("{}", message);
            return Err(AppError::Conflict(message));
        }

        // The store's unique key decides a race with a concurrent add
        if !self.store.insert(subject, target, payload)? {
            let message = K::already_present(subject, target);
            log::debug!("{} (concurrent add)", message);
            return Err(AppError::Conflict(message));
        }

        log::debug!("Added relation {} -> {} ({:?})", subject, target, payload);
        self.record(subject, target, Operation::Add)
    }

    /// Remove the relation. The stored payload must equal `expected`.
    pub fn remove(&self, subject: K::Subject, target: K::Target, expected: K::Payload) -> AppResult<()> {
        if self.store.find(subject, target)? != Some(expected) {
            let message = K::not_present(subject, target);
            log::debug!("{}", message);
            return Err(AppError::Conflict(message));
        }

        if !self.store.delete(subject, target)? {
            let message = K::not_present(subject, target);
            log::debug!("{} (concurrent remove)", message);
            return Err(AppError::Conflict(message));
        }

        log::debug!("Removed relation {} -> {}", subject, target);
        self.record(subject, target, Operation::Remove)
    }

    /// Every target related to `subject`, ascending
    pub fn targets_of(&self, subject: K::Subject) -> AppResult<Vec<K::Target>> {
        self.store.targets_of(subject)
    }

    fn record(&self, subject: K::Subject, target: K::Target, operation: Operation) -> AppResult<()> {
        match K::FEED_EVENT {
            Some(event_type) => {
                self.feed
                    .record(subject, event_type, operation, K::feed_entity(target))
            }
            None => Ok(()),
        }
    }
}
