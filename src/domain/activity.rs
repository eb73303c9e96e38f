// src/domain/activity.rs
//
// Activity feed records.
//
// An Event is an immutable fact about a user's action. Events are appended
// and never edited or deleted by normal operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EventId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Like,
    Review,
    Friend,
    Vote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Add,
    Remove,
    Update,
}

/// An appended activity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub user_id: UserId,
    pub event_type: EventType,
    pub operation: Operation,
    /// Film, review or user id depending on `event_type`
    pub entity_id: i64,
    pub timestamp: DateTime<Utc>,
}

/// An activity record waiting to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub user_id: UserId,
    pub event_type: EventType,
    pub operation: Operation,
    pub entity_id: i64,
    pub timestamp: DateTime<Utc>,
}

impl NewEvent {
    pub fn new(user_id: UserId, event_type: EventType, operation: Operation, entity_id: i64) -> Self {
        Self {
            user_id,
            event_type,
            operation,
            entity_id,
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Like => write!(f, "LIKE"),
            EventType::Review => write!(f, "REVIEW"),
            EventType::Friend => write!(f, "FRIEND"),
            EventType::Vote => write!(f, "VOTE"),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add => write!(f, "ADD"),
            Operation::Remove => write!(f, "REMOVE"),
            Operation::Update => write!(f, "UPDATE"),
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKE" => Ok(EventType::Like),
            "REVIEW" => Ok(EventType::Review),
            "FRIEND" => Ok(EventType::Friend),
            "VOTE" => Ok(EventType::Vote),
            other => Err(format!("Unknown event type: {}", other)),
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD" => Ok(Operation::Add),
            "REMOVE" => Ok(Operation::Remove),
            "UPDATE" => Ok(Operation::Update),
            other => Err(format!("Unknown operation: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_parse() {
        for t in [EventType::Like, EventType::Review, EventType::Friend, EventType::Vote] {
            assert_eq!(t.to_string().parse::<EventType>().unwrap(), t);
        }
        for op in [Operation::Add, Operation::Remove, Operation::Update] {
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operation_rejected() {
        assert!("TOGGLE".parse::<Operation>().is_err());
    }
}
