// src/domain/relation.rs
//
// Set-membership relations between two entities.
//
// A relation holds at most one fact per (subject, target) pair. Its only
// states are ABSENT and PRESENT; there is no toggle. Likes, review votes
// and friendships share these semantics and differ only in their types,
// their optional payload and the wording of their messages.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use super::activity::EventType;
use super::ids::{FilmId, ReviewId, UserId};

pub trait RelationKind: Send + Sync + 'static {
    type Subject: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;
    type Target: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;
    /// Data carried by a present relation. `()` for pure membership.
    type Payload: Copy + Eq + Debug + Send + Sync + 'static;

    /// Feed event type for add/remove, if the relation is recorded in the feed
    const FEED_EVENT: Option<EventType>;

    fn already_present(subject: Self::Subject, target: Self::Target) -> String;

    fn not_present(subject: Self::Subject, target: Self::Target) -> String;

    /// Feed entity id for an event about `target`
    fn feed_entity(target: Self::Target) -> i64;
}

/// User likes film
#[derive(Debug, Clone, Copy)]
pub struct FilmLike;

impl RelationKind for FilmLike {
    type Subject = UserId;
    type Target = FilmId;
    type Payload = ();

    const FEED_EVENT: Option<EventType> = Some(EventType::Like);

    fn already_present(user: UserId, film: FilmId) -> String {
        format!("User with ID {} has already liked film with ID {}", user, film)
    }

    fn not_present(user: UserId, film: FilmId) -> String {
        format!("User with ID {} has not liked film with ID {}", user, film)
    }

    fn feed_entity(film: FilmId) -> i64 {
        film.get()
    }
}

/// Polarity of a review vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VotePolarity {
    Useful,
    Useless,
}

impl VotePolarity {
    pub fn from_is_useful(is_useful: bool) -> Self {
        if is_useful {
            VotePolarity::Useful
        } else {
            VotePolarity::Useless
        }
    }

    pub fn is_useful(self) -> bool {
        self == VotePolarity::Useful
    }
}

/// User votes on a review's usefulness
#[derive(Debug, Clone, Copy)]
pub struct ReviewVote;

impl RelationKind for ReviewVote {
    type Subject = UserId;
    type Target = ReviewId;
    type Payload = VotePolarity;

    const FEED_EVENT: Option<EventType> = Some(EventType::Vote);

    fn already_present(user: UserId, review: ReviewId) -> String {
        format!("User with ID {} has already voted on review with ID {}", user, review)
    }

    fn not_present(user: UserId, review: ReviewId) -> String {
        format!("User with ID {} has not voted this way on review with ID {}", user, review)
    }

    fn feed_entity(review: ReviewId) -> i64 {
        review.get()
    }
}

/// One-directional friendship: subject added target as a friend
#[derive(Debug, Clone, Copy)]
pub struct Friendship;

impl RelationKind for Friendship {
    type Subject = UserId;
    type Target = UserId;
    type Payload = ();

    const FEED_EVENT: Option<EventType> = Some(EventType::Friend);

    fn already_present(user: UserId, friend: UserId) -> String {
        format!("User with ID {} is already friends with user with ID {}", user, friend)
    }

    fn not_present(user: UserId, friend: UserId) -> String {
        format!("User with ID {} is not friends with user with ID {}", user, friend)
    }

    fn feed_entity(friend: UserId) -> i64 {
        friend.get()
    }
}
