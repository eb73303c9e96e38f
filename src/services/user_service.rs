// src/services/user_service.rs
//
// Users, friendships and the per-user activity feed.
//
// Friendship is one-directional: `add_friend(a, b)` makes b a friend of a
// without touching b's friend list.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{validate_user, Event, Friendship, NewUser, User, UserId};
use crate::error::{AppError, AppResult};
use crate::repositories::UserRepository;
use crate::services::{ActivityFeed, EntityExistenceGuard, VoteRegistry};

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    guard: Arc<EntityExistenceGuard>,
    friends: Arc<VoteRegistry<Friendship>>,
    feed: Arc<ActivityFeed>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        guard: Arc<EntityExistenceGuard>,
        friends: Arc<VoteRegistry<Friendship>>,
        feed: Arc<ActivityFeed>,
    ) -> Self {
        Self {
            user_repo,
            guard,
            friends,
            feed,
        }
    }

    pub fn create(&self, user: NewUser) -> AppResult<User> {
        let user = user.normalized();
        validate_user(&user)?;

        let created = self.user_repo.create(&user)?;
        log::info!("Created user {} ({})", created.id, created.login);
        Ok(created)
    }

    pub fn update(&self, id: UserId, user: NewUser) -> AppResult<User> {
        let user = user.normalized();
        validate_user(&user)?;

        if !self.user_repo.update(id, &user)? {
            return Err(AppError::not_found(format!("User with id {} doesn't exist", id)));
        }
        log::info!("Updated user {}", id);
        self.find_by_id(id)
    }

    pub fn find_by_id(&self, id: UserId) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("User with id {} doesn't exist", id)))
    }

    pub fn find_all(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all()
    }

    // ========================================================================
    // Friends
    // ========================================================================

    pub fn add_friend(&self, user: UserId, friend: UserId) -> AppResult<()> {
        self.check_pair(user, friend)?;
        self.friends.add(user, friend, ())
    }

    pub fn remove_friend(&self, user: UserId, friend: UserId) -> AppResult<()> {
        self.check_pair(user, friend)?;
        self.friends.remove(user, friend, ())
    }

    pub fn friends(&self, user: UserId) -> AppResult<Vec<User>> {
        self.guard.require_user(user)?;
        let ids = self.friends.targets_of(user)?;
        self.user_repo.find_by_ids(&ids)
    }

    /// Users both `user` and `other` have added as friends, ascending id
    pub fn common_friends(&self, user: UserId, other: UserId) -> AppResult<Vec<User>> {
        self.guard.require_user(user)?;
        self.guard.require_user(other)?;

        let mine: BTreeSet<UserId> = self.friends.targets_of(user)?.into_iter().collect();
        let shared: Vec<UserId> = self
            .friends
            .targets_of(other)?
            .into_iter()
            .filter(|id| mine.contains(id))
            .collect();

        self.user_repo.find_by_ids(&shared)
    }

    fn check_pair(&self, user: UserId, friend: UserId) -> AppResult<()> {
        if user == friend {
            return Err(AppError::invalid_argument(format!(
                "User with ID {} cannot be their own friend",
                user
            )));
        }
        self.guard.require_user(user)?;
        self.guard.require_user(friend)
    }

    // ========================================================================
    // Feed
    // ========================================================================

    pub fn feed(&self, user: UserId) -> AppResult<Vec<Event>> {
        self.guard.require_user(user)?;
        self.feed.feed(user)
    }
}
