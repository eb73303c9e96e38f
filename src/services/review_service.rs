// src/services/review_service.rs
//
// Reviews and review votes.
//
// Review mutations append REVIEW records to the activity feed with the
// review's author as actor. Votes go through the generic relation registry,
// which appends VOTE records with the voter as actor and the review id as
// entity.

use std::sync::Arc;

use crate::domain::{
    validate_review_content, EventType, FilmId, NewReview, Operation, Review, ReviewEdit, ReviewId,
    ReviewVote, UserId, VotePolarity,
};
use crate::error::{AppError, AppResult};
use crate::repositories::ReviewRepository;
use crate::services::limit::resolve_limit;
use crate::services::{ActivityFeed, EntityExistenceGuard, VoteRegistry};

pub struct ReviewService {
    review_repo: Arc<dyn ReviewRepository>,
    guard: Arc<EntityExistenceGuard>,
    votes: Arc<VoteRegistry<ReviewVote>>,
    feed: Arc<ActivityFeed>,
    default_review_limit: usize,
}

impl ReviewService {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        guard: Arc<EntityExistenceGuard>,
        votes: Arc<VoteRegistry<ReviewVote>>,
        feed: Arc<ActivityFeed>,
        default_review_limit: usize,
    ) -> Self {
        Self {
            review_repo,
            guard,
            votes,
            feed,
            default_review_limit,
        }
    }

    pub fn create(&self, review: NewReview) -> AppResult<Review> {
        validate_review_content(&review.content)?;
        self.guard.require_user(review.user_id)?;
        self.guard.require_film(review.film_id)?;

        let id = self.review_repo.create(&review)?;
        let created = self.find_by_id(id)?;
        log::info!("User {} reviewed film {} (review {})", created.user_id, created.film_id, id);

        self.feed
            .record(created.user_id, EventType::Review, Operation::Add, id.get())?;
        Ok(created)
    }

    /// Change content and polarity. Author and film stay as stored.
    pub fn update(&self, id: ReviewId, edit: ReviewEdit) -> AppResult<Review> {
        validate_review_content(&edit.content)?;
        let stored = self.find_by_id(id)?;

        self.review_repo.update(id, &edit)?;
        let updated = self.find_by_id(id)?;
        log::info!("Updated review {}", id);

        self.feed
            .record(stored.user_id, EventType::Review, Operation::Update, id.get())?;
        Ok(updated)
    }

    pub fn remove(&self, id: ReviewId) -> AppResult<()> {
        let stored = self.find_by_id(id)?;

        self.review_repo.delete(id)?;
        log::info!("Removed review {}", id);

        self.feed
            .record(stored.user_id, EventType::Review, Operation::Remove, id.get())
    }

    pub fn find_by_id(&self, id: ReviewId) -> AppResult<Review> {
        self.review_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found(format!("Review {} doesn't exist", id)))
    }

    /// Most useful reviews first, for one film or across all films
    pub fn find_by_film(&self, film: Option<FilmId>, count: Option<i64>) -> AppResult<Vec<Review>> {
        let limit = resolve_limit(count, self.default_review_limit)?;
        if let Some(film) = film {
            self.guard.require_film(film)?;
        }
        self.review_repo.find_by_film(film, limit)
    }

    pub fn add_vote(&self, review: ReviewId, user: UserId, is_useful: bool) -> AppResult<()> {
        self.guard.require_review(review)?;
        self.guard.require_user(user)?;
        self.votes.add(user, review, VotePolarity::from_is_useful(is_useful))
    }

    /// Withdraw a vote. The stored vote must have the same polarity.
    pub fn remove_vote(&self, review: ReviewId, user: UserId, is_useful: bool) -> AppResult<()> {
        self.guard.require_review(review)?;
        self.guard.require_user(user)?;
        self.votes.remove(user, review, VotePolarity::from_is_useful(is_useful))
    }
}
