use serde::{Deserialize, Serialize};

use crate::domain::ids::{FilmId, ReviewId, UserId};

/// A user's review of a film
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,

    pub content: String,

    /// Positive or negative review
    pub is_positive: bool,

    pub user_id: UserId,

    pub film_id: FilmId,

    /// Positive votes minus negative votes, computed on read
    pub useful: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub content: String,
    pub is_positive: bool,
    pub user_id: UserId,
    pub film_id: FilmId,
}

/// The editable part of a review. Author and film are kept from the stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEdit {
    pub content: String,
    pub is_positive: bool,
}
