//! Review invariants:
//!
//! 1. Content cannot be blank
//! 2. Author and film never change after creation
//! 3. Usefulness is derived from votes, never stored on its own
//! 4. At most one vote per (review, user)

pub mod entity;

pub use entity::{NewReview, Review, ReviewEdit};

use crate::domain::{DomainError, DomainResult};

/// Review content cannot be blank
pub fn validate_review_content(content: &str) -> DomainResult<()> {
    if content.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Review content cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_fails() {
        assert!(validate_review_content("\n\t").is_err());
        assert!(validate_review_content("Overlong but charming").is_ok());
    }
}
