// src/domain/director.rs

use serde::{Deserialize, Serialize};

use super::ids::DirectorId;
use crate::domain::{DomainError, DomainResult};

/// A film director. Many-to-many with Film.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    pub name: String,
}

/// Director name cannot be blank
pub fn validate_director_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Director name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_fails() {
        assert!(validate_director_name("  ").is_err());
        assert!(validate_director_name("Sofia Coppola").is_ok());
    }
}
