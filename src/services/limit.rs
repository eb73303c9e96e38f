// src/services/limit.rs

use crate::error::{AppError, AppResult};

/// Resolve a caller-supplied result count. Absent means `default`;
/// zero or negative is rejected.
pub fn resolve_limit(raw: Option<i64>, default: usize) -> AppResult<usize> {
    match raw {
        None => Ok(default),
        Some(count) if count > 0 => usize::try_from(count)
            .map_err(|_| AppError::invalid_argument(format!("count {} is too large", count))),
        Some(count) => Err(AppError::invalid_argument(format!(
            "count must be positive, got {}",
            count
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_uses_default() {
        assert_eq!(resolve_limit(None, 10).unwrap(), 10);
    }

    #[test]
    fn test_positive_passes_through() {
        assert_eq!(resolve_limit(Some(3), 10).unwrap(), 3);
    }

    #[test]
    fn test_non_positive_rejected() {
        assert!(matches!(resolve_limit(Some(0), 10), Err(AppError::InvalidArgument(_))));
        assert!(matches!(resolve_limit(Some(-5), 10), Err(AppError::InvalidArgument(_))));
    }
}
