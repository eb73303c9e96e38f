use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use super::entity::NewUser;
use crate::domain::{DomainError, DomainResult};

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

/// Validates all User invariants against today's date
pub fn validate_user(user: &NewUser) -> DomainResult<()> {
    validate_user_on(user, Utc::now().date_naive())
}

pub(crate) fn validate_user_on(user: &NewUser, today: NaiveDate) -> DomainResult<()> {
    if !email_pattern().is_match(&user.email) {
        return Err(DomainError::InvariantViolation(format!(
            "Invalid email: {}",
            user.email
        )));
    }
    if user.login.is_empty() || user.login.chars().any(char::is_whitespace) {
        return Err(DomainError::InvariantViolation(
            "Login cannot be empty or contain whitespace".to_string(),
        ));
    }
    if let Some(birthday) = user.birthday {
        if birthday > today {
            return Err(DomainError::InvariantViolation(format!(
                "Birthday {} is in the future",
                birthday
            )));
        }
    }
    Ok(())
}
