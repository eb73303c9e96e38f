use chrono::NaiveDate;

use super::entity::NewFilm;
use crate::domain::{DomainError, DomainResult};

/// The first public film screening. Nothing can be released before it.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

const MAX_DESCRIPTION_CHARS: usize = 200;

/// Validates all Film invariants
pub fn validate_film(film: &NewFilm) -> DomainResult<()> {
    validate_name(&film.name)?;
    validate_description(&film.description)?;
    validate_release_date(film.release_date)?;
    validate_duration(film.duration)?;
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Film name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> DomainResult<()> {
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_CHARS {
        return Err(DomainError::InvariantViolation(format!(
            "Film description is {} characters, at most {} allowed",
            length, MAX_DESCRIPTION_CHARS
        )));
    }
    Ok(())
}

fn validate_release_date(release_date: NaiveDate) -> DomainResult<()> {
    let earliest = earliest_release_date();
    if release_date < earliest {
        return Err(DomainError::InvariantViolation(format!(
            "Release date {} is before {}",
            release_date, earliest
        )));
    }
    Ok(())
}

fn validate_duration(duration: u32) -> DomainResult<()> {
    if duration == 0 {
        return Err(DomainError::InvariantViolation(
            "Film duration must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::MpaId;
    use std::collections::BTreeSet;

    fn film() -> NewFilm {
        NewFilm {
            name: "Metropolis".to_string(),
            description: "A futuristic city".to_string(),
            release_date: NaiveDate::from_ymd_opt(1927, 1, 10).unwrap(),
            duration: 153,
            mpa: MpaId(1),
            genres: BTreeSet::new(),
            directors: BTreeSet::new(),
        }
    }

    #[test]
    fn test_valid_film() {
        assert!(validate_film(&film()).is_ok());
    }

    #[test]
    fn test_blank_name_fails() {
        let mut f = film();
        f.name = " ".to_string();
        assert!(validate_film(&f).is_err());
    }

    #[test]
    fn test_description_limit_counts_chars() {
        let mut f = film();
        f.description = "ё".repeat(200);
        assert!(validate_film(&f).is_ok());
        f.description.push('ё');
        assert!(validate_film(&f).is_err());
    }

    #[test]
    fn test_release_date_boundary() {
        let mut f = film();
        f.release_date = earliest_release_date();
        assert!(validate_film(&f).is_ok());
        f.release_date = NaiveDate::from_ymd_opt(1895, 12, 27).unwrap();
        assert!(validate_film(&f).is_err());
    }

    #[test]
    fn test_zero_duration_fails() {
        let mut f = film();
        f.duration = 0;
        assert!(validate_film(&f).is_err());
    }
}
