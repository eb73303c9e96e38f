// src/services/director_service.rs

use std::sync::Arc;

use crate::domain::{validate_director_name, Director, DirectorId};
use crate::error::{AppError, AppResult};
use crate::repositories::DirectorRepository;

pub struct DirectorService {
    director_repo: Arc<dyn DirectorRepository>,
}

impl DirectorService {
    pub fn new(director_repo: Arc<dyn DirectorRepository>) -> Self {
        Self { director_repo }
    }

    pub fn find_all(&self) -> AppResult<Vec<Director>> {
        self.director_repo.find_all()
    }

    pub fn find_by_id(&self, id: DirectorId) -> AppResult<Director> {
        self.director_repo
            .find_by_id(id)?
            .ok_or_else(|| Self::missing(id))
    }

    pub fn create(&self, name: &str) -> AppResult<Director> {
        validate_director_name(name)?;
        let director = self.director_repo.create(name.trim())?;
        log::info!("Created director {} '{}'", director.id, director.name);
        Ok(director)
    }

    pub fn update(&self, director: Director) -> AppResult<Director> {
        validate_director_name(&director.name)?;
        let director = Director {
            name: director.name.trim().to_string(),
            ..director
        };

        if !self.director_repo.update(&director)? {
            return Err(Self::missing(director.id));
        }
        log::info!("Updated director {}", director.id);
        Ok(director)
    }

    /// Removing a director also drops its film links
    pub fn remove(&self, id: DirectorId) -> AppResult<()> {
        if !self.director_repo.delete(id)? {
            return Err(Self::missing(id));
        }
        log::info!("Removed director {}", id);
        Ok(())
    }

    fn missing(id: DirectorId) -> AppError {
        AppError::not_found(format!("Director with ID = {} not found", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockDirectorRepository;

    #[test]
    fn test_create_rejects_blank_name() {
        let mut repo = MockDirectorRepository::new();
        repo.expect_create().never();

        let service = DirectorService::new(Arc::new(repo));
        assert!(matches!(service.create("   "), Err(AppError::Domain(_))));
    }

    #[test]
    fn test_create_trims_name() {
        let mut repo = MockDirectorRepository::new();
        repo.expect_create()
            .withf(|name| name.to_string() == "Agnès Varda")
            .times(1)
            .returning(|name| Ok(Director { id: DirectorId(1), name: name.to_string() }));

        let service = DirectorService::new(Arc::new(repo));
        assert_eq!(service.create("  Agnès Varda ").unwrap().name, "Agnès Varda");
    }

    #[test]
    fn test_update_unknown_director() {
        let mut repo = MockDirectorRepository::new();
        repo.expect_update().returning(|_| Ok(false));

        let service = DirectorService::new(Arc::new(repo));
        let result = service.update(Director { id: DirectorId(4), name: "X".to_string() });
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_remove_unknown_director() {
        let mut repo = MockDirectorRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = DirectorService::new(Arc::new(repo));
        assert!(matches!(service.remove(DirectorId(4)), Err(AppError::NotFound(_))));
    }
}
