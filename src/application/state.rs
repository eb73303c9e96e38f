// src/application/state.rs
//
// Application state: one wired instance of every service.
// All fields are Arc-wrapped for thread-safe sharing across callers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity, ConnectionPool, DatabaseStats,
};
use crate::domain::{FilmLike, Friendship, ReviewVote};
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::repositories::*;
use crate::services::*;

pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub film_service: Arc<FilmService>,
    pub review_service: Arc<ReviewService>,
    pub user_service: Arc<UserService>,
    pub director_service: Arc<DirectorService>,
    pub reference_service: Arc<CatalogReferenceService>,
}

impl AppState {
    /// Open the configured database, apply the schema and wire the services
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;
        let pool = Arc::new(create_connection_pool(config)?);
        Self::with_pool(pool, config)
    }

    /// Wire the services over an existing pool. The schema is applied
    /// idempotently.
    pub fn with_pool(pool: Arc<ConnectionPool>, config: &AppConfig) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;
        }
        let event_bus = Arc::new(create_event_bus());

        // 2. REPOSITORIES
        let film_repo: Arc<dyn FilmRepository> = Arc::new(SqliteFilmRepository::new(pool.clone()));
        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
        let director_repo: Arc<dyn DirectorRepository> = Arc::new(SqliteDirectorRepository::new(pool.clone()));
        let review_repo: Arc<dyn ReviewRepository> = Arc::new(SqliteReviewRepository::new(pool.clone()));
        let reference_repo: Arc<dyn ReferenceRepository> = Arc::new(SqliteReferenceRepository::new(pool.clone()));
        let event_repo: Arc<dyn EventRepository> = Arc::new(SqliteEventRepository::new(pool.clone()));
        let like_repo: Arc<dyn RelationRepository<FilmLike>> =
            Arc::new(SqliteRelationRepository::<FilmLike>::new(pool.clone()));
        let vote_repo: Arc<dyn RelationRepository<ReviewVote>> =
            Arc::new(SqliteRelationRepository::<ReviewVote>::new(pool.clone()));
        let friend_repo: Arc<dyn RelationRepository<Friendship>> =
            Arc::new(SqliteRelationRepository::<Friendship>::new(pool.clone()));

        // 3. CORE COMPONENTS
        let guard = Arc::new(EntityExistenceGuard::new(
            film_repo.clone(),
            user_repo.clone(),
            director_repo.clone(),
            review_repo.clone(),
        ));
        let feed = Arc::new(ActivityFeed::new(
            event_repo,
            event_bus.clone(),
            config.strict_activity_feed,
        ));
        let likes = Arc::new(VoteRegistry::new(like_repo, feed.clone()));
        let votes = Arc::new(VoteRegistry::new(vote_repo, feed.clone()));
        let friends = Arc::new(VoteRegistry::new(friend_repo, feed.clone()));

        // 4. SERVICES
        let film_service = Arc::new(FilmService::new(
            film_repo,
            director_repo.clone(),
            reference_repo.clone(),
            guard.clone(),
            likes,
            event_bus.clone(),
            config.default_popular_limit,
        ));
        let review_service = Arc::new(ReviewService::new(
            review_repo,
            guard.clone(),
            votes,
            feed.clone(),
            config.default_review_limit,
        ));
        let user_service = Arc::new(UserService::new(user_repo, guard, friends, feed));
        let director_service = Arc::new(DirectorService::new(director_repo));
        let reference_service = Arc::new(CatalogReferenceService::new(reference_repo));

        log::info!("Application state initialized");

        Ok(Self {
            pool,
            event_bus,
            film_service,
            review_service,
            user_service,
            director_service,
            reference_service,
        })
    }

    pub fn database_stats(&self) -> AppResult<DatabaseStats> {
        let conn = get_connection(&self.pool)?;
        get_database_stats(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state.db");
        let config = AppConfig {
            database_path: Some(db_path.clone()),
            ..AppConfig::default()
        };

        let state = AppState::initialize(&config).unwrap();

        assert!(db_path.exists());
        assert_eq!(state.reference_service.ratings().unwrap().len(), 5);
        assert_eq!(state.database_stats().unwrap().film_count, 0);
    }

    #[test]
    fn test_initialize_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: Some(dir.path().join("state.db")),
            ..AppConfig::default()
        };

        AppState::initialize(&config).unwrap();
        let state = AppState::initialize(&config).unwrap();
        assert_eq!(state.reference_service.genres().unwrap().len(), 6);
    }
}
