// src/lib.rs
// FilmHub - film catalog with likes, reviews, rankings and an activity feed
//
// Architecture:
// - Domain-centric: entities, identifiers and invariants live in `domain`
// - Repositories are plain data mappers over SQLite
// - Services compose existence checks, relation registries and the
//   activity feed; read paths are pure functions of stored state
// - Explicit: No implicit behavior, no magic

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_film,
    validate_user,
    Director,
    DirectorId,
    Event,
    EventType,
    Film,
    FilmId,
    Genre,
    GenreId,
    Mpa,
    MpaId,
    NewFilm,
    NewReview,
    NewUser,
    Operation,
    Review,
    ReviewEdit,
    ReviewId,
    User,
    UserId,
};

// ============================================================================
// PUBLIC API - Configuration and Errors
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, ActivityRecorded, DomainEvent, EventBus, EventLogEntry, FilmCreated,
    FilmRemoved, FilmUpdated,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ActivityFeed,
    CatalogReferenceService,
    DirectorService,
    DirectorSort,
    EntityExistenceGuard,
    FilmService,
    PopularFilter,
    ReviewService,
    SearchField,
    UserService,
    VoteRegistry,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};
