// src/config.rs
//
// Runtime configuration
//
// Sources, lowest precedence first:
// 1. Built-in defaults
// 2. A JSON file passed to `AppConfig::load`
// 3. FILMHUB_DB_PATH / FILMHUB_POOL_SIZE environment variables

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const DB_PATH_ENV: &str = "FILMHUB_DB_PATH";
pub const POOL_SIZE_ENV: &str = "FILMHUB_POOL_SIZE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite database file. `None` resolves to `{data_dir}/filmhub/filmhub.db`.
    pub database_path: Option<PathBuf>,

    pub pool_max_size: u32,

    pub busy_timeout_ms: u32,

    /// Popular-films limit when the caller gives none
    pub default_popular_limit: usize,

    /// Reviews-per-film limit when the caller gives none
    pub default_review_limit: usize,

    /// Surface activity feed append failures instead of logging them
    pub strict_activity_feed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            pool_max_size: 8,
            busy_timeout_ms: 5000,
            default_popular_limit: 10,
            default_review_limit: 10,
            strict_activity_feed: false,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file, then apply environment overrides
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> AppResult<Self> {
        AppConfig::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    fn with_env_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DB_PATH_ENV) {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(size) = lookup(POOL_SIZE_ENV) {
            self.pool_max_size = size
                .parse()
                .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", POOL_SIZE_ENV, size)))?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.pool_max_size == 0 {
            return Err(AppError::Config("pool_max_size must be positive".to_string()));
        }
        if self.default_popular_limit == 0 || self.default_review_limit == 0 {
            return Err(AppError::Config("default limits must be positive".to_string()));
        }
        Ok(())
    }

    /// Database file location
    ///
    /// Path structure when not configured: {APP_DATA}/filmhub/filmhub.db
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let app_data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

        let filmhub_dir = app_data_dir.join("filmhub");
        std::fs::create_dir_all(&filmhub_dir)?;

        Ok(filmhub_dir.join("filmhub.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.default_popular_limit, 10);
        assert_eq!(config.default_review_limit, 10);
        assert!(!config.strict_activity_feed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .with_env_overrides(env(&[(DB_PATH_ENV, "/tmp/films.db"), (POOL_SIZE_ENV, "3")]))
            .unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/films.db")));
        assert_eq!(config.pool_max_size, 3);
        assert_eq!(config.resolve_database_path().unwrap(), PathBuf::from("/tmp/films.db"));
    }

    #[test]
    fn test_bad_pool_size_rejected() {
        let result = AppConfig::default().with_env_overrides(env(&[(POOL_SIZE_ENV, "many")]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = AppConfig::default().with_env_overrides(env(&[(POOL_SIZE_ENV, "0")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_popular_limit": 5, "strict_activity_feed": true }}"#).unwrap();

        let config: AppConfig =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(config.default_popular_limit, 5);
        assert!(config.strict_activity_feed);
        assert_eq!(config.pool_max_size, 8);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pool_size": 5 }}"#).unwrap();
        assert!(matches!(AppConfig::load(file.path()), Err(AppError::Config(_))));
    }
}
