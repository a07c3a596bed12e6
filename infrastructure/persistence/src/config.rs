use std::time::Duration;

use anyhow::Context;
use business::domain::product::value_objects::MatchPolicy;

use crate::db::DatabaseConfig;

const DEFAULT_MIGRATIONS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Catalog configuration loaded from the environment
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - DATABASE_MAX_CONNECTIONS: Pool size (default: 5)
/// - DATABASE_ACQUIRE_TIMEOUT_SECS: Wait for a free connection (default: 30)
/// - MIGRATIONS_PATH: Directory with SQL migrations (default: this crate's `migrations/`)
/// - DUPLICATE_MATCH_POLICY: "key_wise" or "sorted_values" (default: "key_wise")
pub struct CatalogConfig {
    pub database: DatabaseConfig,
    pub migrations_path: String,
    pub match_policy: MatchPolicy,
}

impl CatalogConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_string = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let mut database = DatabaseConfig::new(connection_string);

        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            database.max_connections = raw
                .parse()
                .with_context(|| format!("invalid DATABASE_MAX_CONNECTIONS: {raw}"))?;
        }
        if let Some(raw) = lookup("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("invalid DATABASE_ACQUIRE_TIMEOUT_SECS: {raw}"))?;
            database.acquire_timeout = Duration::from_secs(secs);
        }

        let migrations_path =
            lookup("MIGRATIONS_PATH").unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string());

        let match_policy = match lookup("DUPLICATE_MATCH_POLICY") {
            Some(raw) => raw.parse::<MatchPolicy>().map_err(anyhow::Error::msg)?,
            None => MatchPolicy::default(),
        };

        Ok(Self {
            database,
            migrations_path,
            match_policy,
        })
    }
}
