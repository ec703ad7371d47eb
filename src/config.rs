//! Runtime configuration
//!
//! Read once from the environment at startup.

use std::path::PathBuf;

use tracing::warn;

pub const DATABASE_PATH_VAR: &str = "FITNUTRITION_DATABASE_PATH";
pub const SESSION_TTL_VAR: &str = "FITNUTRITION_SESSION_TTL_HOURS";
pub const PASSWORD_COST_VAR: &str = "FITNUTRITION_PASSWORD_COST";

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 30;
pub const DEFAULT_PASSWORD_COST: u32 = 10;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub session_ttl_hours: i64,
    pub password_cost: u32,
}

impl Config {
    /// Build the configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            database_path: database_path(),
            session_ttl_hours: parse_positive(SESSION_TTL_VAR, DEFAULT_SESSION_TTL_HOURS),
            password_cost: parse_positive(PASSWORD_COST_VAR, DEFAULT_PASSWORD_COST),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            password_cost: DEFAULT_PASSWORD_COST,
        }
    }
}

/// Get the database path from environment or use default
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_database_path())
}

fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("fitnutrition.db");
    path
}

fn parse_positive<T>(var: &str, default: T) -> T
where
    T: std::str::FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => parse_positive_value(&raw).unwrap_or_else(|| {
            warn!("Ignoring invalid {}={:?}, using {}", var, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_positive_value<T>(raw: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    raw.trim().parse::<T>().ok().filter(|v| *v > T::default())
}
