use crate::app_config::{AppConfig, AppwriteSettings, Environment, PopularityBackend};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be driven by a plain
/// `HashMap` lookup.
///
/// # Errors
///
/// Returns `ConfigError` if required vars are missing or values are invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("MARQUEE_ENV", "development"))?;
    let bind_addr = parse_addr("MARQUEE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MARQUEE_LOG_LEVEL", "info");

    let tmdb_api_key = optional("TMDB_API_KEY");
    let tmdb_base_url = or_default("MARQUEE_TMDB_BASE_URL", "https://api.themoviedb.org/3");
    let tmdb_image_base_url = or_default(
        "MARQUEE_TMDB_IMAGE_BASE_URL",
        "https://image.tmdb.org/t/p/w500",
    );
    let tmdb_request_timeout_secs = parse_u64("MARQUEE_TMDB_REQUEST_TIMEOUT_SECS", "30")?;

    let search_debounce_ms = parse_u64("MARQUEE_SEARCH_DEBOUNCE_MS", "500")?;
    let trending_limit = parse_usize("MARQUEE_TRENDING_LIMIT", "5")?;
    let rate_limit_per_minute = parse_usize("MARQUEE_RATE_LIMIT_PER_MINUTE", "120")?;

    let popularity_backend =
        parse_popularity_backend(&or_default("MARQUEE_POPULARITY_BACKEND", "postgres"))?;

    let database_url = match popularity_backend {
        PopularityBackend::Postgres => Some(require("DATABASE_URL")?),
        PopularityBackend::Appwrite | PopularityBackend::Memory => optional("DATABASE_URL"),
    };
    let db_max_connections = parse_u32("MARQUEE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("MARQUEE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("MARQUEE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let appwrite = match popularity_backend {
        PopularityBackend::Appwrite => Some(AppwriteSettings {
            endpoint: require("APPWRITE_ENDPOINT")?,
            project_id: require("APPWRITE_PROJECT_ID")?,
            database_id: require("APPWRITE_DATABASE_ID")?,
            collection_id: require("APPWRITE_COLLECTION_ID")?,
            api_key: require("APPWRITE_API_KEY")?,
        }),
        PopularityBackend::Postgres | PopularityBackend::Memory => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        tmdb_api_key,
        tmdb_base_url,
        tmdb_image_base_url,
        tmdb_request_timeout_secs,
        search_debounce_ms,
        trending_limit,
        popularity_backend,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        appwrite,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MARQUEE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_popularity_backend(s: &str) -> Result<PopularityBackend, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "postgres" => Ok(PopularityBackend::Postgres),
        "appwrite" => Ok(PopularityBackend::Appwrite),
        "memory" => Ok(PopularityBackend::Memory),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MARQUEE_POPULARITY_BACKEND".to_string(),
            reason: format!("expected postgres, appwrite or memory, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
