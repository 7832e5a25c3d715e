use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where search popularity counters are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularityBackend {
    Postgres,
    Appwrite,
    Memory,
}

impl std::fmt::Display for PopularityBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PopularityBackend::Postgres => write!(f, "postgres"),
            PopularityBackend::Appwrite => write!(f, "appwrite"),
            PopularityBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Connection settings for an Appwrite documents collection.
#[derive(Clone)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub api_key: String,
}

impl std::fmt::Debug for AppwriteSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteSettings")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("database_id", &self.database_id)
            .field("collection_id", &self.collection_id)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_request_timeout_secs: u64,
    pub search_debounce_ms: u64,
    pub trending_limit: usize,
    pub popularity_backend: PopularityBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub appwrite: Option<AppwriteSettings>,
    pub rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "tmdb_api_key",
                &self.tmdb_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("tmdb_image_base_url", &self.tmdb_image_base_url)
            .field("tmdb_request_timeout_secs", &self.tmdb_request_timeout_secs)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .field("trending_limit", &self.trending_limit)
            .field("popularity_backend", &self.popularity_backend)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("appwrite", &self.appwrite)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
