//! Application configuration structs
//!
//! Loads configuration from environment variables (after reading `.env`).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub store: StoreConfig,
    pub database: Option<DatabaseConfig>,
    pub redis: Option<RedisConfig>,
    pub notifier: NotifierConfig,
    pub jwt: JwtConfig,
    pub workflow: WorkflowConfig,
    pub sweeper: SweeperConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Where notification payloads are handed off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierBackend {
    /// Publish to Redis channels consumed by the delivery worker
    Redis,
    /// Log payloads only
    Log,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    pub backend: NotifierBackend,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Friend-invitation workflow settings
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default = "default_invitation_ttl_days")]
    pub invitation_ttl_days: i64,
    /// Product name used in emails and push messages
    #[serde(default = "default_product_name")]
    pub product_name: String,
    /// Base URL for invitation deep links
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

/// Expiry sweeper schedule
#[derive(Debug, Clone, Deserialize)]
pub struct SweeperConfig {
    /// Hour of day (UTC) of the daily run
    #[serde(default = "default_sweeper_run_at_hour")]
    pub run_at_hour: u32,
    /// Sweep once and exit
    #[serde(default)]
    pub run_once: bool,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "kids-scheduler".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_invitation_ttl_days() -> i64 {
    scheduler_core::entities::DEFAULT_INVITATION_TTL_DAYS
}

fn default_product_name() -> String {
    "Kids Scheduler".to_string()
}

fn default_app_url() -> String {
    "https://kidsscheduler.app".to_string()
}

fn default_sweeper_run_at_hour() -> u32 {
    8 // midnight US Pacific (standard time)
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Reads one variable and parses it, failing on malformed values
fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

fn parse_bool<F>(lookup: &F, key: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|s| s.trim().to_lowercase()) {
        None => Ok(false),
        Some(s) => match s.as_str() {
            "" | "0" | "false" | "no" => Ok(false),
            "1" | "true" | "yes" => Ok(true),
            _ => Err(ConfigError::InvalidValue(key, s)),
        },
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV").map(|s| s.to_lowercase()) {
            None => Environment::default(),
            Some(s) => match s.as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
        };

        let database = match lookup("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                run_migrations: parse_bool(&lookup, "DATABASE_RUN_MIGRATIONS")?,
            }),
            None => None,
        };

        let redis = match lookup("REDIS_URL") {
            Some(url) => Some(RedisConfig {
                url,
                max_connections: parse_var(&lookup, "REDIS_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_redis_max_connections),
            }),
            None => None,
        };

        // Backends default to whatever infrastructure is configured
        let store_backend = match lookup("STORE_BACKEND").map(|s| s.to_lowercase()) {
            Some(s) if s == "postgres" => StoreBackend::Postgres,
            Some(s) if s == "memory" => StoreBackend::Memory,
            Some(s) => return Err(ConfigError::InvalidValue("STORE_BACKEND", s)),
            None if database.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };
        if store_backend == StoreBackend::Postgres && database.is_none() {
            return Err(ConfigError::MissingVar("DATABASE_URL"));
        }

        let notifier_backend = match lookup("NOTIFIER_BACKEND").map(|s| s.to_lowercase()) {
            Some(s) if s == "redis" => NotifierBackend::Redis,
            Some(s) if s == "log" => NotifierBackend::Log,
            Some(s) => return Err(ConfigError::InvalidValue("NOTIFIER_BACKEND", s)),
            None if redis.is_some() => NotifierBackend::Redis,
            None => NotifierBackend::Log,
        };
        if notifier_backend == NotifierBackend::Redis && redis.is_none() {
            return Err(ConfigError::MissingVar("REDIS_URL"));
        }

        let invitation_ttl_days = parse_var(&lookup, "INVITATION_TTL_DAYS")?
            .unwrap_or_else(default_invitation_ttl_days);
        if invitation_ttl_days <= 0 {
            return Err(ConfigError::InvalidValue(
                "INVITATION_TTL_DAYS",
                invitation_ttl_days.to_string(),
            ));
        }

        let run_at_hour =
            parse_var(&lookup, "SWEEPER_RUN_AT_HOUR")?.unwrap_or_else(default_sweeper_run_at_hour);
        if run_at_hour > 23 {
            return Err(ConfigError::InvalidValue(
                "SWEEPER_RUN_AT_HOUR",
                run_at_hour.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_var(&lookup, "API_PORT")?.unwrap_or_else(default_api_port),
            },
            store: StoreConfig {
                backend: store_backend,
            },
            database,
            redis,
            notifier: NotifierConfig {
                backend: notifier_backend,
            },
            jwt: JwtConfig {
                secret: lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parse_var(&lookup, "JWT_ACCESS_TOKEN_EXPIRY")?
                    .unwrap_or_else(default_access_token_expiry),
            },
            workflow: WorkflowConfig {
                invitation_ttl_days,
                product_name: lookup("WORKFLOW_PRODUCT_NAME").unwrap_or_else(default_product_name),
                app_url: lookup("WORKFLOW_APP_URL").unwrap_or_else(default_app_url),
            },
            sweeper: SweeperConfig {
                run_at_hour,
                run_once: parse_bool(&lookup, "SWEEPER_RUN_ONCE")?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(&lookup, "RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var(&lookup, "RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
