//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    NotifierBackend, NotifierConfig, RateLimitConfig, RedisConfig, ServerConfig, StoreBackend,
    StoreConfig, SweeperConfig, WorkflowConfig,
};
