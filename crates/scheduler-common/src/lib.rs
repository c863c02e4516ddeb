//! # scheduler-common
//!
//! Shared utilities including configuration, error handling, token
//! verification, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod shutdown;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    NotifierBackend, NotifierConfig, RateLimitConfig, RedisConfig, ServerConfig, StoreBackend,
    StoreConfig, SweeperConfig, WorkflowConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use shutdown::shutdown_signal;
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
