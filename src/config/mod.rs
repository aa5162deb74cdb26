//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI overrides applied in main
//!     → ServiceConfig (validated, immutable)
//!     → lifecycle::startup builds the handler chain from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so the service runs without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    GreetingConfig, ListenerConfig, LogFormat, LoggingConfig, MappingSourceConfig,
    ServiceConfig, StaticRedirects,
};
pub use validation::{validate_config, ValidationError};
