//! Path-based HTTP redirect service library.

pub mod config;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use handler::{Handler, Resolution};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
