//! Redirect handler chain.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → structured.rs (MapHandler built from YAML/JSON records)
//!     → map.rs (MapHandler over the static table)
//!     → fallback.rs (DefaultHandler, always answers)
//!     → Resolution (Redirect or Greeting)
//! ```
//!
//! # Design Decisions
//! - Each handler owns its fallback, so the chain is built leaf-first
//!   and cannot contain a cycle
//! - Built once at startup, immutable at runtime (shared via Arc, no locks)
//! - A lookup miss is normal control flow, never an error

pub mod fallback;
pub mod map;
pub mod structured;

use std::fmt;

pub use fallback::{DefaultHandler, DEFAULT_GREETING};
pub use map::{MapHandler, PathMap};
pub use structured::{
    build_path_map, json_handler, parse_records, structured_handler, yaml_handler, DataFormat,
    ParseError, RedirectRecord,
};

/// Outcome of resolving a request path against a handler chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Redirect (302 Found) to the given target.
    Redirect(&'a str),
    /// Plain-text 200 response with the given body.
    Greeting(&'a str),
}

/// A link in the redirect chain.
///
/// Implementations either answer the path themselves or delegate to the
/// next handler they were built with.
pub trait Handler: Send + Sync + fmt::Debug {
    /// Resolve a request path to a response decision.
    fn resolve<'a>(&'a self, path: &str) -> Resolution<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn chain() -> Arc<dyn Handler> {
        let default: Arc<dyn Handler> = Arc::new(DefaultHandler::default());

        let mut static_paths = PathMap::new();
        static_paths.insert("/shared".into(), "https://static.example/shared".into());
        static_paths.insert("/static-only".into(), "https://static.example/only".into());
        let static_handler: Arc<dyn Handler> = Arc::new(MapHandler::new(static_paths, default));

        let yaml = b"- path: /shared\n  url: https://yaml.example/shared\n- path: /yaml-only\n  url: https://yaml.example/only\n";
        Arc::new(yaml_handler(yaml, static_handler).unwrap())
    }

    #[test]
    fn test_structured_mapping_checked_first() {
        let chain = chain();
        assert_eq!(
            chain.resolve("/shared"),
            Resolution::Redirect("https://yaml.example/shared")
        );
        assert_eq!(
            chain.resolve("/yaml-only"),
            Resolution::Redirect("https://yaml.example/only")
        );
    }

    #[test]
    fn test_falls_through_to_static_then_default() {
        let chain = chain();
        assert_eq!(
            chain.resolve("/static-only"),
            Resolution::Redirect("https://static.example/only")
        );
        assert_eq!(chain.resolve("/unknown"), Resolution::Greeting(DEFAULT_GREETING));
    }

    #[test]
    fn test_repeated_lookups_are_stable() {
        let chain = chain();
        for _ in 0..3 {
            assert_eq!(
                chain.resolve("/shared"),
                Resolution::Redirect("https://yaml.example/shared")
            );
            assert_eq!(chain.resolve("/nope"), Resolution::Greeting(DEFAULT_GREETING));
        }
    }
}
