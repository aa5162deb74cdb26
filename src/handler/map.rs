//! Map-backed redirect handler.
//!
//! # Responsibilities
//! - Exact, case-sensitive lookup of the request path
//! - Delegate misses to the fallback with the path unchanged

use std::collections::HashMap;
use std::sync::Arc;

use super::{Handler, Resolution};

/// Request path → destination URL.
pub type PathMap = HashMap<String, String>;

/// Redirects paths found in its table, delegates everything else.
#[derive(Debug)]
pub struct MapHandler {
    paths: PathMap,
    fallback: Arc<dyn Handler>,
}

impl MapHandler {
    /// Build a handler over `paths` that delegates misses to `fallback`.
    pub fn new(paths: PathMap, fallback: Arc<dyn Handler>) -> Self {
        Self { paths, fallback }
    }

    /// Number of paths this handler redirects itself.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Handler for MapHandler {
    fn resolve<'a>(&'a self, path: &str) -> Resolution<'a> {
        match self.paths.get(path) {
            Some(target) => {
                tracing::debug!(path = %path, target = %target, "Redirect matched");
                Resolution::Redirect(target)
            }
            None => self.fallback.resolve(path),
        }
    }
}
