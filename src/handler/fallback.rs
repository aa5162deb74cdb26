//! Terminal handler that answers every path with a fixed greeting.

use super::{Handler, Resolution};

/// Body served when no mapping matched.
pub const DEFAULT_GREETING: &str = "Hello, world!\n";

/// Leaf of every chain. Never delegates.
#[derive(Debug, Clone)]
pub struct DefaultHandler {
    body: String,
}

impl DefaultHandler {
    /// Create a default handler with a custom greeting body.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// The greeting served for unmatched paths.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Default for DefaultHandler {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

impl Handler for DefaultHandler {
    fn resolve<'a>(&'a self, path: &str) -> Resolution<'a> {
        tracing::debug!(path = %path, "No redirect matched, serving greeting");
        Resolution::Greeting(&self.body)
    }
}
