use std::collections::HashMap;

/// Metadata key the bearer credential is read from.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Transport-agnostic request metadata.
///
/// Each key maps to a list of values, mirroring HTTP headers. Keys are
/// normalized to lowercase on insert.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    metadata: HashMap<String, Vec<String>>,
}

impl RequestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a metadata value under `key`.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.metadata
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }

    /// Builder-style insert.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// All values recorded under `key` (empty when absent).
    pub fn get(&self, key: &str) -> &[String] {
        self.metadata
            .get(&key.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
