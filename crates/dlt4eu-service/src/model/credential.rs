use serde::Serialize;

/// A verifiable credential: a signed token string wrapping the requested
/// claims. Not stored; validity is re-checked on demand.
#[derive(Debug, Clone, Serialize)]
pub struct Credential {
    /// The signed token.
    pub token: String,
}
