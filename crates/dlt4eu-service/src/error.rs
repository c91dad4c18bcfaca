use dlt4eu_did::DidError;
use dlt4eu_token::TokenError;

/// Service operation errors.
///
/// `Identity` and `Token` carry failures reported by the document and token
/// engines, wrapping the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden: administrator role required")]
    Forbidden,

    #[error("unknown identifier: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("identity engine failure: {0}")]
    Identity(#[from] DidError),

    #[error("token engine failure: {0}")]
    Token(#[from] TokenError),
}
