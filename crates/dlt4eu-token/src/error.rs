use jsonwebtoken::Algorithm;

/// Token engine errors.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("unknown signing key: {0}")]
    UnknownKey(String),

    #[error("duplicate signing key: {0}")]
    DuplicateKey(String),

    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    #[error("token carries no key identifier")]
    MissingKeyId,

    #[error("unexpected signing method: {0:?}")]
    MethodMismatch(Algorithm),

    #[error("unexpected content type: {0:?}")]
    ContentTypeMismatch(Option<String>),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
