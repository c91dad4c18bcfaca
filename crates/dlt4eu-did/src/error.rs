/// Identity document engine errors.
#[derive(Debug, thiserror::Error)]
pub enum DidError {
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid key material: {0}")]
    InvalidKey(String),

    #[error("signature verification failed")]
    SignatureVerificationFailed,

    #[error("invalid DID document: {0}")]
    InvalidDocument(String),

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("key {0} has no private material")]
    MissingPrivateKey(String),
}
