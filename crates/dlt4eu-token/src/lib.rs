//! dlt4eu Token Engine
//!
//! Issues and validates the signed tokens (JWTs) used as verifiable
//! credentials and API access credentials. Tokens are signed with named
//! Ed25519 keys (EdDSA); the key name travels in the `kid` header and the
//! credential content type in `cty`.

pub mod claims;
pub mod error;
pub mod generator;
pub mod params;

pub use claims::Claims;
pub use error::TokenError;
pub use generator::{Expect, TokenGenerator};
pub use params::{parse_duration, TokenParameters};

pub use jsonwebtoken::Algorithm;
