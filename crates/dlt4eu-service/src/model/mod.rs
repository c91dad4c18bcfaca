//! Service data model: identifier records, proofs, credentials, and the
//! request payloads of the operations surface.

pub mod credential;
pub mod identifier;
pub mod proof;
pub mod request;

pub use credential::Credential;
pub use identifier::{Identifier, PublicKeyInfo};
pub use proof::Proof;
pub use request::{CredentialRequest, ProofRequest, PublishRequest};
