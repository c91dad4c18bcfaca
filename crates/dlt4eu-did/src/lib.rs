//! dlt4eu Identity Document Engine
//!
//! Provides the decentralized identity primitives for the dlt4eu service:
//! - Ed25519 key material with PKCS#8 import/export
//! - DID identifiers (`did:dlt4eu:<uuid>`) with named keys
//! - DID Documents (W3C-compatible, base64 key encoding)
//! - Detached linked-data proofs over arbitrary payloads

pub mod document;
pub mod error;
pub mod identifier;
pub mod keys;
pub mod proof;

pub use document::{Document, VerificationMethod};
pub use error::DidError;
pub use identifier::{DidKey, Identifier, DEFAULT_METHOD};
pub use keys::{sign, verify, KeyPair, PublicKey, Signature};
pub use proof::ProofLd;
