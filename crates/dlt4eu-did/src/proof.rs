use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DidError;
use crate::keys::{verify, PublicKey, Signature};

/// Proof suite identifier for Ed25519 detached proofs.
pub const PROOF_TYPE_ED25519: &str = "Ed25519Signature2020";

/// A detached linked-data proof over an arbitrary payload.
///
/// The signature covers the canonical JSON form of the proof options
/// followed by the payload bytes, binding the nonce, domain, and purpose
/// to the signed data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofLd {
    /// Proof suite used.
    #[serde(rename = "type")]
    pub proof_type: String,
    /// When the proof was created.
    pub created: DateTime<Utc>,
    /// Operational domain of the proof (e.g., "example.com"). Restricts
    /// the proof to a particular target.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain: String,
    /// Random value used once per domain and window of time, to mitigate
    /// replay attacks.
    pub nonce: String,
    /// Intent of the proof (e.g., "authentication", "assertionMethod").
    #[serde(rename = "proofPurpose")]
    pub purpose: String,
    /// Verification method able to independently verify the proof.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,
    /// Optional challenge value supplied by the requesting party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    /// Raw signature bytes, base64-encoded on the wire.
    #[serde(rename = "proofValue", with = "base64_bytes")]
    pub value: Vec<u8>,
}

impl ProofLd {
    /// Compute the byte sequence the proof signature covers: the canonical
    /// JSON of the proof options (without the value) plus the payload.
    pub(crate) fn signing_input(&self, data: &[u8]) -> Vec<u8> {
        let options = serde_json::json!({
            "type": self.proof_type,
            "created": self.created.to_rfc3339(),
            "domain": self.domain,
            "nonce": self.nonce,
            "proofPurpose": self.purpose,
            "verificationMethod": self.verification_method,
            "challenge": self.challenge,
        });
        let mut input = serde_json::to_vec(&options).unwrap_or_default();
        input.extend_from_slice(data);
        input
    }

    /// Proof value encoded as base64 (RFC 4648).
    pub fn value_base64(&self) -> String {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine as _;
        BASE64.encode(&self.value)
    }

    /// Verify the proof against the payload it was produced for.
    pub fn verify(&self, data: &[u8], pubkey: &PublicKey) -> Result<(), DidError> {
        let signature = Signature::from_bytes(&self.value)?;
        verify(&self.signing_input(data), &signature, pubkey)
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded).map_err(serde::de::Error::custom)
    }
}
