use serde::Serialize;

use dlt4eu_did::ProofLd;

/// A detached linked-data proof result.
///
/// Pure value: produced once per request, never stored. The `controller`
/// always equals the id of the identifier that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Proof {
    /// Proof suite used.
    pub kind: String,
    /// Id of the producing identifier.
    pub controller: String,
    /// Operational domain the proof is restricted to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    /// Replay-mitigation nonce.
    pub nonce: String,
    /// Intent of the proof.
    pub purpose: String,
    /// Verification method able to verify the proof.
    pub verification_method: String,
    /// Optional challenge value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    /// Unix timestamp of proof creation.
    pub created: i64,
    /// Proof bytes, base64-encoded as defined in RFC 4648.
    pub value: String,
}

impl Proof {
    pub(crate) fn from_source(source: ProofLd, controller: String) -> Self {
        Self {
            kind: source.proof_type.clone(),
            controller,
            domain: source.domain.clone(),
            nonce: source.nonce.clone(),
            purpose: source.purpose.clone(),
            verification_method: source.verification_method.clone(),
            challenge: source.challenge.clone(),
            created: source.created.timestamp(),
            value: source.value_base64(),
        }
    }
}
