use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON-LD context for DID documents.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// A verification method within a DID document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// Verification method identifier (e.g., "did:dlt4eu:abc#master").
    pub id: String,
    /// Type of the verification method (e.g., "Ed25519VerificationKey2020").
    #[serde(rename = "type")]
    pub method_type: String,
    /// The DID that controls this verification method.
    pub controller: String,
    /// Base64-encoded public key material.
    #[serde(rename = "publicKeyBase64")]
    pub public_key_base64: String,
    /// Base64-encoded private key seed. Only present on documents exported
    /// with private material; never published.
    #[serde(
        rename = "privateKeyBase64",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub private_key_base64: Option<String>,
}

/// W3C-compatible DID document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// JSON-LD context.
    #[serde(rename = "@context", default = "default_context")]
    pub context: Vec<String>,
    /// The DID subject (e.g., "did:dlt4eu:<uuid>").
    pub id: String,
    /// When the identifier was created.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// When the document was last updated.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    /// Verification methods (public keys) associated with this DID.
    #[serde(rename = "verificationMethod", default)]
    pub verification_method: Vec<VerificationMethod>,
    /// References to verification methods enabled for authentication.
    #[serde(default)]
    pub authentication: Vec<String>,
}

fn default_context() -> Vec<String> {
    vec![DID_CONTEXT.to_string()]
}

impl Document {
    /// Render the document as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
