use serde::Deserialize;

/// Request to publish an externally created identifier document.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishRequest {
    /// JSON-encoded DID document.
    pub document: String,
}

/// Request to produce a linked-data proof.
#[derive(Debug, Clone, Deserialize)]
pub struct ProofRequest {
    /// Id of the identifier producing the proof.
    pub id: String,
    /// Contents to sign.
    pub data: String,
    /// Proof purpose (e.g., "authentication").
    pub purpose: String,
    /// Operational domain restricting the proof. Optional.
    #[serde(default)]
    pub domain: String,
}

/// Request to issue a verifiable credential.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialRequest {
    /// Subject the claims are about.
    pub subject: String,
    /// Intended audience.
    #[serde(default)]
    pub audience: Vec<String>,
    /// Time until expiration, as a duration string (e.g., "720h").
    #[serde(default)]
    pub expiration: Option<String>,
    /// Time until the credential becomes valid.
    #[serde(default)]
    pub not_before: Option<String>,
    /// Custom claims as a JSON object string. Optional.
    #[serde(default)]
    pub payload: Option<String>,
}
