use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

use crate::document::{Document, VerificationMethod, DID_CONTEXT};
use crate::error::DidError;
use crate::keys::{sign, KeyPair, PublicKey};
use crate::proof::{ProofLd, PROOF_TYPE_ED25519};

/// DID method used by identifiers minted by this service.
pub const DEFAULT_METHOD: &str = "dlt4eu";

/// Verification key type attached to identifier keys.
const KEY_TYPE: &str = "Ed25519VerificationKey2020";

/// A named key attached to an identifier.
///
/// Keys restored from a published document carry public material only and
/// cannot produce proofs.
#[derive(Clone)]
pub struct DidKey {
    id: String,
    name: String,
    controller: String,
    public: PublicKey,
    secret: Option<KeyPair>,
}

impl DidKey {
    /// Verification method identifier ("<did>#<name>").
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Short key name within the identifier (e.g., "master").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The DID controlling this key.
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Verification key type.
    pub fn kind(&self) -> &str {
        KEY_TYPE
    }

    /// Public key material.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Public key encoded as base64.
    pub fn value_base64(&self) -> String {
        self.public.to_base64()
    }

    /// Whether private material is available for signing.
    pub fn has_private(&self) -> bool {
        self.secret.is_some()
    }

    /// Produce a detached linked-data proof over `data`.
    pub fn produce_proof(
        &self,
        data: &[u8],
        purpose: &str,
        domain: &str,
    ) -> Result<ProofLd, DidError> {
        let keypair = self
            .secret
            .as_ref()
            .ok_or_else(|| DidError::MissingPrivateKey(self.id.clone()))?;

        let mut nonce = [0u8; 32];
        OsRng.fill_bytes(&mut nonce);

        let mut proof = ProofLd {
            proof_type: PROOF_TYPE_ED25519.to_string(),
            created: Utc::now(),
            domain: domain.to_string(),
            nonce: hex::encode(nonce),
            purpose: purpose.to_string(),
            verification_method: self.id.clone(),
            challenge: None,
            value: Vec::new(),
        };
        let signature = sign(&proof.signing_input(data), keypair);
        proof.value = signature.to_bytes().to_vec();
        Ok(proof)
    }
}

/// A decentralized identifier with its associated key material.
#[derive(Clone)]
pub struct Identifier {
    did: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    keys: Vec<DidKey>,
    authentication: Vec<String>,
}

impl Identifier {
    /// Mint a fresh identifier of the form `did:<method>:<uuid>`.
    pub fn new(method: &str) -> Self {
        let now = Utc::now();
        Self {
            did: format!("did:{}:{}", method, Uuid::now_v7()),
            created: now,
            updated: now,
            keys: Vec::new(),
            authentication: Vec::new(),
        }
    }

    /// Textual representation of the DID.
    pub fn did(&self) -> &str {
        &self.did
    }

    /// Fully qualified reference to a named key ("<did>#<name>").
    pub fn reference(&self, name: &str) -> String {
        format!("{}#{}", self.did, name)
    }

    /// When the identifier was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// When the identifier was last loaded or updated.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Generate and attach a new Ed25519 key under `name`.
    pub fn add_new_key(&mut self, name: &str) -> Result<(), DidError> {
        if self.key(name).is_some() {
            return Err(DidError::DuplicateKey(name.to_string()));
        }
        let keypair = KeyPair::generate();
        self.keys.push(DidKey {
            id: self.reference(name),
            name: name.to_string(),
            controller: self.did.clone(),
            public: keypair.public_key(),
            secret: Some(keypair),
        });
        tracing::debug!(did = %self.did, key = name, "key attached");
        Ok(())
    }

    /// Record a named key as an authentication method.
    pub fn enable_authentication(&mut self, name: &str) -> Result<(), DidError> {
        if self.key(name).is_none() {
            return Err(DidError::UnknownKey(name.to_string()));
        }
        let reference = self.reference(name);
        if !self.authentication.contains(&reference) {
            self.authentication.push(reference);
        }
        Ok(())
    }

    /// Look up a key by name.
    pub fn key(&self, name: &str) -> Option<&DidKey> {
        self.keys.iter().find(|k| k.name == name)
    }

    /// All keys attached to the identifier.
    pub fn keys(&self) -> &[DidKey] {
        &self.keys
    }

    /// Verification method references enabled for authentication.
    pub fn authentication(&self) -> &[String] {
        &self.authentication
    }

    /// Render the DID document.
    ///
    /// Private key material is stripped unless `include_private` is set;
    /// only the stripped form is safe to publish.
    pub fn document(&self, include_private: bool) -> Document {
        let verification_method = self
            .keys
            .iter()
            .map(|k| VerificationMethod {
                id: k.id.clone(),
                method_type: KEY_TYPE.to_string(),
                controller: k.controller.clone(),
                public_key_base64: k.value_base64(),
                private_key_base64: if include_private {
                    k.secret.as_ref().map(|kp| BASE64.encode(kp.secret_bytes()))
                } else {
                    None
                },
            })
            .collect();

        Document {
            context: vec![DID_CONTEXT.to_string()],
            id: self.did.clone(),
            created: Some(self.created),
            updated: Some(self.updated),
            verification_method,
            authentication: self.authentication.clone(),
        }
    }

    /// Restore an identifier from an externally supplied DID document.
    ///
    /// The document must carry a well-formed DID and at least one
    /// verification method with decodable key material. Signing capability
    /// is restored only for methods that include private material.
    pub fn from_document(doc: &Document) -> Result<Self, DidError> {
        let parts: Vec<&str> = doc.id.split(':').collect();
        if parts.len() < 3 || parts[0] != "did" || parts[1].is_empty() || parts[2].is_empty() {
            return Err(DidError::InvalidDocument(format!(
                "malformed DID: {}",
                doc.id
            )));
        }
        if doc.verification_method.is_empty() {
            return Err(DidError::InvalidDocument(
                "no verification methods".to_string(),
            ));
        }

        let mut keys = Vec::with_capacity(doc.verification_method.len());
        for vm in &doc.verification_method {
            let name = vm
                .id
                .rsplit_once('#')
                .map(|(_, fragment)| fragment)
                .filter(|fragment| !fragment.is_empty())
                .ok_or_else(|| {
                    DidError::InvalidDocument(format!("key reference without fragment: {}", vm.id))
                })?;
            let public = PublicKey::from_base64(&vm.public_key_base64)
                .map_err(|e| DidError::InvalidDocument(format!("key {}: {}", vm.id, e)))?;

            let secret = match &vm.private_key_base64 {
                Some(encoded) => {
                    let seed = BASE64.decode(encoded).map_err(|e| {
                        DidError::InvalidDocument(format!("key {}: invalid base64: {}", vm.id, e))
                    })?;
                    let keypair = KeyPair::from_bytes(&seed)
                        .map_err(|e| DidError::InvalidDocument(format!("key {}: {}", vm.id, e)))?;
                    if keypair.public_key() != public {
                        return Err(DidError::InvalidDocument(format!(
                            "key {}: private material does not match public key",
                            vm.id
                        )));
                    }
                    Some(keypair)
                }
                None => None,
            };

            keys.push(DidKey {
                id: vm.id.clone(),
                name: name.to_string(),
                controller: vm.controller.clone(),
                public,
                secret,
            });
        }

        let now = Utc::now();
        Ok(Self {
            did: doc.id.clone(),
            created: doc.created.unwrap_or(now),
            updated: now,
            keys,
            authentication: doc.authentication.clone(),
        })
    }
}
