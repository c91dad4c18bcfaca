use serde::Serialize;

use dlt4eu_did::{self as did, DidError, Document};

use crate::model::proof::Proof;
use crate::MASTER_KEY;

/// Public key descriptor exposed on identifier records.
#[derive(Debug, Clone, Serialize)]
pub struct PublicKeyInfo {
    /// Key identifier ("<did>#<name>").
    pub id: String,
    /// Verification key type.
    pub kind: String,
    /// Controlling DID.
    pub controller: String,
    /// Base64-encoded public key value.
    pub value: String,
}

/// A decentralized identity record.
///
/// Immutable once constructed; there is no update or revoke operation.
#[derive(Clone)]
pub struct Identifier {
    source: did::Identifier,
    created: i64,
    updated: i64,
}

impl Identifier {
    /// Mint a fresh identifier with a single "master" key enabled for
    /// authentication.
    pub fn new() -> Result<Self, DidError> {
        let mut source = did::Identifier::new(did::DEFAULT_METHOD);
        source.add_new_key(MASTER_KEY)?;
        source.enable_authentication(MASTER_KEY)?;
        Ok(Self::from_source(source))
    }

    /// Prepare an identifier record from an externally supplied DID
    /// document.
    pub fn from_document(doc: &Document) -> Result<Self, DidError> {
        let source = did::Identifier::from_document(doc)?;
        Ok(Self::from_source(source))
    }

    fn from_source(source: did::Identifier) -> Self {
        let created = source.created().timestamp();
        let updated = source.updated().timestamp();
        Self {
            source,
            created,
            updated,
        }
    }

    /// Textual representation of the DID.
    pub fn id(&self) -> &str {
        self.source.did()
    }

    /// Unix timestamp of the identifier's original creation.
    pub fn created(&self) -> i64 {
        self.created
    }

    /// Unix timestamp of the record's last load.
    pub fn updated(&self) -> i64 {
        self.updated
    }

    /// Public key descriptors registered on the identifier.
    pub fn keys(&self) -> Vec<PublicKeyInfo> {
        self.source
            .keys()
            .iter()
            .map(|k| PublicKeyInfo {
                id: k.id().to_string(),
                kind: k.kind().to_string(),
                controller: k.controller().to_string(),
                value: k.value_base64(),
            })
            .collect()
    }

    /// DID document for the record. Private key material is stripped,
    /// making the document safe to publish and share.
    pub fn document(&self) -> Document {
        self.source.document(false)
    }

    /// Generate a linked-data proof for the provided data using the
    /// identifier's master key.
    pub fn produce_proof(
        &self,
        data: &[u8],
        purpose: &str,
        domain: &str,
    ) -> Result<Proof, DidError> {
        let key = self
            .source
            .key(MASTER_KEY)
            .ok_or_else(|| DidError::UnknownKey(MASTER_KEY.to_string()))?;
        let source = key.produce_proof(data, purpose, domain)?;
        Ok(Proof::from_source(source, self.id().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_identifier_has_master_key() {
        let identifier = Identifier::new().unwrap();
        assert!(identifier.id().starts_with("did:dlt4eu:"));

        let keys = identifier.keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].id, format!("{}#master", identifier.id()));
        assert_eq!(keys[0].kind, "Ed25519VerificationKey2020");
        assert_eq!(keys[0].controller, identifier.id());
        assert!(!keys[0].value.is_empty());
    }

    #[test]
    fn test_timestamps_set_at_construction() {
        let before = chrono::Utc::now().timestamp();
        let identifier = Identifier::new().unwrap();
        let after = chrono::Utc::now().timestamp();
        assert!(identifier.created() >= before && identifier.created() <= after);
        assert_eq!(identifier.created(), identifier.updated());
    }

    #[test]
    fn test_proof_controller_is_identifier() {
        let identifier = Identifier::new().unwrap();
        let proof = identifier
            .produce_proof(b"data", "authentication", "example.com")
            .unwrap();
        assert_eq!(proof.controller, identifier.id());
        assert!(!proof.value.is_empty());
    }

    #[test]
    fn test_from_document_roundtrip() {
        let identifier = Identifier::new().unwrap();
        let doc = identifier.document();
        let restored = Identifier::from_document(&doc).unwrap();

        assert_eq!(restored.id(), identifier.id());
        assert_eq!(restored.created(), identifier.created());
        assert_eq!(restored.keys().len(), 1);
    }

    #[test]
    fn test_published_document_cannot_sign() {
        let identifier = Identifier::new().unwrap();
        let restored = Identifier::from_document(&identifier.document()).unwrap();
        assert!(matches!(
            restored.produce_proof(b"data", "authentication", ""),
            Err(DidError::MissingPrivateKey(_))
        ));
    }

    #[test]
    fn test_document_has_no_private_material() {
        let identifier = Identifier::new().unwrap();
        let doc = identifier.document();
        assert!(doc
            .verification_method
            .iter()
            .all(|vm| vm.private_key_base64.is_none()));
    }
}
