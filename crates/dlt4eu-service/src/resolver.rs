use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dlt4eu_did::Document;
use dlt4eu_token::{Expect, TokenGenerator, TokenParameters};

use crate::context::{RequestContext, AUTHORIZATION_KEY};
use crate::error::ServiceError;
use crate::model::{Credential, CredentialRequest, Identifier, Proof, ProofRequest, PublishRequest};
use crate::registry::IdentifierRegistry;
use crate::{CREDENTIAL_CONTENT_TYPE, CREDENTIAL_METHOD, MASTER_KEY};

/// Role claim carried by API access credentials.
///
/// Closed enumeration: any role string the service does not know collapses
/// into `Unknown` and is rejected at the authorization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Unknown,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "admin" => Role::Admin,
            _ => Role::Unknown,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AccessClaims {
    #[serde(default)]
    role: Option<Role>,
}

/// The service's single entry point.
///
/// Every operation is an independent transaction: authenticate, then
/// exactly one registry or engine interaction. Failure in any step aborts
/// the whole operation.
pub struct Resolver {
    tokens: Arc<TokenGenerator>,
    registry: IdentifierRegistry,
}

impl Resolver {
    /// Create a resolver with an empty identifier registry.
    pub fn new(tokens: Arc<TokenGenerator>) -> Self {
        Self {
            tokens,
            registry: IdentifierRegistry::new(),
        }
    }

    /// The identifier registry.
    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    /// Authentication gate applied to every operation.
    ///
    /// A missing credential is `Unauthenticated`; a structurally valid
    /// credential without the administrator role is `Forbidden`; a
    /// credential the token engine rejects surfaces the engine's own error.
    fn authenticate(&self, ctx: &RequestContext) -> Result<(), ServiceError> {
        let credential = ctx
            .get(AUTHORIZATION_KEY)
            .first()
            .ok_or(ServiceError::Unauthenticated)?;
        let claims: AccessClaims = self.tokens.decode(credential)?;
        match claims.role {
            Some(Role::Admin) => Ok(()),
            Some(Role::Unknown) | None => Err(ServiceError::Forbidden),
        }
    }

    /// Mint a new identifier and register it.
    pub fn new_identifier(&self, ctx: &RequestContext) -> Result<Arc<Identifier>, ServiceError> {
        self.authenticate(ctx)?;
        let identifier = Arc::new(Identifier::new()?);
        self.registry.add(Arc::clone(&identifier));
        tracing::info!(did = %identifier.id(), "identifier created");
        Ok(identifier)
    }

    /// Load an externally created identifier document and register it,
    /// overwriting any previous record with the same id.
    pub fn publish_identifier(
        &self,
        ctx: &RequestContext,
        req: &PublishRequest,
    ) -> Result<Arc<Identifier>, ServiceError> {
        self.authenticate(ctx)?;
        let doc: Document = serde_json::from_str(&req.document)
            .map_err(|e| ServiceError::InvalidInput(format!("malformed DID document: {}", e)))?;
        let identifier = Identifier::from_document(&doc)
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        let identifier = Arc::new(identifier);
        self.registry.add(Arc::clone(&identifier));
        tracing::info!(did = %identifier.id(), "identifier published");
        Ok(identifier)
    }

    /// Produce a linked-data proof with a registered identifier's master
    /// key. A single engine failure is surfaced directly; no retries.
    pub fn new_proof(
        &self,
        ctx: &RequestContext,
        req: &ProofRequest,
    ) -> Result<Proof, ServiceError> {
        self.authenticate(ctx)?;
        let identifier = self
            .registry
            .get(&req.id)
            .ok_or_else(|| ServiceError::NotFound(req.id.clone()))?;
        let proof = identifier.produce_proof(req.data.as_bytes(), &req.purpose, &req.domain)?;
        tracing::info!(did = %identifier.id(), purpose = %req.purpose, "proof produced");
        Ok(proof)
    }

    /// Issue a verifiable credential signed with the service master key.
    ///
    /// A non-blank claims payload that is not a JSON object is rejected as
    /// invalid input; no credential is issued.
    pub fn new_credential(
        &self,
        ctx: &RequestContext,
        req: &CredentialRequest,
    ) -> Result<Credential, ServiceError> {
        self.authenticate(ctx)?;
        let mut params = TokenParameters {
            subject: req.subject.clone(),
            audience: req.audience.clone(),
            content_type: Some(CREDENTIAL_CONTENT_TYPE.to_string()),
            expiration: req.expiration.clone(),
            not_before: req.not_before.clone(),
            unique_identifier: Some(Uuid::now_v7().to_string()),
            method: CREDENTIAL_METHOD,
            custom_claims: None,
        };
        if let Some(payload) = req.payload.as_deref() {
            if !payload.trim().is_empty() {
                let claims: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_str(payload).map_err(|e| {
                        ServiceError::InvalidInput(format!("malformed claims payload: {}", e))
                    })?;
                params.custom_claims = Some(claims);
            }
        }
        let token = self.tokens.new_token(MASTER_KEY, &params)?;
        tracing::info!(subject = %req.subject, "credential issued");
        Ok(Credential { token })
    }

    /// Resolve a registered identifier by id.
    pub fn resolve(&self, ctx: &RequestContext, id: &str) -> Result<Arc<Identifier>, ServiceError> {
        self.authenticate(ctx)?;
        self.registry
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Re-validate a credential against the content-type and signing-method
    /// expectations used at issuance. Only a fully valid token returns
    /// `true`; any failure is an error, never `false`.
    pub fn is_credential_valid(
        &self,
        ctx: &RequestContext,
        token: &str,
    ) -> Result<bool, ServiceError> {
        self.authenticate(ctx)?;
        let expect = Expect {
            content_type: Some(CREDENTIAL_CONTENT_TYPE.to_string()),
            method: Some(CREDENTIAL_METHOD),
        };
        self.tokens.validate(token, &expect)?;
        Ok(true)
    }
}
