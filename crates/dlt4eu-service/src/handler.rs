use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dlt4eu_did::KeyPair;
use dlt4eu_token::{TokenGenerator, TokenParameters};

use crate::error::ServiceError;
use crate::resolver::{Resolver, Role};
use crate::{CREDENTIAL_CONTENT_TYPE, CREDENTIAL_METHOD, MASTER_KEY};

/// Lifetime of administrator credentials issued out-of-band.
const ADMIN_TOKEN_LIFETIME: &str = "720h";

/// Settings for a service handler instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Issuer identity recorded in every credential.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Service signing key: base64url-encoded PKCS#8 PEM.
    #[serde(default)]
    pub key: String,
}

fn default_issuer() -> String {
    "dlt4eu".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            key: String::new(),
        }
    }
}

impl Config {
    /// Build a config with a freshly generated service signing key.
    pub fn with_new_key(issuer: impl Into<String>) -> Result<Self, ServiceError> {
        let keypair = KeyPair::generate();
        let pem = keypair.to_pkcs8_pem()?;
        Ok(Self {
            issuer: issuer.into(),
            key: URL_SAFE_NO_PAD.encode(pem.as_bytes()),
        })
    }

    /// Decode the configured service signing key.
    fn signing_key(&self) -> Result<KeyPair, ServiceError> {
        let pem = URL_SAFE_NO_PAD.decode(&self.key).map_err(|e| {
            ServiceError::InvalidInput(format!("invalid service key encoding: {}", e))
        })?;
        let pem = String::from_utf8(pem)
            .map_err(|e| ServiceError::InvalidInput(format!("invalid service key: {}", e)))?;
        Ok(KeyPair::from_pkcs8_pem(&pem)?)
    }
}

/// The main service operator: owns the token generator and the resolver.
pub struct Handler {
    config: Config,
    tokens: Arc<TokenGenerator>,
    resolver: Arc<Resolver>,
}

impl Handler {
    /// Build a handler instance from its settings.
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        let keypair = config.signing_key()?;
        let mut tokens = TokenGenerator::new(config.issuer.clone());
        tokens.add_key(MASTER_KEY, &keypair)?;
        let tokens = Arc::new(tokens);
        let resolver = Arc::new(Resolver::new(Arc::clone(&tokens)));
        Ok(Self {
            config,
            tokens,
            resolver,
        })
    }

    /// Settings the handler was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The operations entry point.
    pub fn resolver(&self) -> Arc<Resolver> {
        Arc::clone(&self.resolver)
    }

    /// Generate the credentials required to access the API as an
    /// administrator.
    ///
    /// This is the bootstrap path: it is reachable only through the
    /// administrative command, never through the authenticated API.
    pub fn admin_token(&self, subject: &str) -> Result<String, ServiceError> {
        let mut custom = serde_json::Map::new();
        custom.insert("role".to_string(), serde_json::json!(Role::Admin));
        let params = TokenParameters {
            subject: subject.to_string(),
            audience: vec![self.config.issuer.clone()],
            content_type: Some(CREDENTIAL_CONTENT_TYPE.to_string()),
            expiration: Some(ADMIN_TOKEN_LIFETIME.to_string()),
            unique_identifier: Some(Uuid::now_v7().to_string()),
            method: CREDENTIAL_METHOD,
            custom_claims: Some(custom),
            ..TokenParameters::default()
        };
        let token = self.tokens.new_token(MASTER_KEY, &params)?;
        tracing::info!(subject = subject, "administrator credential issued");
        Ok(token)
    }

    /// Shut down the instance and free resources.
    pub fn shutdown(&self) {
        tracing::info!("service handler shut down");
    }
}
