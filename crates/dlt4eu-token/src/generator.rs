use std::collections::HashMap;

use chrono::Utc;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::de::DeserializeOwned;

use dlt4eu_did::KeyPair;

use crate::claims::Claims;
use crate::error::TokenError;
use crate::params::{parse_duration, TokenParameters};

/// Structural expectations asserted during token validation, mirroring the
/// ones applied at issuance.
#[derive(Debug, Clone, Default)]
pub struct Expect {
    /// Required `cty` header value.
    pub content_type: Option<String>,
    /// Required signing method.
    pub method: Option<Algorithm>,
}

struct TokenKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
}

/// Issues and validates tokens signed with named Ed25519 keys.
pub struct TokenGenerator {
    issuer: String,
    keys: HashMap<String, TokenKey>,
}

impl TokenGenerator {
    /// Create a generator with no keys for the given issuer.
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            keys: HashMap::new(),
        }
    }

    /// Issuer recorded in every token.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Register a named signing key.
    pub fn add_key(&mut self, name: &str, keypair: &KeyPair) -> Result<(), TokenError> {
        if self.keys.contains_key(name) {
            return Err(TokenError::DuplicateKey(name.to_string()));
        }
        let der = keypair
            .to_pkcs8_der()
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;
        self.keys.insert(
            name.to_string(),
            TokenKey {
                encoding: EncodingKey::from_ed_der(&der),
                decoding: DecodingKey::from_ed_der(keypair.public_key().as_bytes()),
                algorithm: Algorithm::EdDSA,
            },
        );
        Ok(())
    }

    /// Issue a new signed token with the named key.
    pub fn new_token(&self, key_name: &str, params: &TokenParameters) -> Result<String, TokenError> {
        let key = self
            .keys
            .get(key_name)
            .ok_or_else(|| TokenError::UnknownKey(key_name.to_string()))?;
        if params.method != key.algorithm {
            return Err(TokenError::MethodMismatch(params.method));
        }

        let now = Utc::now();
        let exp = params
            .expiration
            .as_deref()
            .map(parse_duration)
            .transpose()?
            .map(|d| (now + d).timestamp());
        let nbf = params
            .not_before
            .as_deref()
            .map(parse_duration)
            .transpose()?
            .map(|d| (now + d).timestamp());

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: Some(params.subject.clone()).filter(|s| !s.is_empty()),
            aud: params.audience.clone(),
            exp,
            nbf,
            iat: now.timestamp(),
            jti: params.unique_identifier.clone(),
            custom: params.custom_claims.clone().unwrap_or_default(),
        };

        let mut header = Header::new(key.algorithm);
        header.kid = Some(key_name.to_string());
        header.cty = params.content_type.clone();

        let token = encode(&header, &claims, &key.encoding)?;
        tracing::debug!(key = key_name, jti = ?claims.jti, "token issued");
        Ok(token)
    }

    /// Validate a token's signature and registered claims, additionally
    /// asserting the given structural expectations.
    pub fn validate(&self, token: &str, expect: &Expect) -> Result<(), TokenError> {
        let header = decode_header(token)?;
        if let Some(method) = expect.method {
            if header.alg != method {
                return Err(TokenError::MethodMismatch(header.alg));
            }
        }
        if let Some(content_type) = expect.content_type.as_deref() {
            if header.cty.as_deref() != Some(content_type) {
                return Err(TokenError::ContentTypeMismatch(header.cty));
            }
        }
        self.verify::<Claims>(token, &header)?;
        Ok(())
    }

    /// Validate a token and deserialize its claim set.
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let header = decode_header(token)?;
        self.verify(token, &header)
    }

    fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
        header: &Header,
    ) -> Result<T, TokenError> {
        let kid = header.kid.as_deref().ok_or(TokenError::MissingKeyId)?;
        let key = self
            .keys
            .get(kid)
            .ok_or_else(|| TokenError::UnknownKey(kid.to_string()))?;
        if header.alg != key.algorithm {
            return Err(TokenError::MethodMismatch(header.alg));
        }

        let mut validation = Validation::new(key.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.required_spec_claims = ["iss".to_string()].into_iter().collect();
        validation.validate_aud = false;
        validation.validate_nbf = true;

        let data = decode::<T>(token, &key.decoding, &validation)?;
        Ok(data.claims)
    }
}
