//! Integration test: full identity and credential lifecycle through the
//! service handler — bootstrap an admin credential, mint and resolve
//! identifiers, produce proofs, issue and validate credentials.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use dlt4eu_service::model::{CredentialRequest, ProofRequest, PublishRequest};
use dlt4eu_service::{Config, Handler, RequestContext, AUTHORIZATION_KEY};

const ISSUER: &str = "dlt4eu-integration";

/// Helper: build a handler with a fresh signing key and an authenticated
/// admin context for it.
fn service() -> (Handler, RequestContext) {
    let config = Config::with_new_key(ISSUER).expect("config");
    let handler = Handler::new(config).expect("handler");
    let token = handler.admin_token("ops").expect("admin token");
    let ctx = RequestContext::new().with_value(AUTHORIZATION_KEY, &token);
    (handler, ctx)
}

/// Helper: decode a token's payload segment without verifying it. Used to
/// inspect claims from the outside, the way any token holder could.
fn payload_claims(token: &str) -> serde_json::Value {
    let payload = token.split('.').nth(1).expect("payload segment");
    let bytes = URL_SAFE_NO_PAD.decode(payload).expect("base64url payload");
    serde_json::from_slice(&bytes).expect("JSON claims")
}

// =========================================================================
// Identifier lifecycle
// =========================================================================

#[test]
fn test_create_and_resolve_identifier() {
    let (handler, ctx) = service();
    let resolver = handler.resolver();

    let identifier = resolver.new_identifier(&ctx).expect("create");
    assert!(identifier.id().starts_with("did:dlt4eu:"));
    assert_eq!(identifier.keys().len(), 1);

    let resolved = resolver.resolve(&ctx, identifier.id()).expect("resolve");
    assert_eq!(resolved.id(), identifier.id());
    assert_eq!(resolved.created(), identifier.created());
}

#[test]
fn test_two_creates_are_independently_resolvable() {
    let (handler, ctx) = service();
    let resolver = handler.resolver();

    let a = resolver.new_identifier(&ctx).expect("create a");
    let b = resolver.new_identifier(&ctx).expect("create b");

    assert_ne!(a.id(), b.id());
    assert_eq!(resolver.resolve(&ctx, a.id()).expect("a").id(), a.id());
    assert_eq!(resolver.resolve(&ctx, b.id()).expect("b").id(), b.id());
}

#[test]
fn test_publish_external_document() {
    let (handler, ctx) = service();
    let resolver = handler.resolver();

    // An identifier created outside the service, exported as a document.
    let mut external = dlt4eu_did::Identifier::new(dlt4eu_did::DEFAULT_METHOD);
    external.add_new_key("master").expect("master key");
    external
        .enable_authentication("master")
        .expect("authentication method");
    let document = serde_json::to_string(&external.document(false)).expect("document JSON");

    let published = resolver
        .publish_identifier(&ctx, &PublishRequest { document })
        .expect("publish");
    assert_eq!(published.id(), external.did());

    let resolved = resolver.resolve(&ctx, external.did()).expect("resolve");
    assert_eq!(resolved.keys().len(), external.keys().len());
}

#[test]
fn test_publish_malformed_document_fails() {
    let (handler, ctx) = service();
    let resolver = handler.resolver();

    let result = resolver.publish_identifier(
        &ctx,
        &PublishRequest {
            document: "{not json}".to_string(),
        },
    );
    assert!(matches!(
        result,
        Err(dlt4eu_service::ServiceError::InvalidInput(_))
    ));
}

// =========================================================================
// Proof production
// =========================================================================

#[test]
fn test_proof_flow() {
    let (handler, ctx) = service();
    let resolver = handler.resolver();
    let identifier = resolver.new_identifier(&ctx).expect("create");

    let proof = resolver
        .new_proof(
            &ctx,
            &ProofRequest {
                id: identifier.id().to_string(),
                data: "contents to sign".to_string(),
                purpose: "authentication".to_string(),
                domain: "integration.test".to_string(),
            },
        )
        .expect("proof");

    assert_eq!(proof.controller, identifier.id());
    assert_eq!(proof.purpose, "authentication");
    assert_eq!(proof.domain, "integration.test");
    assert_eq!(
        proof.verification_method,
        format!("{}#master", identifier.id())
    );
    assert!(!proof.value.is_empty());
}

#[test]
fn test_proof_unknown_identifier_fails_before_engine() {
    let (handler, ctx) = service();
    let result = handler.resolver().new_proof(
        &ctx,
        &ProofRequest {
            id: "did:dlt4eu:unknown".to_string(),
            data: "data".to_string(),
            purpose: "authentication".to_string(),
            domain: String::new(),
        },
    );
    assert!(matches!(
        result,
        Err(dlt4eu_service::ServiceError::NotFound(_))
    ));
}

// =========================================================================
// Credential lifecycle
// =========================================================================

#[test]
fn test_issue_validate_and_inspect_credential() {
    let (handler, ctx) = service();
    let resolver = handler.resolver();

    let credential = resolver
        .new_credential(
            &ctx,
            &CredentialRequest {
                subject: "bob".to_string(),
                audience: vec![ISSUER.to_string()],
                expiration: Some("24h".to_string()),
                not_before: None,
                payload: Some(r#"{"dept": "eng"}"#.to_string()),
            },
        )
        .expect("issue");

    assert!(resolver
        .is_credential_valid(&ctx, &credential.token)
        .expect("validate"));

    let claims = payload_claims(&credential.token);
    assert_eq!(claims["iss"], ISSUER);
    assert_eq!(claims["sub"], "bob");
    assert_eq!(claims["aud"][0], ISSUER);
    assert_eq!(claims["dept"], "eng");
    assert!(claims["jti"].is_string());
}

#[test]
fn test_admin_token_shape() {
    let (handler, _ctx) = service();
    let token = handler.admin_token("alice").expect("admin token");

    let claims = payload_claims(&token);
    assert_eq!(claims["sub"], "alice");
    assert_eq!(claims["role"], "admin");
    assert_eq!(claims["aud"][0], ISSUER);

    let expected = chrono::Utc::now().timestamp() + 720 * 3600;
    let exp = claims["exp"].as_i64().expect("exp claim");
    assert!((exp - expected).abs() < 120, "exp {} vs {}", exp, expected);
}

#[test]
fn test_admin_token_is_itself_a_valid_credential() {
    let (handler, ctx) = service();
    let token = handler.admin_token("alice").expect("admin token");
    assert!(handler
        .resolver()
        .is_credential_valid(&ctx, &token)
        .expect("validate"));
}

#[test]
fn test_malformed_payload_issues_nothing() {
    let (handler, ctx) = service();
    let result = handler.resolver().new_credential(
        &ctx,
        &CredentialRequest {
            subject: "bob".to_string(),
            audience: Vec::new(),
            expiration: None,
            not_before: None,
            payload: Some("{dept: eng".to_string()),
        },
    );
    assert!(matches!(
        result,
        Err(dlt4eu_service::ServiceError::InvalidInput(_))
    ));
}
