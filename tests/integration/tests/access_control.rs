//! Integration test: the authentication gate guards every operation, and
//! the registry survives concurrent use.

use dlt4eu_service::model::{CredentialRequest, ProofRequest, PublishRequest};
use dlt4eu_service::{Config, Handler, RequestContext, ServiceError, AUTHORIZATION_KEY};

const ISSUER: &str = "dlt4eu-integration";

fn service() -> (Handler, RequestContext) {
    let config = Config::with_new_key(ISSUER).expect("config");
    let handler = Handler::new(config).expect("handler");
    let token = handler.admin_token("ops").expect("admin token");
    let ctx = RequestContext::new().with_value(AUTHORIZATION_KEY, &token);
    (handler, ctx)
}

/// Run every operation with the given context and hand each result to the
/// assertion.
fn assert_all_operations(handler: &Handler, ctx: &RequestContext, check: impl Fn(ServiceError)) {
    let resolver = handler.resolver();

    check(resolver.new_identifier(ctx).map(|_| ()).unwrap_err());
    check(
        resolver
            .publish_identifier(
                ctx,
                &PublishRequest {
                    document: "{}".to_string(),
                },
            )
            .map(|_| ())
            .unwrap_err(),
    );
    check(
        resolver
            .new_proof(
                ctx,
                &ProofRequest {
                    id: "did:dlt4eu:any".to_string(),
                    data: "data".to_string(),
                    purpose: "authentication".to_string(),
                    domain: String::new(),
                },
            )
            .map(|_| ())
            .unwrap_err(),
    );
    check(
        resolver
            .new_credential(
                ctx,
                &CredentialRequest {
                    subject: "bob".to_string(),
                    audience: Vec::new(),
                    expiration: None,
                    not_before: None,
                    payload: None,
                },
            )
            .map(|_| ())
            .unwrap_err(),
    );
    check(
        resolver
            .resolve(ctx, "did:dlt4eu:any")
            .map(|_| ())
            .unwrap_err(),
    );
    check(
        resolver
            .is_credential_valid(ctx, "token")
            .map(|_| ())
            .unwrap_err(),
    );
}

#[test]
fn test_every_operation_requires_a_credential() {
    let (handler, _admin) = service();
    let anonymous = RequestContext::new();
    assert_all_operations(&handler, &anonymous, |err| {
        assert!(matches!(err, ServiceError::Unauthenticated), "{:?}", err)
    });
}

#[test]
fn test_every_operation_rejects_non_admin_roles() {
    let (handler, admin) = service();

    // A credential legitimately issued by the service, but with a non-admin
    // role claim, must not administer the service.
    let user_credential = handler
        .resolver()
        .new_credential(
            &admin,
            &CredentialRequest {
                subject: "user-1".to_string(),
                audience: vec![ISSUER.to_string()],
                expiration: Some("1h".to_string()),
                not_before: None,
                payload: Some(r#"{"role": "user"}"#.to_string()),
            },
        )
        .expect("issue user credential");

    let user_ctx = RequestContext::new().with_value(AUTHORIZATION_KEY, &user_credential.token);
    assert_all_operations(&handler, &user_ctx, |err| {
        assert!(matches!(err, ServiceError::Forbidden), "{:?}", err)
    });
}

#[test]
fn test_tampered_admin_token_is_rejected() {
    let (handler, _admin) = service();
    let token = handler.admin_token("ops").expect("admin token");

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let sig = parts.last_mut().unwrap();
    let replacement = if sig.ends_with('A') { 'B' } else { 'A' };
    sig.pop();
    sig.push(replacement);
    let ctx = RequestContext::new().with_value(AUTHORIZATION_KEY, &parts.join("."));

    assert!(matches!(
        handler.resolver().new_identifier(&ctx),
        Err(ServiceError::Token(_))
    ));
}

#[test]
fn test_token_from_another_deployment_is_rejected() {
    let (ours, _admin) = service();
    let (theirs, _) = service();

    let foreign = theirs.admin_token("mallory").expect("foreign token");
    let ctx = RequestContext::new().with_value(AUTHORIZATION_KEY, &foreign);
    assert!(matches!(
        ours.resolver().new_identifier(&ctx),
        Err(ServiceError::Token(_))
    ));
}

#[test]
fn test_concurrent_identifier_creation_loses_nothing() {
    let (handler, ctx) = service();
    let resolver = handler.resolver();
    let workers = 12;

    let ids: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let resolver = &resolver;
                let ctx = ctx.clone();
                scope.spawn(move || {
                    resolver
                        .new_identifier(&ctx)
                        .expect("create")
                        .id()
                        .to_string()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(ids.len(), workers);
    assert_eq!(resolver.registry().len(), workers);
    for id in &ids {
        assert_eq!(resolver.resolve(&ctx, id).expect("resolve").id(), id);
    }
}
