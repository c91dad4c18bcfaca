//! HTTP surface for the service.
//!
//! Thin transport layer: each handler copies the request headers into a
//! [`RequestContext`] and delegates to the resolver. Authorization and all
//! operation semantics live behind the resolver, not here.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::model::{CredentialRequest, Identifier, ProofRequest, PublicKeyInfo, PublishRequest};
use crate::resolver::Resolver;

// --- Response types ---

#[derive(Serialize)]
pub struct IdentifierResponse {
    pub id: String,
    pub created: i64,
    pub updated: i64,
    pub keys: Vec<PublicKeyInfo>,
    pub document: serde_json::Value,
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&Identifier> for IdentifierResponse {
    fn from(identifier: &Identifier) -> Self {
        Self {
            id: identifier.id().to_string(),
            created: identifier.created(),
            updated: identifier.updated(),
            keys: identifier.keys(),
            document: serde_json::to_value(identifier.document()).unwrap_or_default(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: ServiceError) -> ApiError {
    let status = match &err {
        ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden => StatusCode::FORBIDDEN,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::Identity(_) | ServiceError::Token(_) => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Copy request headers into the transport-agnostic request context,
/// stripping an optional "Bearer " prefix from the authorization value.
fn request_context(headers: &HeaderMap) -> RequestContext {
    let mut ctx = RequestContext::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            let value = if *name == header::AUTHORIZATION {
                value.strip_prefix("Bearer ").unwrap_or(value)
            } else {
                value
            };
            ctx.insert(name.as_str(), value);
        }
    }
    ctx
}

// --- Handlers ---

async fn handle_ping() -> &'static str {
    "ok"
}

async fn handle_new_identifier(
    State(resolver): State<Arc<Resolver>>,
    headers: HeaderMap,
) -> Result<Json<IdentifierResponse>, ApiError> {
    let ctx = request_context(&headers);
    let identifier = resolver.new_identifier(&ctx).map_err(error_response)?;
    Ok(Json(IdentifierResponse::from(identifier.as_ref())))
}

async fn handle_publish_identifier(
    State(resolver): State<Arc<Resolver>>,
    headers: HeaderMap,
    Json(req): Json<PublishRequest>,
) -> Result<Json<IdentifierResponse>, ApiError> {
    let ctx = request_context(&headers);
    let identifier = resolver
        .publish_identifier(&ctx, &req)
        .map_err(error_response)?;
    Ok(Json(IdentifierResponse::from(identifier.as_ref())))
}

async fn handle_resolve(
    State(resolver): State<Arc<Resolver>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<IdentifierResponse>, ApiError> {
    let ctx = request_context(&headers);
    let identifier = resolver.resolve(&ctx, &id).map_err(error_response)?;
    Ok(Json(IdentifierResponse::from(identifier.as_ref())))
}

async fn handle_new_proof(
    State(resolver): State<Arc<Resolver>>,
    headers: HeaderMap,
    Json(req): Json<ProofRequest>,
) -> Result<Json<crate::model::Proof>, ApiError> {
    let ctx = request_context(&headers);
    let proof = resolver.new_proof(&ctx, &req).map_err(error_response)?;
    Ok(Json(proof))
}

async fn handle_new_credential(
    State(resolver): State<Arc<Resolver>>,
    headers: HeaderMap,
    Json(req): Json<CredentialRequest>,
) -> Result<Json<crate::model::Credential>, ApiError> {
    let ctx = request_context(&headers);
    let credential = resolver.new_credential(&ctx, &req).map_err(error_response)?;
    Ok(Json(credential))
}

async fn handle_validate_credential(
    State(resolver): State<Arc<Resolver>>,
    headers: HeaderMap,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let ctx = request_context(&headers);
    let valid = resolver
        .is_credential_valid(&ctx, &req.token)
        .map_err(error_response)?;
    Ok(Json(ValidateResponse { valid }))
}

// --- Server ---

pub fn build_router(resolver: Arc<Resolver>) -> Router {
    Router::new()
        .route("/ping", get(handle_ping))
        .route("/v1/identifiers", post(handle_new_identifier))
        .route("/v1/identifiers/publish", post(handle_publish_identifier))
        .route("/v1/identifiers/{id}", get(handle_resolve))
        .route("/v1/proofs", post(handle_new_proof))
        .route("/v1/credentials", post(handle_new_credential))
        .route("/v1/credentials/validate", post(handle_validate_credential))
        .with_state(resolver)
}

pub async fn start_server(listen_addr: SocketAddr, resolver: Arc<Resolver>) -> std::io::Result<()> {
    let app = build_router(resolver);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app).await
}
