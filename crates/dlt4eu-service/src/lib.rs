//! dlt4eu Identity/Credential Resolution Service
//!
//! The service core: an authentication gate enforcing the administrator
//! role, an in-memory identifier registry, and the orchestration logic that
//! turns each incoming operation into calls against the identity document
//! engine (`dlt4eu-did`) and the token engine (`dlt4eu-token`).

pub mod api;
pub mod context;
pub mod error;
pub mod handler;
pub mod model;
pub mod registry;
pub mod resolver;

pub use context::{RequestContext, AUTHORIZATION_KEY};
pub use error::ServiceError;
pub use handler::{Config, Handler};
pub use registry::IdentifierRegistry;
pub use resolver::{Resolver, Role};

use dlt4eu_token::Algorithm;

/// Content type tag carried by every credential issued by the service.
pub const CREDENTIAL_CONTENT_TYPE: &str = "dlt4eu.vc/0.1.0";

/// Signing method used for every credential issued by the service.
pub const CREDENTIAL_METHOD: Algorithm = Algorithm::EdDSA;

/// Name of the service signing key and of the master key attached to every
/// minted identifier.
pub const MASTER_KEY: &str = "master";
