//! Introspection client interface used by the forward-auth pipeline.
use async_trait::async_trait;
use thiserror::Error;

use super::types::IntrospectionResult;

/// Introspection-layer errors.
///
/// Note:
/// - Callers treat every variant the same way (deny, or omit identity).
///   The variant only changes the diagnostic text.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("introspection request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("introspect failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid introspection response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("token cannot be sent as a header: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

/// Asks the identity provider whether a bearer token is currently valid.
///
/// Implementations are shared across requests behind an `Arc`.
#[async_trait]
pub trait TokenIntrospector: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // `token` is the raw bytes after `Bearer ` (not necessarily UTF-8).
    async fn introspect(&self, token: &[u8]) -> Result<IntrospectionResult, IntrospectionError>;
}
