/*
 * Responsibility
 * - enforce/enrich で共有する認証パイプライン
 *   (Bearer 抽出 → introspection → active チェック → Identity 生成)
 * - HTTP ステータスへの変換は handler 側の責務
 */
use axum::http::{
    HeaderMap, HeaderValue,
    header::{self, InvalidHeaderValue},
};
use thiserror::Error;

use crate::services::introspection::{IntrospectionError, IntrospectionResult, TokenIntrospector};

const BEARER_PREFIX: &[u8] = b"Bearer ";

/// Why a forwarded request did not yield an identity.
///
/// The `Display` text is what strict mode returns as the 401 body.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("Authorization header missing")]
    MissingToken,
    #[error("Error introspecting token: {0}")]
    Introspection(#[from] IntrospectionError),
    #[error("Token is inactive")]
    InactiveToken,
    #[error("Error reading token claims: {0}")]
    InvalidClaim(#[from] InvalidHeaderValue),
}

impl AuthFailure {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::Introspection(_) => "introspection_failed",
            Self::InactiveToken => "inactive_token",
            Self::InvalidClaim(_) => "invalid_claim",
        }
    }
}

/// Identity of an active token, already shaped as header values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: HeaderValue,
    pub username: HeaderValue,
    /// `ext.roles` joined by a single space.
    pub roles: HeaderValue,
    pub client_id: HeaderValue,
    pub scopes: HeaderValue,
}

impl TryFrom<&IntrospectionResult> for Identity {
    type Error = InvalidHeaderValue;

    fn try_from(result: &IntrospectionResult) -> Result<Self, Self::Error> {
        // from_bytes (not from_str) so non-ASCII usernames pass through as opaque bytes.
        Ok(Self {
            user_id: HeaderValue::from_bytes(result.sub.as_bytes())?,
            username: HeaderValue::from_bytes(result.ext.username.as_bytes())?,
            roles: HeaderValue::from_bytes(result.ext.roles.join(" ").as_bytes())?,
            client_id: HeaderValue::from_bytes(result.client_id.as_bytes())?,
            scopes: HeaderValue::from_bytes(result.scope.as_bytes())?,
        })
    }
}

/// Returns the token after the exact `"Bearer "` prefix.
///
/// The prefix match is byte-wise, case-sensitive with a single space. The
/// token itself is opaque: non-ASCII bytes are kept. An empty token is treated
/// the same as a missing header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&[u8]> {
    headers
        .get(header::AUTHORIZATION)
        .map(HeaderValue::as_bytes)
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
}

pub async fn authenticate(
    introspector: &dyn TokenIntrospector,
    headers: &HeaderMap,
) -> Result<Identity, AuthFailure> {
    let token = extract_bearer_token(headers).ok_or(AuthFailure::MissingToken)?;

    let result = introspector.introspect(token).await?;
    if !result.active {
        return Err(AuthFailure::InactiveToken);
    }

    let identity = Identity::try_from(&result)?;
    tracing::debug!(
        backend = introspector.backend_name(),
        sub = %result.sub,
        preferred_username = %result.ext.preferred_username,
        client_id = %result.client_id,
        "token introspected"
    );

    Ok(identity)
}
