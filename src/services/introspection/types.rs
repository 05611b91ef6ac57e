/*
 * Responsibility
 * - OAuth2 token introspection レスポンスの型
 * - リクエスト毎に生成され、キャッシュも永続化もしない
 */
use serde::Deserialize;

/// Response body of `POST /oauth2/introspect`.
///
/// Missing fields fall back to their zero values, so an empty object is an
/// inactive token rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntrospectionResult {
    pub active: bool,
    pub sub: String,
    /// Space-separated, as issued by the provider.
    pub scope: String,
    pub client_id: String,
    pub ext: IntrospectionExt,
}

/// Provider-specific extension claims carried under `ext`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntrospectionExt {
    pub preferred_username: String,
    pub roles: Vec<String>,
    pub username: String,
}
