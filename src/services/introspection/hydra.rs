/*
 * Responsibility
 * - Hydra の /oauth2/introspect を呼び出してトークンを検証する
 * - リトライ・キャッシュ・タイムアウト上書きはしない (1 リクエスト = 1 回の introspection)
 */
use async_trait::async_trait;
use reqwest::header::{self, HeaderValue, InvalidHeaderValue};
use url::Url;

use super::client::{IntrospectionError, TokenIntrospector};
use super::types::IntrospectionResult;

const INTROSPECT_PATH: &str = "oauth2/introspect";

/// `TokenIntrospector` backed by the provider's HTTP introspection endpoint.
///
/// The token authenticates the call itself (self-introspection). No
/// `token=` form parameter is sent even though the content type is declared
/// as form-encoded.
#[derive(Debug, Clone)]
pub struct HydraIntrospector {
    http: reqwest::Client,
    introspect_url: String,
}

impl HydraIntrospector {
    pub fn new(http: reqwest::Client, base_url: &Url) -> Self {
        let introspect_url = format!(
            "{}/{}",
            base_url.as_str().trim_end_matches('/'),
            INTROSPECT_PATH
        );

        Self {
            http,
            introspect_url,
        }
    }

    pub fn introspect_url(&self) -> &str {
        &self.introspect_url
    }
}

/// `Bearer <token>`, byte for byte, marked sensitive so it never shows up in debug output.
fn bearer_authorization(token: &[u8]) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut raw = Vec::with_capacity(b"Bearer ".len() + token.len());
    raw.extend_from_slice(b"Bearer ");
    raw.extend_from_slice(token);

    let mut value = HeaderValue::from_bytes(&raw)?;
    value.set_sensitive(true);
    Ok(value)
}

#[async_trait]
impl TokenIntrospector for HydraIntrospector {
    fn backend_name(&self) -> &'static str {
        "hydra"
    }

    async fn introspect(&self, token: &[u8]) -> Result<IntrospectionResult, IntrospectionError> {
        let authorization = bearer_authorization(token)?;

        let response = self
            .http
            .post(&self.introspect_url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status != reqwest::StatusCode::OK {
            return Err(IntrospectionError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
