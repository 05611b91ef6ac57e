/*
 * Responsibility
 * - URL 構造の定義
 * - /enforce-auth, /enrich-auth はメソッドを問わない (proxy が元のメソッドのまま転送するため)
 */
use axum::{
    Router,
    routing::{any, get},
};

use crate::api::handlers::{
    forward_auth::{enforce_auth, enrich_auth},
    health::health,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/enforce-auth", any(enforce_auth))
        .route("/enrich-auth", any(enrich_auth))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{self, Body},
        http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::identity_headers::{
        IDENTITY_HEADERS, X_CLIENT_ID, X_CLIENT_SCOPES, X_USER_GROUPS, X_USER_ID, X_USER_NAME,
        X_USER_ROLES,
    };
    use crate::services::introspection::{
        IntrospectionError, IntrospectionExt, IntrospectionResult, TokenIntrospector,
    };

    /// Identity provider double keyed by token value.
    struct FakeProvider;

    #[async_trait]
    impl TokenIntrospector for FakeProvider {
        fn backend_name(&self) -> &'static str {
            "fake"
        }

        async fn introspect(
            &self,
            token: &[u8],
        ) -> Result<IntrospectionResult, IntrospectionError> {
            match token {
                b"good" | b"caf\xe9" => Ok(IntrospectionResult {
                    active: true,
                    sub: "u1".into(),
                    scope: "read write".into(),
                    client_id: "c1".into(),
                    ext: IntrospectionExt {
                        preferred_username: "Alice".into(),
                        roles: vec!["admin".into(), "user".into()],
                        username: "alice".into(),
                    },
                }),
                b"revoked" => Ok(IntrospectionResult {
                    active: false,
                    sub: "u1".into(),
                    ..Default::default()
                }),
                _ => Err(IntrospectionError::Status {
                    status: 500,
                    body: "upstream down".into(),
                }),
            }
        }
    }

    fn app() -> Router {
        routes().with_state(AppState::new(Arc::new(FakeProvider)))
    }

    fn assert_no_identity(headers: &HeaderMap) {
        for name in &IDENTITY_HEADERS {
            assert!(!headers.contains_key(name), "{name} must not be set");
        }
    }

    async fn call(path: &str, authorization: Option<&str>) -> (StatusCode, HeaderMap, String) {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(path)
            // Client-supplied identity must never be echoed back.
            .header("X-User-Id", "attacker")
            .header("X-User-Groups", "admin");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn assert_identity(headers: &HeaderMap) {
        assert_eq!(headers.get(X_USER_ID).unwrap(), "u1");
        assert_eq!(headers.get(X_USER_NAME).unwrap(), "alice");
        assert_eq!(headers.get(X_USER_ROLES).unwrap(), "admin user");
        assert_eq!(headers.get(X_CLIENT_ID).unwrap(), "c1");
        assert_eq!(headers.get(X_CLIENT_SCOPES).unwrap(), "read write");
        assert!(!headers.contains_key(X_USER_GROUPS));
    }

    #[tokio::test]
    async fn enforce_accepts_active_token() {
        let (status, headers, body) = call("/enforce-auth", Some("Bearer good")).await;

        assert_eq!(status, StatusCode::OK);
        assert_identity(&headers);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn enforce_rejects_missing_header() {
        let (status, headers, body) = call("/enforce-auth", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_no_identity(&headers);
        assert_eq!(body, "Authorization header missing\n");
    }

    #[tokio::test]
    async fn enforce_rejects_non_bearer_scheme() {
        let (status, headers, body) = call("/enforce-auth", Some("bearer good")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_no_identity(&headers);
        assert_eq!(body, "Authorization header missing\n");
    }

    #[tokio::test]
    async fn enforce_rejects_inactive_token() {
        let (status, headers, body) = call("/enforce-auth", Some("Bearer revoked")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_no_identity(&headers);
        assert_eq!(body, "Token is inactive\n");
    }

    #[tokio::test]
    async fn enforce_rejects_on_upstream_failure() {
        let (status, headers, body) = call("/enforce-auth", Some("Bearer other")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_no_identity(&headers);
        assert_eq!(
            body,
            "Error introspecting token: introspect failed with status 500: upstream down\n"
        );
    }

    #[tokio::test]
    async fn enrich_attaches_identity_for_active_token() {
        let (status, headers, body) = call("/enrich-auth", Some("Bearer good")).await;

        assert_eq!(status, StatusCode::OK);
        assert_identity(&headers);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn enrich_always_succeeds_without_identity_on_failure() {
        for authorization in [
            None,
            Some("Basic Zm9vOmJhcg=="),
            Some("Bearer revoked"),
            Some("Bearer other"),
        ] {
            let (status, headers, body) = call("/enrich-auth", authorization).await;

            assert_eq!(status, StatusCode::OK, "{authorization:?}");
            assert_no_identity(&headers);
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn non_utf8_token_is_still_introspected() {
        let request = Request::builder()
            .uri("/enforce-auth")
            .header(
                header::AUTHORIZATION,
                HeaderValue::from_bytes(b"Bearer caf\xe9").unwrap(),
            )
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_identity(response.headers());
    }

    #[tokio::test]
    async fn forward_auth_routes_accept_any_method() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let request = Request::builder()
                .method(method.clone())
                .uri("/enforce-auth")
                .header(header::AUTHORIZATION, "Bearer good")
                .body(Body::empty())
                .unwrap();

            let response = app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{method}");
        }
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let (status, _, body) = call("/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }
}
