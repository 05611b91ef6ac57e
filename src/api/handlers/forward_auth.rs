/*
 * Responsibility
 * - /enforce-auth : 認証必須。失敗時は 401
 * - /enrich-auth  : 認証任意。常に 200、成功時のみ identity header を付与
 * - どちらも同じ pipeline (services::forward_auth::authenticate) を使い、
 *   失敗時のステータスだけが異なる
 *
 * Notes
 * - enrich-auth では「匿名」と「introspection 失敗」を下流で区別できない (現仕様のまま)
 */
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::middleware::identity_headers;
use crate::services::forward_auth::{self, AuthFailure};
use crate::state::AppState;

pub async fn enforce_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut response_headers = HeaderMap::new();
    identity_headers::sanitize(&mut response_headers);

    let identity = forward_auth::authenticate(state.introspector.as_ref(), &headers)
        .await
        .inspect_err(|err| {
            tracing::warn!(reason = err.kind(), error = %err, "forward auth denied");
        })?;

    identity_headers::inject(&mut response_headers, &identity);

    Ok((StatusCode::OK, response_headers).into_response())
}

pub async fn enrich_auth(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut response_headers = HeaderMap::new();
    identity_headers::sanitize(&mut response_headers);

    match forward_auth::authenticate(state.introspector.as_ref(), &headers).await {
        Ok(identity) => identity_headers::inject(&mut response_headers, &identity),
        Err(err @ (AuthFailure::MissingToken | AuthFailure::InactiveToken)) => {
            tracing::debug!(reason = err.kind(), "continuing without identity");
        }
        Err(err) => {
            tracing::warn!(reason = err.kind(), error = %err, "continuing without identity");
        }
    }

    (StatusCode::OK, response_headers).into_response()
}
