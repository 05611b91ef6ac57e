//! Identity headers handed to the reverse proxy.
//!
//! Responsibility:
//! - Clear identity headers before anything is written (anti-spoofing)
//! - Write the identity of an active token onto the response
//!
//! The proxy copies these from the auth response onto the forwarded request,
//! so a stale or client-supplied value must never survive on a response.

use axum::http::{HeaderMap, HeaderName};

use crate::services::forward_auth::Identity;

pub const X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");
pub const X_USER_NAME: HeaderName = HeaderName::from_static("x-user-name");
pub const X_USER_ROLES: HeaderName = HeaderName::from_static("x-user-roles");
pub const X_USER_GROUPS: HeaderName = HeaderName::from_static("x-user-groups");
pub const X_CLIENT_ID: HeaderName = HeaderName::from_static("x-client-id");
pub const X_CLIENT_SCOPES: HeaderName = HeaderName::from_static("x-client-scopes");

/// Every identity header this service owns. `x-user-groups` is a legacy
/// name that is never written but still cleared.
pub const IDENTITY_HEADERS: [HeaderName; 6] = [
    X_USER_ID,
    X_USER_NAME,
    X_USER_ROLES,
    X_USER_GROUPS,
    X_CLIENT_ID,
    X_CLIENT_SCOPES,
];

/// Removes all identity headers (every value, any casing).
pub fn sanitize(headers: &mut HeaderMap) {
    for name in IDENTITY_HEADERS {
        headers.remove(name);
    }
}

/// Sets the five identity headers, replacing existing values.
pub fn inject(headers: &mut HeaderMap, identity: &Identity) {
    headers.insert(X_USER_ID, identity.user_id.clone());
    headers.insert(X_USER_NAME, identity.username.clone());
    headers.insert(X_USER_ROLES, identity.roles.clone());
    headers.insert(X_CLIENT_ID, identity.client_id.clone());
    headers.insert(X_CLIENT_SCOPES, identity.scopes.clone());
}
