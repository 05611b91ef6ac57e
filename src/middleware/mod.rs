/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 */
pub mod http;
pub mod identity_headers;
