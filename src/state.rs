/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc)
 * - リクエスト間で共有する可変状態は持たない
 */
use std::sync::Arc;

use crate::services::introspection::TokenIntrospector;

#[derive(Clone)]
pub struct AppState {
    pub introspector: Arc<dyn TokenIntrospector>,
}

impl AppState {
    pub fn new(introspector: Arc<dyn TokenIntrospector>) -> Self {
        Self { introspector }
    }
}
