//! Bearer 令牌认证提取器
//!
//! 认证后的用户 ID 作为显式值传入各处理器，而不是挂在共享请求状态上

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap};
use std::sync::Arc;
use uuid::Uuid;

use super::error::ApiError;
use super::state::AppState;
use crate::application::ports::TokenStorePort;

/// 已认证用户
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// 从请求头解析 Bearer 令牌并换回用户 ID
pub fn resolve_bearer(
    headers: &HeaderMap,
    tokens: &dyn TokenStorePort,
) -> Result<Uuid, ApiError> {
    let header_val = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization token".to_string()))?;

    let token = header_val
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization header".to_string()))?;

    tokens
        .resolve(token)
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = resolve_bearer(&parts.headers, state.token_store.as_ref())?;
        Ok(AuthUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryTokenStore;
    use axum::http::header;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_valid_token_resolves() {
        let store = InMemoryTokenStore::new();
        let user_id = Uuid::new_v4();
        let token = store.issue(user_id);

        let headers = headers_with(&format!("Bearer {}", token));
        assert_eq!(resolve_bearer(&headers, &store).unwrap(), user_id);
    }

    #[test]
    fn test_missing_header_rejected() {
        let store = InMemoryTokenStore::new();
        let result = resolve_bearer(&HeaderMap::new(), &store);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let store = InMemoryTokenStore::new();
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert!(matches!(
            resolve_bearer(&headers, &store),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let store = InMemoryTokenStore::new();
        let headers = headers_with("Bearer deadbeef");
        assert!(matches!(
            resolve_bearer(&headers, &store),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
