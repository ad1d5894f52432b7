//! In-Memory Token Store Implementation

use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::TokenStorePort;

/// 内存令牌存储
///
/// 令牌随进程消亡，重启后需要重新登录
pub struct InMemoryTokenStore {
    tokens: DashMap<String, Uuid>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStorePort for InMemoryTokenStore {
    fn issue(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), user_id);
        tracing::debug!(user_id = %user_id, "Token issued");
        token
    }

    fn resolve(&self, token: &str) -> Option<Uuid> {
        self.tokens.get(token).map(|entry| *entry.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_resolve() {
        let store = InMemoryTokenStore::new();
        let user_id = Uuid::new_v4();

        let token = store.issue(user_id);
        assert_eq!(store.resolve(&token), Some(user_id));
    }

    #[test]
    fn test_unknown_token_is_none() {
        let store = InMemoryTokenStore::new();
        assert_eq!(store.resolve("not-a-token"), None);
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let store = InMemoryTokenStore::new();
        let user_id = Uuid::new_v4();

        let first = store.issue(user_id);
        let second = store.issue(user_id);
        assert_ne!(first, second);
        assert_eq!(store.resolve(&first), Some(user_id));
        assert_eq!(store.resolve(&second), Some(user_id));
    }
}
