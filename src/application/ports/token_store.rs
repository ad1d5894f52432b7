//! Token Store Port - 访问令牌抽象
//!
//! 登录后签发不透明 Bearer 令牌，请求时解析回用户 ID。
//! 具体实现在 infrastructure/memory 层。

use uuid::Uuid;

/// Token Store Port
pub trait TokenStorePort: Send + Sync {
    /// 为用户签发新令牌
    fn issue(&self, user_id: Uuid) -> String;

    /// 解析令牌对应的用户 ID；无效令牌返回 None
    fn resolve(&self, token: &str) -> Option<Uuid>;
}
