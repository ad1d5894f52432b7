//! Text Generator Port - 文本生成后端抽象
//!
//! 定义 LLM 文本生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 模型档位
///
/// 按章节长度选择：短章节走 standard（快/省），长章节走 premium（容量大）。
/// 这是成本/质量权衡，不是正确性要求。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Standard,
    Premium,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Standard => "standard",
            ModelTier::Premium => "premium",
        }
    }
}

/// 文本生成请求
#[derive(Debug, Clone)]
pub struct GenerateTextRequest {
    /// 系统提示词
    pub system_text: String,
    /// 用户提示词
    pub user_text: String,
    /// 模型档位
    pub tier: ModelTier,
    /// 输出 token 上限
    pub max_output_tokens: u32,
    /// 采样温度
    pub temperature: f32,
}

/// Text Generator Port
///
/// 外部文本生成服务的抽象接口
#[async_trait]
pub trait TextGeneratorPort: Send + Sync {
    /// 执行一次文本生成，返回生成的全文
    async fn generate(&self, request: GenerateTextRequest) -> Result<String, GenerationError>;

    /// 检查生成服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
