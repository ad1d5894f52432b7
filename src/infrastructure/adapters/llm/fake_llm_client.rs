//! Fake LLM Client - 用于测试的生成客户端
//!
//! 始终返回固定的评论文本，不实际调用生成服务

use async_trait::async_trait;

use crate::application::ports::{GenerateTextRequest, GenerationError, TextGeneratorPort};

/// Fake LLM Client 配置
#[derive(Debug, Clone)]
pub struct FakeLlmClientConfig {
    /// 固定返回的评分
    pub rating: i64,
    /// 模拟推理延迟（毫秒）
    pub delay_ms: u64,
}

impl Default for FakeLlmClientConfig {
    fn default() -> Self {
        Self {
            rating: 8,
            delay_ms: 0,
        }
    }
}

/// Fake LLM Client
///
/// 用于测试，始终返回配置评分的固定评论
pub struct FakeLlmClient {
    config: FakeLlmClientConfig,
}

impl FakeLlmClient {
    pub fn new(config: FakeLlmClientConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeLlmClientConfig::default())
    }
}

#[async_trait]
impl TextGeneratorPort for FakeLlmClient {
    async fn generate(&self, request: GenerateTextRequest) -> Result<String, GenerationError> {
        tracing::debug!(
            tier = request.tier.as_str(),
            system_len = request.system_text.len(),
            "FakeLlmClient: returning canned review"
        );

        if self.config.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.delay_ms)).await;
        }

        Ok(format!(
            "## 优点\n\
             - 开篇节奏明快，人物动机清晰。\n\
             - 对话自然，信息密度适中。\n\n\
             ## 改进建议\n\
             - 环境描写略显单薄。\n\
             - 结尾悬念可以再收紧一些。\n\n\
             ## 总体评价\n\
             整体完成度较高，值得继续写下去。\n\n\
             评分: {}",
            self.config.rating
        ))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ModelTier;
    use crate::domain::review::{extract_rating, strip_rating_line};

    #[tokio::test]
    async fn test_canned_review_parses() {
        let client = FakeLlmClient::with_defaults();
        let text = client
            .generate(GenerateTextRequest {
                system_text: "system".to_string(),
                user_text: "user".to_string(),
                tier: ModelTier::Standard,
                max_output_tokens: 1500,
                temperature: 0.7,
            })
            .await
            .unwrap();

        assert_eq!(extract_rating(&text).value(), 8);
        assert!(strip_rating_line(&text).contains("## 总体评价"));
    }
}
