//! HTTP LLM Client - 调用 OpenAI 兼容的文本生成服务
//!
//! 实现 TextGeneratorPort trait，通过 HTTP 调用外部生成服务
//!
//! 外部 API:
//! POST {base_url}/v1/chat/completions
//! Request: {"model": "...", "messages": [...], "max_tokens": n, "temperature": t}  (JSON)
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    GenerateTextRequest, GenerationError, ModelTier, TextGeneratorPort,
};

/// Chat 消息 (JSON)
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions 请求体 (JSON)
#[derive(Debug, Serialize)]
struct ChatCompletionHttpRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionHttpResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// HTTP LLM 客户端配置
#[derive(Debug, Clone)]
pub struct HttpLlmClientConfig {
    /// 生成服务基础 URL
    pub base_url: String,
    /// API Key（Bearer），无鉴权的本地服务可不设
    pub api_key: Option<String>,
    /// standard 档对应的模型名
    pub model_standard: String,
    /// premium 档对应的模型名
    pub model_premium: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpLlmClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model_standard: "gpt-3.5-turbo".to_string(),
            model_premium: "gpt-4".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpLlmClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP LLM 客户端
///
/// 通过 HTTP 调用外部文本生成服务
pub struct HttpLlmClient {
    client: Client,
    config: HttpLlmClientConfig,
}

impl HttpLlmClient {
    /// 创建新的 HTTP LLM 客户端
    pub fn new(config: HttpLlmClientConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 档位对应的模型名
    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Standard => &self.config.model_standard,
            ModelTier::Premium => &self.config.model_premium,
        }
    }

    /// 获取生成 URL
    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    /// 获取健康检查 URL
    fn models_url(&self) -> String {
        format!("{}/v1/models", self.config.base_url)
    }
}

#[async_trait]
impl TextGeneratorPort for HttpLlmClient {
    async fn generate(&self, request: GenerateTextRequest) -> Result<String, GenerationError> {
        let model = self.model_for(request.tier);
        let http_request = ChatCompletionHttpRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_text,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_text,
                },
            ],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %model,
            tier = request.tier.as_str(),
            user_len = request.user_text.len(),
            "Sending generation request"
        );

        let mut builder = self
            .client
            .post(self.completions_url())
            .json(&http_request);

        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else if e.is_connect() {
                GenerationError::NetworkError(format!("Cannot connect to LLM service: {}", e))
            } else {
                GenerationError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ChatCompletionHttpResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::InvalidResponse("No choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        tracing::info!(
            model = %model,
            output_len = content.len(),
            "Generation completed"
        );

        Ok(content)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.models_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpLlmClientConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.model_standard, "gpt-3.5-turbo");
        assert_eq!(config.model_premium, "gpt-4");
    }

    #[test]
    fn test_config_builder() {
        let config = HttpLlmClientConfig::new("http://localhost:8000").with_timeout(60);
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_model_selected_by_tier() {
        let client = HttpLlmClient::new(HttpLlmClientConfig::default()).unwrap();
        assert_eq!(client.model_for(ModelTier::Standard), "gpt-3.5-turbo");
        assert_eq!(client.model_for(ModelTier::Premium), "gpt-4");
    }
}
