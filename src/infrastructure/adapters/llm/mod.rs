//! LLM Adapter - 文本生成客户端实现

mod fake_llm_client;
mod http_llm_client;

pub use fake_llm_client::{FakeLlmClient, FakeLlmClientConfig};
pub use http_llm_client::*;
