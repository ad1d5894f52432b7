//! Review Generator - 单个 (章节, 人设) 的评论生成
//!
//! 流程：
//! 1. 由人设特征 + 前情章节构建系统/用户提示词
//! 2. 按内容长度选择模型档位
//! 3. 调用文本生成后端（限定输出长度与采样温度）
//! 4. 从生成文本解析评分并剥离评分行

use std::sync::Arc;

use crate::application::ports::{
    GenerateTextRequest, GenerationError, ModelTier, PersonaRecord, TextGeneratorPort,
};
use crate::domain::review::{
    build_system_prompt, build_user_prompt, extract_rating, strip_rating_line, PriorChapter,
    Rating,
};

/// 生成配置
#[derive(Debug, Clone)]
pub struct ReviewGeneratorConfig {
    /// 短章节阈值（字符数），低于该值使用 standard 档
    pub short_content_threshold: usize,
    /// 输出 token 上限
    pub max_output_tokens: u32,
    /// 采样温度（适中非零，让各人设语气有差异又不跑题）
    pub temperature: f32,
}

impl Default for ReviewGeneratorConfig {
    fn default() -> Self {
        Self {
            short_content_threshold: 1000,
            max_output_tokens: 1500,
            temperature: 0.7,
        }
    }
}

/// 评论生成输入（一个章节 + 前情上下文，所有人设共享）
#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub chapter_number: i64,
    pub chapter_title: String,
    pub chapter_content: String,
    pub prior_chapters: Vec<PriorChapter>,
}

/// 生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReview {
    /// 评论正文（已剥离评分行）
    pub review_text: String,
    /// 评分（已钳制到 [1,10]，缺省 7）
    pub rating: Rating,
}

/// Review Generator
pub struct ReviewGenerator {
    text_generator: Arc<dyn TextGeneratorPort>,
    config: ReviewGeneratorConfig,
}

impl ReviewGenerator {
    pub fn new(text_generator: Arc<dyn TextGeneratorPort>, config: ReviewGeneratorConfig) -> Self {
        Self {
            text_generator,
            config,
        }
    }

    /// 按内容长度选择模型档位
    fn select_tier(&self, content: &str) -> ModelTier {
        if content.chars().count() < self.config.short_content_threshold {
            ModelTier::Standard
        } else {
            ModelTier::Premium
        }
    }

    /// 为一个 (章节, 人设) 生成评论
    ///
    /// 后端失败（超时/响应异常/配额）作为单个生成错误返回，由调用方隔离
    pub async fn generate(
        &self,
        input: &ReviewInput,
        persona: &PersonaRecord,
    ) -> Result<GeneratedReview, GenerationError> {
        let system_text = build_system_prompt(&persona.name, &persona.id, &input.prior_chapters);
        let user_text = build_user_prompt(
            input.chapter_number,
            &input.chapter_title,
            &input.chapter_content,
            input.prior_chapters.is_empty(),
        );
        let tier = self.select_tier(&input.chapter_content);

        tracing::debug!(
            persona = %persona.name,
            tier = tier.as_str(),
            chapter_number = input.chapter_number,
            content_chars = input.chapter_content.chars().count(),
            "Generating review"
        );

        let raw = self
            .text_generator
            .generate(GenerateTextRequest {
                system_text,
                user_text,
                tier,
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            })
            .await?;

        let rating = extract_rating(&raw);
        let review_text = strip_rating_line(&raw);

        tracing::debug!(
            persona = %persona.name,
            rating = rating.value(),
            text_len = review_text.len(),
            "Review generated"
        );

        Ok(GeneratedReview {
            review_text,
            rating,
        })
    }
}
