//! Review Context - 评论限界上下文
//!
//! 职责:
//! - 提示词构建（人设视角 + 前情上下文）
//! - 评分解析与钳制

mod prompt;
mod rating;

pub use prompt::{build_system_prompt, build_user_prompt, PriorChapter, EXCERPT_CHARS};
pub use rating::{
    extract_rating, strip_rating_line, Rating, DEFAULT_RATING, RATING_MAX, RATING_MIN,
};
