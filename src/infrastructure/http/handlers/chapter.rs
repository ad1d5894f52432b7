//! Chapter HTTP Handlers
//!
//! 章节提交是评论生成管线的入口：插入成功即 201，
//! 个别评论生成失败只附带 warning，不影响创建结果

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::queries::handlers::ChapterDetailResponse;
use crate::application::{DeleteChapter, GetChapterWithReviews, SubmitChapter, UpdateChapter};
use crate::infrastructure::http::auth::AuthUser;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitChapterRequest {
    pub novel_id: Uuid,
    pub chapter_number: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct GetChapterRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateChapterRequest {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChapterRequest {
    pub id: Uuid,
}

/// 章节提交响应
///
/// warning 仅在部分人设评论生成失败时出现
#[derive(Debug, Serialize)]
pub struct ChapterCreatedResponse {
    pub id: Uuid,
    pub chapter_number: i64,
    pub title: String,
    pub word_count: i64,
    pub reviews_created: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewDto {
    pub id: Uuid,
    pub persona_id: String,
    pub persona_name: String,
    pub review_text: String,
    pub rating: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ChapterDetailDto {
    pub id: Uuid,
    pub novel_id: Uuid,
    pub novel_title: String,
    pub chapter_number: i64,
    pub title: String,
    pub content: String,
    pub word_count: i64,
    pub created_at: String,
    pub reviews: Vec<ReviewDto>,
}

impl From<ChapterDetailResponse> for ChapterDetailDto {
    fn from(detail: ChapterDetailResponse) -> Self {
        Self {
            id: detail.id,
            novel_id: detail.novel_id,
            novel_title: detail.novel_title,
            chapter_number: detail.chapter_number,
            title: detail.title,
            content: detail.content,
            word_count: detail.word_count,
            created_at: detail.created_at,
            reviews: detail
                .reviews
                .into_iter()
                .map(|r| ReviewDto {
                    id: r.id,
                    persona_id: r.persona_id,
                    persona_name: r.persona_name,
                    review_text: r.review_text,
                    rating: r.rating,
                    created_at: r.created_at,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 提交章节并生成全部人设评论
///
/// 等全部人设尘埃落定后才返回；只要章节插入成功就报告创建成功
pub async fn submit_chapter(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<SubmitChapterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ChapterCreatedResponse>>), ApiError> {
    let command = SubmitChapter {
        user_id,
        novel_id: req.novel_id,
        chapter_number: req.chapter_number,
        title: req.title,
        content: req.content,
    };

    let result = state.submit_chapter_handler.handle(command).await?;

    let warning = if result.failed_personas.is_empty() {
        None
    } else {
        Some(format!(
            "Review generation failed for: {}",
            result.failed_personas.join(", ")
        ))
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ChapterCreatedResponse {
            id: result.chapter_id,
            chapter_number: result.chapter_number,
            title: result.title,
            word_count: result.word_count,
            reviews_created: result.reviews_created,
            warning,
        })),
    ))
}

/// 获取章节详情（含全部人设评论）
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<GetChapterRequest>,
) -> Result<Json<ApiResponse<ChapterDetailDto>>, ApiError> {
    let query = GetChapterWithReviews {
        user_id,
        chapter_id: req.id,
    };

    let result = state.get_chapter_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ChapterDetailDto::from(result))))
}

/// 更新章节（不触发评论重新生成）
pub async fn update_chapter(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateChapterRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = UpdateChapter {
        user_id,
        chapter_id: req.id,
        title: req.title,
        content: req.content,
    };

    state.update_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

/// 删除章节（级联删除其评论）
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<DeleteChapterRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = DeleteChapter {
        user_id,
        chapter_id: req.id,
    };

    state.delete_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_omitted_when_all_reviews_succeed() {
        let response = ChapterCreatedResponse {
            id: Uuid::new_v4(),
            chapter_number: 1,
            title: "第一章".to_string(),
            word_count: 42,
            reviews_created: 6,
            warning: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("warning").is_none());
        assert_eq!(value["reviews_created"], 6);
    }

    #[test]
    fn test_warning_present_on_partial_failure() {
        let response = ChapterCreatedResponse {
            id: Uuid::new_v4(),
            chapter_number: 1,
            title: "第一章".to_string(),
            word_count: 42,
            reviews_created: 4,
            warning: Some("Review generation failed for: 出版编辑, 文学评论家".to_string()),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["warning"].as_str().unwrap().contains("出版编辑"));
    }
}
