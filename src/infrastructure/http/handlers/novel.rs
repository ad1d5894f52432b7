//! Novel HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::queries::handlers::{NovelDetailResponse, NovelSummaryResponse};
use crate::application::{CreateNovel, DeleteNovel, GetNovel, ListNovels, UpdateNovel};
use crate::infrastructure::http::auth::AuthUser;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateNovelRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct GetNovelRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNovelRequest {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteNovelRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct NovelCreatedResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct NovelSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub chapter_count: i64,
    pub created_at: String,
}

impl From<NovelSummaryResponse> for NovelSummaryDto {
    fn from(summary: NovelSummaryResponse) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            description: summary.description,
            chapter_count: summary.chapter_count,
            created_at: summary.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterSummaryDto {
    pub id: Uuid,
    pub chapter_number: i64,
    pub title: String,
    pub word_count: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct NovelDetailDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub chapters: Vec<ChapterSummaryDto>,
}

impl From<NovelDetailResponse> for NovelDetailDto {
    fn from(detail: NovelDetailResponse) -> Self {
        Self {
            id: detail.id,
            title: detail.title,
            description: detail.description,
            created_at: detail.created_at,
            chapters: detail
                .chapters
                .into_iter()
                .map(|c| ChapterSummaryDto {
                    id: c.id,
                    chapter_number: c.chapter_number,
                    title: c.title,
                    word_count: c.word_count,
                    created_at: c.created_at,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建小说
pub async fn create_novel(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateNovelRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NovelCreatedResponse>>), ApiError> {
    let command = CreateNovel {
        user_id,
        title: req.title,
        description: req.description,
    };

    let result = state.create_novel_handler.handle(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(NovelCreatedResponse {
            id: result.id,
            title: result.title,
            description: result.description,
        })),
    ))
}

/// 获取小说列表
pub async fn list_novels(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<Vec<NovelSummaryDto>>>, ApiError> {
    let result = state.list_novels_handler.handle(ListNovels { user_id }).await?;

    Ok(Json(ApiResponse::success(
        result.into_iter().map(NovelSummaryDto::from).collect(),
    )))
}

/// 获取小说详情（含章节列表）
pub async fn get_novel(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<GetNovelRequest>,
) -> Result<Json<ApiResponse<NovelDetailDto>>, ApiError> {
    let query = GetNovel {
        user_id,
        novel_id: req.id,
    };

    let result = state.get_novel_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(NovelDetailDto::from(result))))
}

/// 更新小说
pub async fn update_novel(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateNovelRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = UpdateNovel {
        user_id,
        novel_id: req.id,
        title: req.title,
        description: req.description,
    };

    state.update_novel_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

/// 删除小说（级联删除章节与评论）
pub async fn delete_novel(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<DeleteNovelRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = DeleteNovel {
        user_id,
        novel_id: req.id,
    };

    state.delete_novel_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}
