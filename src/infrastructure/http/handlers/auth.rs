//! Auth HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{LoginUser, RegisterUser};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthTokenResponse {
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// Handlers
// ============================================================================

/// 注册新用户
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthTokenResponse>>), ApiError> {
    let command = RegisterUser {
        username: req.username,
        email: req.email,
        password: req.password,
    };

    let result = state.register_user_handler.handle(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AuthTokenResponse {
            token: result.token,
            user: UserResponse {
                id: result.user_id,
                username: result.username,
                email: result.email,
            },
        })),
    ))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthTokenResponse>>, ApiError> {
    let command = LoginUser {
        email: req.email,
        password: req.password,
    };

    let result = state.login_user_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(AuthTokenResponse {
        token: result.token,
        user: UserResponse {
            id: result.user_id,
            username: result.username,
            email: result.email,
        },
    })))
}
