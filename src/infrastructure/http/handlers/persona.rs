//! Persona HTTP Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::ListPersonas;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 人设响应
#[derive(Debug, Serialize)]
pub struct PersonaDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub evaluation_criteria: String,
    pub tone: String,
}

/// 获取人设目录
pub async fn list_personas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PersonaDto>>>, ApiError> {
    let result = state.list_personas_handler.handle(ListPersonas).await?;

    let personas = result
        .into_iter()
        .map(|p| PersonaDto {
            id: p.id,
            name: p.name,
            description: p.description,
            evaluation_criteria: p.evaluation_criteria,
            tone: p.tone,
        })
        .collect();

    Ok(Json(ApiResponse::success(personas)))
}
