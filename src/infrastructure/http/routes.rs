//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping             GET   健康检查
//! - /api/auth/register    POST  注册（返回令牌）
//! - /api/auth/login       POST  登录（返回令牌）
//! - /api/novel/create     POST  创建小说
//! - /api/novel/list       GET   列出本人小说
//! - /api/novel/get        POST  获取小说详情（含章节列表）
//! - /api/novel/update     POST  更新小说
//! - /api/novel/delete     POST  删除小说（级联删除章节与评论）
//! - /api/chapter/create   POST  提交章节并生成六个人设评论
//! - /api/chapter/get      POST  获取章节详情（含全部评论）
//! - /api/chapter/update   POST  更新章节（不重新生成评论）
//! - /api/chapter/delete   POST  删除章节（级联删除其评论）
//! - /api/persona/list     GET   人设目录

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/auth", auth_routes())
        .nest("/novel", novel_routes())
        .nest("/chapter", chapter_routes())
        .nest("/persona", persona_routes())
}

/// Auth 路由
fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

/// Novel 路由
fn novel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_novel))
        .route("/list", get(handlers::list_novels))
        .route("/get", post(handlers::get_novel))
        .route("/update", post(handlers::update_novel))
        .route("/delete", post(handlers::delete_novel))
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::submit_chapter))
        .route("/get", post(handlers::get_chapter))
        .route("/update", post(handlers::update_chapter))
        .route("/delete", post(handlers::delete_chapter))
}

/// Persona 路由
fn persona_routes() -> Router<Arc<AppState>> {
    Router::new().route("/list", get(handlers::list_personas))
}
