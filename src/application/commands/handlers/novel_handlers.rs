//! Novel Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateNovel, DeleteNovel, UpdateNovel};
use crate::application::error::ApplicationError;
use crate::application::ports::{NovelRecord, NovelRepositoryPort};

/// 创建小说响应
#[derive(Debug, Clone)]
pub struct CreateNovelResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// CreateNovel Handler
pub struct CreateNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl CreateNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(&self, command: CreateNovel) -> Result<CreateNovelResponse, ApplicationError> {
        if command.title.trim().is_empty() {
            return Err(ApplicationError::validation("Novel title is required"));
        }

        let novel = NovelRecord {
            id: Uuid::new_v4(),
            user_id: command.user_id,
            title: command.title.trim().to_string(),
            description: command.description,
            created_at: Utc::now(),
        };

        self.novel_repo.insert(&novel).await?;

        tracing::info!(novel_id = %novel.id, title = %novel.title, "Novel created");

        Ok(CreateNovelResponse {
            id: novel.id,
            title: novel.title,
            description: novel.description,
        })
    }
}

/// UpdateNovel Handler
pub struct UpdateNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl UpdateNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(&self, command: UpdateNovel) -> Result<(), ApplicationError> {
        if command.title.trim().is_empty() {
            return Err(ApplicationError::validation("Novel title is required"));
        }

        // 归属校验：非本人小说按不存在处理
        let novel = self
            .novel_repo
            .find_by_id(command.novel_id)
            .await?
            .filter(|n| n.user_id == command.user_id)
            .ok_or_else(|| ApplicationError::not_found("Novel", command.novel_id))?;

        self.novel_repo
            .update(novel.id, command.title.trim(), &command.description)
            .await?;

        tracing::info!(novel_id = %novel.id, "Novel updated");

        Ok(())
    }
}

/// DeleteNovel Handler
pub struct DeleteNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl DeleteNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(&self, command: DeleteNovel) -> Result<(), ApplicationError> {
        let novel = self
            .novel_repo
            .find_by_id(command.novel_id)
            .await?
            .filter(|n| n.user_id == command.user_id)
            .ok_or_else(|| ApplicationError::not_found("Novel", command.novel_id))?;

        // 外键级联同时删除章节与评论
        self.novel_repo.delete(novel.id).await?;

        tracing::info!(novel_id = %novel.id, title = %novel.title, "Novel deleted");

        Ok(())
    }
}
