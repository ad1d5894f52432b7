//! Novel Query Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterRecord, ChapterRepositoryPort, NovelRepositoryPort, NovelSummary,
};
use crate::application::queries::{GetNovel, ListNovels};

// ============================================================================
// Response DTOs
// ============================================================================

/// 小说列表条目响应
#[derive(Debug, Clone)]
pub struct NovelSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub chapter_count: i64,
    pub created_at: String,
}

impl From<NovelSummary> for NovelSummaryResponse {
    fn from(summary: NovelSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            description: summary.description,
            chapter_count: summary.chapter_count,
            created_at: summary.created_at.to_rfc3339(),
        }
    }
}

/// 章节列表条目响应（不含全文）
#[derive(Debug, Clone)]
pub struct ChapterSummaryResponse {
    pub id: Uuid,
    pub chapter_number: i64,
    pub title: String,
    pub word_count: i64,
    pub created_at: String,
}

impl From<ChapterRecord> for ChapterSummaryResponse {
    fn from(record: ChapterRecord) -> Self {
        Self {
            id: record.id,
            chapter_number: record.chapter_number,
            title: record.title,
            word_count: record.word_count,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// 小说详情响应
#[derive(Debug, Clone)]
pub struct NovelDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub chapters: Vec<ChapterSummaryResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListNovels Handler
pub struct ListNovelsHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl ListNovelsHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(
        &self,
        query: ListNovels,
    ) -> Result<Vec<NovelSummaryResponse>, ApplicationError> {
        let novels = self.novel_repo.find_all_by_user(query.user_id).await?;
        Ok(novels.into_iter().map(NovelSummaryResponse::from).collect())
    }
}

/// GetNovel Handler
pub struct GetNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl GetNovelHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            novel_repo,
            chapter_repo,
        }
    }

    pub async fn handle(&self, query: GetNovel) -> Result<NovelDetailResponse, ApplicationError> {
        let novel = self
            .novel_repo
            .find_by_id(query.novel_id)
            .await?
            .filter(|n| n.user_id == query.user_id)
            .ok_or_else(|| ApplicationError::not_found("Novel", query.novel_id))?;

        let chapters = self.chapter_repo.find_all_by_novel(novel.id).await?;

        Ok(NovelDetailResponse {
            id: novel.id,
            title: novel.title,
            description: novel.description,
            created_at: novel.created_at.to_rfc3339(),
            chapters: chapters
                .into_iter()
                .map(ChapterSummaryResponse::from)
                .collect(),
        })
    }
}
