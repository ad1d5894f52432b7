//! Chapter Query Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterRepositoryPort, ReviewRepositoryPort, ReviewWithPersona,
};
use crate::application::queries::GetChapterWithReviews;

/// 评论响应
#[derive(Debug, Clone)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub persona_id: String,
    pub persona_name: String,
    pub review_text: String,
    pub rating: i64,
    pub created_at: String,
}

impl From<ReviewWithPersona> for ReviewResponse {
    fn from(review: ReviewWithPersona) -> Self {
        Self {
            id: review.id,
            persona_id: review.persona_id,
            persona_name: review.persona_name,
            review_text: review.review_text,
            rating: review.rating,
            created_at: review.created_at.to_rfc3339(),
        }
    }
}

/// 章节详情响应（含所属小说标题与全部评论）
#[derive(Debug, Clone)]
pub struct ChapterDetailResponse {
    pub id: Uuid,
    pub novel_id: Uuid,
    pub novel_title: String,
    pub chapter_number: i64,
    pub title: String,
    pub content: String,
    pub word_count: i64,
    pub created_at: String,
    pub reviews: Vec<ReviewResponse>,
}

/// GetChapterWithReviews Handler
pub struct GetChapterWithReviewsHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl GetChapterWithReviewsHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        review_repo: Arc<dyn ReviewRepositoryPort>,
    ) -> Self {
        Self {
            chapter_repo,
            review_repo,
        }
    }

    pub async fn handle(
        &self,
        query: GetChapterWithReviews,
    ) -> Result<ChapterDetailResponse, ApplicationError> {
        let chapter = self
            .chapter_repo
            .find_with_novel(query.chapter_id)
            .await?
            .filter(|c| c.owner_id == query.user_id)
            .ok_or_else(|| ApplicationError::not_found("Chapter", query.chapter_id))?;

        let reviews = self.review_repo.find_by_chapter(chapter.chapter.id).await?;

        Ok(ChapterDetailResponse {
            id: chapter.chapter.id,
            novel_id: chapter.chapter.novel_id,
            novel_title: chapter.novel_title,
            chapter_number: chapter.chapter.chapter_number,
            title: chapter.chapter.title,
            content: chapter.chapter.content,
            word_count: chapter.chapter.word_count,
            created_at: chapter.chapter.created_at.to_rfc3339(),
            reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
        })
    }
}
