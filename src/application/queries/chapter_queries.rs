//! Chapter Queries

use uuid::Uuid;

/// 获取章节详情（含全部人设评论）
#[derive(Debug, Clone)]
pub struct GetChapterWithReviews {
    pub user_id: Uuid,
    pub chapter_id: Uuid,
}
