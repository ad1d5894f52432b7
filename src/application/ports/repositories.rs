//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::review::PriorChapter;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户实体（用于持久化）
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 保存用户；用户名或邮箱重复时返回 Duplicate
    async fn insert(&self, user: &UserRecord) -> Result<(), RepositoryError>;

    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError>;
}

// ============================================================================
// Novel Repository
// ============================================================================

/// 小说实体（用于持久化）
#[derive(Debug, Clone)]
pub struct NovelRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// 小说列表条目（带章节数）
#[derive(Debug, Clone)]
pub struct NovelSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub chapter_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Novel Repository Port
#[async_trait]
pub trait NovelRepositoryPort: Send + Sync {
    /// 保存小说
    async fn insert(&self, novel: &NovelRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找小说
    async fn find_by_id(&self, id: Uuid) -> Result<Option<NovelRecord>, RepositoryError>;

    /// 获取用户的所有小说（新的在前）
    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<NovelSummary>, RepositoryError>;

    /// 更新标题和简介
    async fn update(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<(), RepositoryError>;

    /// 删除小说（级联删除章节及其评论）
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Chapter Repository
// ============================================================================

/// 章节实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ChapterRecord {
    pub id: Uuid,
    pub novel_id: Uuid,
    pub chapter_number: i64,
    pub title: String,
    pub content: String,
    /// 写入时按内容字符数计算的缓存值，之后不再校验
    pub word_count: i64,
    pub created_at: DateTime<Utc>,
}

/// 章节 + 所属小说信息（用于归属校验）
#[derive(Debug, Clone)]
pub struct ChapterWithNovel {
    pub chapter: ChapterRecord,
    pub novel_title: String,
    pub owner_id: Uuid,
}

/// Chapter Repository Port
#[async_trait]
pub trait ChapterRepositoryPort: Send + Sync {
    /// 保存章节；(novel_id, chapter_number) 重复时返回 Duplicate
    async fn insert(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找章节
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 根据 ID 查找章节及其所属小说
    async fn find_with_novel(&self, id: Uuid) -> Result<Option<ChapterWithNovel>, RepositoryError>;

    /// 获取小说的所有章节（章节号升序）
    async fn find_all_by_novel(
        &self,
        novel_id: Uuid,
    ) -> Result<Vec<ChapterRecord>, RepositoryError>;

    /// 获取给定章节号之前的所有章节（章节号升序，严格小于）
    ///
    /// 第一章时返回空序列，与错误区分；无副作用
    async fn find_prior(
        &self,
        novel_id: Uuid,
        before_chapter_number: i64,
    ) -> Result<Vec<PriorChapter>, RepositoryError>;

    /// 更新标题、内容和字数
    async fn update(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
        word_count: i64,
    ) -> Result<(), RepositoryError>;

    /// 删除章节（级联删除其评论）
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Persona Repository
// ============================================================================

/// 人设实体（种子化的只读行）
#[derive(Debug, Clone)]
pub struct PersonaRecord {
    /// 类型标签即主键（如 "casual-reader"）
    pub id: String,
    pub name: String,
    pub description: String,
    pub evaluation_criteria: String,
    pub tone: String,
}

/// Persona Repository Port
#[async_trait]
pub trait PersonaRepositoryPort: Send + Sync {
    /// 获取全部人设（种子顺序，初始化后恒为六个）
    async fn find_all(&self) -> Result<Vec<PersonaRecord>, RepositoryError>;
}

// ============================================================================
// Review Repository
// ============================================================================

/// 评论实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub id: Uuid,
    pub chapter_id: Uuid,
    /// 人设类型标签
    pub persona_id: String,
    pub review_text: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

/// 评论 + 人设名称（用于查询展示）
#[derive(Debug, Clone)]
pub struct ReviewWithPersona {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub persona_id: String,
    pub persona_name: String,
    pub review_text: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

/// Review Repository Port
#[async_trait]
pub trait ReviewRepositoryPort: Send + Sync {
    /// 保存评论
    async fn insert(&self, review: &ReviewRecord) -> Result<(), RepositoryError>;

    /// 获取章节的所有评论（按人设种子顺序）
    async fn find_by_chapter(
        &self,
        chapter_id: Uuid,
    ) -> Result<Vec<ReviewWithPersona>, RepositoryError>;
}
