//! SQLite Chapter Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    ChapterRecord, ChapterRepositoryPort, ChapterWithNovel, RepositoryError,
};
use crate::domain::review::PriorChapter;

/// SQLite Chapter Repository
pub struct SqliteChapterRepository {
    pool: DbPool,
}

impl SqliteChapterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ChapterRow {
    id: String,
    novel_id: String,
    chapter_number: i64,
    title: String,
    content: String,
    word_count: i64,
    created_at: String,
}

impl TryFrom<ChapterRow> for ChapterRecord {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(ChapterRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            novel_id: Uuid::parse_str(&row.novel_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            chapter_number: row.chapter_number,
            title: row.title,
            content: row.content,
            word_count: row.word_count,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[derive(FromRow)]
struct ChapterWithNovelRow {
    id: String,
    novel_id: String,
    chapter_number: i64,
    title: String,
    content: String,
    word_count: i64,
    created_at: String,
    novel_title: String,
    owner_id: String,
}

impl TryFrom<ChapterWithNovelRow> for ChapterWithNovel {
    type Error = RepositoryError;

    fn try_from(row: ChapterWithNovelRow) -> Result<Self, Self::Error> {
        let owner_id = Uuid::parse_str(&row.owner_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let chapter = ChapterRecord::try_from(ChapterRow {
            id: row.id,
            novel_id: row.novel_id,
            chapter_number: row.chapter_number,
            title: row.title,
            content: row.content,
            word_count: row.word_count,
            created_at: row.created_at,
        })?;

        Ok(ChapterWithNovel {
            chapter,
            novel_title: row.novel_title,
            owner_id,
        })
    }
}

#[derive(FromRow)]
struct PriorChapterRow {
    chapter_number: i64,
    title: String,
    content: String,
}

#[async_trait]
impl ChapterRepositoryPort for SqliteChapterRepository {
    async fn insert(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chapters (id, novel_id, chapter_number, title, content, word_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(chapter.id.to_string())
        .bind(chapter.novel_id.to_string())
        .bind(chapter.chapter_number)
        .bind(&chapter.title)
        .bind(&chapter.content)
        .bind(chapter.word_count)
        .bind(chapter.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map_or(false, |db| db.is_unique_violation())
            {
                RepositoryError::Duplicate(format!(
                    "chapter {} of novel {}",
                    chapter.chapter_number, chapter.novel_id
                ))
            } else {
                RepositoryError::DatabaseError(e.to_string())
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChapterRecord>, RepositoryError> {
        let row: Option<ChapterRow> = sqlx::query_as(
            "SELECT id, novel_id, chapter_number, title, content, word_count, created_at FROM chapters WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn find_with_novel(
        &self,
        id: Uuid,
    ) -> Result<Option<ChapterWithNovel>, RepositoryError> {
        let row: Option<ChapterWithNovelRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.novel_id, c.chapter_number, c.title, c.content, c.word_count,
                   c.created_at, n.title AS novel_title, n.user_id AS owner_id
            FROM chapters c
            JOIN novels n ON c.novel_id = n.id
            WHERE c.id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(ChapterWithNovel::try_from).transpose()
    }

    async fn find_all_by_novel(
        &self,
        novel_id: Uuid,
    ) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            "SELECT id, novel_id, chapter_number, title, content, word_count, created_at FROM chapters WHERE novel_id = ? ORDER BY chapter_number ASC",
        )
        .bind(novel_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ChapterRecord::try_from).collect()
    }

    async fn find_prior(
        &self,
        novel_id: Uuid,
        before_chapter_number: i64,
    ) -> Result<Vec<PriorChapter>, RepositoryError> {
        let rows: Vec<PriorChapterRow> = sqlx::query_as(
            r#"
            SELECT chapter_number, title, content
            FROM chapters
            WHERE novel_id = ? AND chapter_number < ?
            ORDER BY chapter_number ASC
            "#,
        )
        .bind(novel_id.to_string())
        .bind(before_chapter_number)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| PriorChapter {
                chapter_number: row.chapter_number,
                title: row.title,
                content: row.content,
            })
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
        word_count: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE chapters SET title = ?, content = ?, word_count = ? WHERE id = ?",
        )
        .bind(title)
        .bind(content)
        .bind(word_count)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("chapter {}", id)));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // 评论由外键级联删除
        let result = sqlx::query("DELETE FROM chapters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("chapter {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NovelRecord, NovelRepositoryPort, UserRecord, UserRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteNovelRepository, SqliteUserRepository,
    };

    async fn setup() -> (DbPool, Uuid) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let user_id = Uuid::new_v4();
        SqliteUserRepository::new(pool.clone())
            .insert(&UserRecord {
                id: user_id,
                username: "author".to_string(),
                email: "author@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let novel_id = Uuid::new_v4();
        SqliteNovelRepository::new(pool.clone())
            .insert(&NovelRecord {
                id: novel_id,
                user_id,
                title: "山雾".to_string(),
                description: String::new(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        (pool, novel_id)
    }

    fn chapter(novel_id: Uuid, number: i64, content: &str) -> ChapterRecord {
        ChapterRecord {
            id: Uuid::new_v4(),
            novel_id,
            chapter_number: number,
            title: format!("第{}章", number),
            content: content.to_string(),
            word_count: content.chars().count() as i64,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_chapter_number_rejected() {
        let (pool, novel_id) = setup().await;
        let repo = SqliteChapterRepository::new(pool);

        repo.insert(&chapter(novel_id, 1, "内容")).await.unwrap();
        let result = repo.insert(&chapter(novel_id, 1, "另一份内容")).await;

        assert!(matches!(result, Err(RepositoryError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_find_prior_is_ordered_and_strict() {
        let (pool, novel_id) = setup().await;
        let repo = SqliteChapterRepository::new(pool);

        // 乱序插入
        repo.insert(&chapter(novel_id, 3, "三")).await.unwrap();
        repo.insert(&chapter(novel_id, 1, "一")).await.unwrap();
        repo.insert(&chapter(novel_id, 2, "二")).await.unwrap();

        let prior = repo.find_prior(novel_id, 3).await.unwrap();
        assert_eq!(
            prior.iter().map(|c| c.chapter_number).collect::<Vec<_>>(),
            vec![1, 2]
        );

        // 第一章：空序列而不是错误
        let none = repo.find_prior(novel_id, 1).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_prior_is_idempotent() {
        let (pool, novel_id) = setup().await;
        let repo = SqliteChapterRepository::new(pool);

        repo.insert(&chapter(novel_id, 1, "一")).await.unwrap();
        repo.insert(&chapter(novel_id, 2, "二")).await.unwrap();

        let first = repo.find_prior(novel_id, 5).await.unwrap();
        let second = repo.find_prior(novel_id, 5).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_find_with_novel_carries_owner() {
        let (pool, novel_id) = setup().await;
        let repo = SqliteChapterRepository::new(pool);

        let record = chapter(novel_id, 1, "内容");
        repo.insert(&record).await.unwrap();

        let found = repo.find_with_novel(record.id).await.unwrap().unwrap();
        assert_eq!(found.novel_title, "山雾");
        assert_eq!(found.chapter.chapter_number, 1);
    }

    #[tokio::test]
    async fn test_novel_delete_cascades_to_chapters() {
        let (pool, novel_id) = setup().await;
        let repo = SqliteChapterRepository::new(pool.clone());

        repo.insert(&chapter(novel_id, 1, "内容")).await.unwrap();

        SqliteNovelRepository::new(pool)
            .delete(novel_id)
            .await
            .unwrap();

        let remaining = repo.find_all_by_novel(novel_id).await.unwrap();
        assert!(remaining.is_empty());
    }
}
