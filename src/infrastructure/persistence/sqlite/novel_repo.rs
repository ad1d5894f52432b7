//! SQLite Novel Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    NovelRecord, NovelRepositoryPort, NovelSummary, RepositoryError,
};

/// SQLite Novel Repository
pub struct SqliteNovelRepository {
    pool: DbPool,
}

impl SqliteNovelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct NovelRow {
    id: String,
    user_id: String,
    title: String,
    description: String,
    created_at: String,
}

impl TryFrom<NovelRow> for NovelRecord {
    type Error = RepositoryError;

    fn try_from(row: NovelRow) -> Result<Self, Self::Error> {
        Ok(NovelRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            title: row.title,
            description: row.description,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[derive(FromRow)]
struct NovelSummaryRow {
    id: String,
    title: String,
    description: String,
    chapter_count: i64,
    created_at: String,
}

impl TryFrom<NovelSummaryRow> for NovelSummary {
    type Error = RepositoryError;

    fn try_from(row: NovelSummaryRow) -> Result<Self, Self::Error> {
        Ok(NovelSummary {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            title: row.title,
            description: row.description,
            chapter_count: row.chapter_count,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl NovelRepositoryPort for SqliteNovelRepository {
    async fn insert(&self, novel: &NovelRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO novels (id, user_id, title, description, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(novel.id.to_string())
        .bind(novel.user_id.to_string())
        .bind(&novel.title)
        .bind(&novel.description)
        .bind(novel.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NovelRecord>, RepositoryError> {
        let row: Option<NovelRow> = sqlx::query_as(
            "SELECT id, user_id, title, description, created_at FROM novels WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(NovelRecord::try_from).transpose()
    }

    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<NovelSummary>, RepositoryError> {
        let rows: Vec<NovelSummaryRow> = sqlx::query_as(
            r#"
            SELECT n.id, n.title, n.description, COUNT(c.id) AS chapter_count, n.created_at
            FROM novels n
            LEFT JOIN chapters c ON n.id = c.novel_id
            WHERE n.user_id = ?
            GROUP BY n.id
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(NovelSummary::try_from).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE novels SET title = ?, description = ? WHERE id = ?")
            .bind(title)
            .bind(description)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("novel {}", id)));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // 章节与评论由外键级联删除
        let result = sqlx::query("DELETE FROM novels WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("novel {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{UserRecord, UserRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteUserRepository,
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

        (pool, user_id)
    }

    fn novel(user_id: Uuid, title: &str) -> NovelRecord {
        NovelRecord {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (pool, user_id) = setup().await;
        let repo = SqliteNovelRepository::new(pool);

        let record = novel(user_id, "山雾");
        repo.insert(&record).await.unwrap();

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.title, "山雾");
        assert_eq!(found.user_id, user_id);
    }

    #[tokio::test]
    async fn test_list_only_own_novels() {
        let (pool, user_id) = setup().await;
        let repo = SqliteNovelRepository::new(pool.clone());

        repo.insert(&novel(user_id, "甲")).await.unwrap();
        repo.insert(&novel(user_id, "乙")).await.unwrap();

        let other_id = Uuid::new_v4();
        SqliteUserRepository::new(pool)
            .insert(&UserRecord {
                id: other_id,
                username: "other".to_string(),
                email: "other@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        repo.insert(&novel(other_id, "丙")).await.unwrap();

        let own = repo.find_all_by_user(user_id).await.unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|n| n.chapter_count == 0));
    }

    #[tokio::test]
    async fn test_update_missing_novel_not_found() {
        let (pool, _) = setup().await;
        let repo = SqliteNovelRepository::new(pool);

        let result = repo.update(Uuid::new_v4(), "x", "").await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }
}
