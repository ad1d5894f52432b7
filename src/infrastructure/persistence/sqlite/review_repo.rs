//! SQLite Review Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    RepositoryError, ReviewRecord, ReviewRepositoryPort, ReviewWithPersona,
};

/// SQLite Review Repository
pub struct SqliteReviewRepository {
    pool: DbPool,
}

impl SqliteReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ReviewWithPersonaRow {
    id: String,
    chapter_id: String,
    persona_id: String,
    persona_name: String,
    review_text: String,
    rating: i64,
    created_at: String,
}

impl TryFrom<ReviewWithPersonaRow> for ReviewWithPersona {
    type Error = RepositoryError;

    fn try_from(row: ReviewWithPersonaRow) -> Result<Self, Self::Error> {
        Ok(ReviewWithPersona {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            chapter_id: Uuid::parse_str(&row.chapter_id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            persona_id: row.persona_id,
            persona_name: row.persona_name,
            review_text: row.review_text,
            rating: row.rating,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl ReviewRepositoryPort for SqliteReviewRepository {
    async fn insert(&self, review: &ReviewRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, chapter_id, persona_id, review_text, rating, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.id.to_string())
        .bind(review.chapter_id.to_string())
        .bind(&review.persona_id)
        .bind(&review.review_text)
        .bind(review.rating)
        .bind(review.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_chapter(
        &self,
        chapter_id: Uuid,
    ) -> Result<Vec<ReviewWithPersona>, RepositoryError> {
        let rows: Vec<ReviewWithPersonaRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.chapter_id, r.persona_id, p.name AS persona_name,
                   r.review_text, r.rating, r.created_at
            FROM reviews r
            JOIN personas p ON r.persona_id = p.id
            WHERE r.chapter_id = ?
            ORDER BY p.seed_order ASC
            "#,
        )
        .bind(chapter_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ReviewWithPersona::try_from).collect()
    }
}
