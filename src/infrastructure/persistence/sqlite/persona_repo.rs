//! SQLite Persona Repository
//!
//! 人设目录由迁移种子化，这里只读

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{PersonaRecord, PersonaRepositoryPort, RepositoryError};

/// SQLite Persona Repository
pub struct SqlitePersonaRepository {
    pool: DbPool,
}

impl SqlitePersonaRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PersonaRow {
    id: String,
    name: String,
    description: String,
    evaluation_criteria: String,
    tone: String,
}

impl From<PersonaRow> for PersonaRecord {
    fn from(row: PersonaRow) -> Self {
        PersonaRecord {
            id: row.id,
            name: row.name,
            description: row.description,
            evaluation_criteria: row.evaluation_criteria,
            tone: row.tone,
        }
    }
}

#[async_trait]
impl PersonaRepositoryPort for SqlitePersonaRepository {
    async fn find_all(&self) -> Result<Vec<PersonaRecord>, RepositoryError> {
        let rows: Vec<PersonaRow> = sqlx::query_as(
            "SELECT id, name, description, evaluation_criteria, tone FROM personas ORDER BY seed_order ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(PersonaRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::persona::CATALOG;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    #[tokio::test]
    async fn test_catalog_seeded_in_order() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let repo = SqlitePersonaRepository::new(pool);
        let personas = repo.find_all().await.unwrap();

        assert_eq!(personas.len(), 6);
        for (record, persona) in personas.iter().zip(CATALOG.iter()) {
            assert_eq!(record.id, persona.persona_type.as_str());
            assert_eq!(record.name, persona.name);
            assert_eq!(record.tone, persona.tone);
        }
    }

    #[tokio::test]
    async fn test_find_all_is_stable() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let repo = SqlitePersonaRepository::new(pool);
        let first: Vec<String> = repo.find_all().await.unwrap().into_iter().map(|p| p.id).collect();
        let second: Vec<String> = repo.find_all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(first, second);
    }
}
