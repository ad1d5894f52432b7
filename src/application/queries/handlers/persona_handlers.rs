//! Persona Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{PersonaRecord, PersonaRepositoryPort};
use crate::application::queries::ListPersonas;

/// 人设响应
#[derive(Debug, Clone)]
pub struct PersonaResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub evaluation_criteria: String,
    pub tone: String,
}

impl From<PersonaRecord> for PersonaResponse {
    fn from(record: PersonaRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            evaluation_criteria: record.evaluation_criteria,
            tone: record.tone,
        }
    }
}

/// ListPersonas Handler
pub struct ListPersonasHandler {
    persona_repo: Arc<dyn PersonaRepositoryPort>,
}

impl ListPersonasHandler {
    pub fn new(persona_repo: Arc<dyn PersonaRepositoryPort>) -> Self {
        Self { persona_repo }
    }

    pub async fn handle(
        &self,
        _query: ListPersonas,
    ) -> Result<Vec<PersonaResponse>, ApplicationError> {
        let personas = self.persona_repo.find_all().await?;
        Ok(personas.into_iter().map(PersonaResponse::from).collect())
    }
}
