//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod repositories;
mod text_generator;
mod token_store;

pub use repositories::{
    ChapterRecord, ChapterRepositoryPort, ChapterWithNovel, NovelRecord, NovelRepositoryPort,
    NovelSummary, PersonaRecord, PersonaRepositoryPort, RepositoryError, ReviewRecord,
    ReviewRepositoryPort, ReviewWithPersona, UserRecord, UserRepositoryPort,
};
pub use text_generator::{GenerateTextRequest, GenerationError, ModelTier, TextGeneratorPort};
pub use token_store::TokenStorePort;
