//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextGenerator、Repository、TokenStore）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - review_generator: 单个 (章节, 人设) 的评论生成
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod review_generator;

// Re-exports
pub use commands::{
    // Auth commands
    LoginUser,
    RegisterUser,
    // Chapter commands
    DeleteChapter,
    SubmitChapter,
    UpdateChapter,
    // Novel commands
    CreateNovel,
    DeleteNovel,
    UpdateNovel,
    // Handlers
    handlers::{
        AuthResponse, CreateNovelHandler, CreateNovelResponse, DeleteChapterHandler,
        DeleteNovelHandler, LoginUserHandler, RegisterUserHandler, SubmitChapterHandler,
        SubmitChapterResponse, UpdateChapterHandler, UpdateNovelHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Repositories
    ChapterRecord,
    ChapterRepositoryPort,
    ChapterWithNovel,
    NovelRecord,
    NovelRepositoryPort,
    NovelSummary,
    PersonaRecord,
    PersonaRepositoryPort,
    RepositoryError,
    ReviewRecord,
    ReviewRepositoryPort,
    ReviewWithPersona,
    UserRecord,
    UserRepositoryPort,
    // Text generator
    GenerateTextRequest,
    GenerationError,
    ModelTier,
    TextGeneratorPort,
    // Token store
    TokenStorePort,
};

pub use queries::{
    // Chapter queries
    GetChapterWithReviews,
    // Novel queries
    GetNovel,
    ListNovels,
    // Persona queries
    ListPersonas,
    // Handlers
    handlers::{
        ChapterDetailResponse, ChapterSummaryResponse, GetChapterWithReviewsHandler,
        GetNovelHandler, ListNovelsHandler, ListPersonasHandler, NovelDetailResponse,
        NovelSummaryResponse, PersonaResponse, ReviewResponse,
    },
};

pub use review_generator::{
    GeneratedReview, ReviewGenerator, ReviewGeneratorConfig, ReviewInput,
};
