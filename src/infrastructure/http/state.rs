//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateNovelHandler, DeleteChapterHandler, DeleteNovelHandler, LoginUserHandler,
    RegisterUserHandler, SubmitChapterHandler, UpdateChapterHandler, UpdateNovelHandler,
    // Query handlers
    GetChapterWithReviewsHandler, GetNovelHandler, ListNovelsHandler, ListPersonasHandler,
    // Ports
    ChapterRepositoryPort, NovelRepositoryPort, PersonaRepositoryPort, ReviewRepositoryPort,
    TextGeneratorPort, TokenStorePort, UserRepositoryPort,
    // Review generation
    ReviewGenerator, ReviewGeneratorConfig,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub user_repo: Arc<dyn UserRepositoryPort>,
    pub novel_repo: Arc<dyn NovelRepositoryPort>,
    pub chapter_repo: Arc<dyn ChapterRepositoryPort>,
    pub review_repo: Arc<dyn ReviewRepositoryPort>,
    pub persona_repo: Arc<dyn PersonaRepositoryPort>,
    pub token_store: Arc<dyn TokenStorePort>,
    pub text_generator: Arc<dyn TextGeneratorPort>,

    // ========== Command Handlers ==========
    pub register_user_handler: RegisterUserHandler,
    pub login_user_handler: LoginUserHandler,
    pub create_novel_handler: CreateNovelHandler,
    pub update_novel_handler: UpdateNovelHandler,
    pub delete_novel_handler: DeleteNovelHandler,
    pub submit_chapter_handler: SubmitChapterHandler,
    pub update_chapter_handler: UpdateChapterHandler,
    pub delete_chapter_handler: DeleteChapterHandler,

    // ========== Query Handlers ==========
    pub list_novels_handler: ListNovelsHandler,
    pub get_novel_handler: GetNovelHandler,
    pub get_chapter_handler: GetChapterWithReviewsHandler,
    pub list_personas_handler: ListPersonasHandler,
}

impl AppState {
    /// 创建应用状态
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        novel_repo: Arc<dyn NovelRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        review_repo: Arc<dyn ReviewRepositoryPort>,
        persona_repo: Arc<dyn PersonaRepositoryPort>,
        token_store: Arc<dyn TokenStorePort>,
        text_generator: Arc<dyn TextGeneratorPort>,
        review_config: ReviewGeneratorConfig,
    ) -> Self {
        let review_generator = Arc::new(ReviewGenerator::new(
            text_generator.clone(),
            review_config,
        ));

        Self {
            // Ports
            user_repo: user_repo.clone(),
            novel_repo: novel_repo.clone(),
            chapter_repo: chapter_repo.clone(),
            review_repo: review_repo.clone(),
            persona_repo: persona_repo.clone(),
            token_store: token_store.clone(),
            text_generator,

            // Command handlers
            register_user_handler: RegisterUserHandler::new(
                user_repo.clone(),
                token_store.clone(),
            ),
            login_user_handler: LoginUserHandler::new(user_repo, token_store),
            create_novel_handler: CreateNovelHandler::new(novel_repo.clone()),
            update_novel_handler: UpdateNovelHandler::new(novel_repo.clone()),
            delete_novel_handler: DeleteNovelHandler::new(novel_repo.clone()),
            submit_chapter_handler: SubmitChapterHandler::new(
                novel_repo.clone(),
                chapter_repo.clone(),
                review_repo.clone(),
                persona_repo.clone(),
                review_generator,
            ),
            update_chapter_handler: UpdateChapterHandler::new(chapter_repo.clone()),
            delete_chapter_handler: DeleteChapterHandler::new(chapter_repo.clone()),

            // Query handlers
            list_novels_handler: ListNovelsHandler::new(novel_repo.clone()),
            get_novel_handler: GetNovelHandler::new(novel_repo, chapter_repo.clone()),
            get_chapter_handler: GetChapterWithReviewsHandler::new(chapter_repo, review_repo),
            list_personas_handler: ListPersonasHandler::new(persona_repo),
        }
    }
}
