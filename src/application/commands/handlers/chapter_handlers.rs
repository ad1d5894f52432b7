//! Chapter Command Handlers
//!
//! SubmitChapterHandler 是评论生成的编排器：
//! 校验 → 归属 → 插入章节 → 六个人设并发生成评论 → 全部落定后返回。
//! 章节插入成功后，评论生成失败只降级为警告，绝不丢章节。

use chrono::Utc;
use futures_util::future;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{DeleteChapter, SubmitChapter, UpdateChapter};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterRecord, ChapterRepositoryPort, NovelRepositoryPort, PersonaRecord,
    PersonaRepositoryPort, RepositoryError, ReviewRecord, ReviewRepositoryPort,
};
use crate::application::review_generator::{ReviewGenerator, ReviewInput};

/// 提交章节响应
#[derive(Debug, Clone)]
pub struct SubmitChapterResponse {
    pub chapter_id: Uuid,
    pub chapter_number: i64,
    pub title: String,
    pub word_count: i64,
    /// 成功落库的评论数
    pub reviews_created: usize,
    /// 生成或落库失败的人设名（空表示全部成功）
    pub failed_personas: Vec<String>,
}

/// SubmitChapter Handler - 评论生成编排器
pub struct SubmitChapterHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    review_repo: Arc<dyn ReviewRepositoryPort>,
    persona_repo: Arc<dyn PersonaRepositoryPort>,
    review_generator: Arc<ReviewGenerator>,
}

impl SubmitChapterHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        review_repo: Arc<dyn ReviewRepositoryPort>,
        persona_repo: Arc<dyn PersonaRepositoryPort>,
        review_generator: Arc<ReviewGenerator>,
    ) -> Self {
        Self {
            novel_repo,
            chapter_repo,
            review_repo,
            persona_repo,
            review_generator,
        }
    }

    pub async fn handle(
        &self,
        command: SubmitChapter,
    ) -> Result<SubmitChapterResponse, ApplicationError> {
        // 1. 字段校验（任何副作用之前）
        if command.title.trim().is_empty() {
            return Err(ApplicationError::validation("Chapter title is required"));
        }
        if command.content.trim().is_empty() {
            return Err(ApplicationError::validation("Chapter content is required"));
        }
        if command.chapter_number < 1 {
            return Err(ApplicationError::validation(
                "Chapter number must be at least 1",
            ));
        }

        // 2. 归属校验：非本人小说按不存在处理
        let novel = self
            .novel_repo
            .find_by_id(command.novel_id)
            .await?
            .filter(|n| n.user_id == command.user_id)
            .ok_or_else(|| ApplicationError::not_found("Novel", command.novel_id))?;

        // 3. 插入章节；重复章节号 → 冲突
        let word_count = command.content.chars().count() as i64;
        let chapter = ChapterRecord {
            id: Uuid::new_v4(),
            novel_id: novel.id,
            chapter_number: command.chapter_number,
            title: command.title.trim().to_string(),
            content: command.content,
            word_count,
            created_at: Utc::now(),
        };

        self.chapter_repo.insert(&chapter).await.map_err(|e| match e {
            RepositoryError::Duplicate(_) => ApplicationError::conflict(format!(
                "Chapter {} already exists in novel {}",
                chapter.chapter_number, novel.id
            )),
            other => other.into(),
        })?;

        tracing::info!(
            chapter_id = %chapter.id,
            novel_id = %novel.id,
            chapter_number = chapter.chapter_number,
            word_count = chapter.word_count,
            "Chapter created"
        );

        // 4. 评论生成阶段：目录与前情各读一次，供所有人设共享
        let personas = self.persona_repo.find_all().await?;
        let prior_chapters = self
            .chapter_repo
            .find_prior(novel.id, chapter.chapter_number)
            .await?;

        let input = ReviewInput {
            chapter_number: chapter.chapter_number,
            chapter_title: chapter.title.clone(),
            chapter_content: chapter.content.clone(),
            prior_chapters,
        };

        // 并发扇出：每个人设一个任务，各自落库，互不等待；
        // join_all 等全部落定（成功或失败）后才返回 —— 不是 race
        let attempts = personas.iter().map(|persona| {
            self.generate_and_persist(&input, persona, chapter.id)
        });
        let results = future::join_all(attempts).await;

        let failed_personas: Vec<String> = results.into_iter().filter_map(Result::err).collect();
        let reviews_created = personas.len() - failed_personas.len();

        if failed_personas.is_empty() {
            tracing::info!(
                chapter_id = %chapter.id,
                reviews = reviews_created,
                "Chapter created with all reviews"
            );
        } else {
            tracing::warn!(
                chapter_id = %chapter.id,
                reviews = reviews_created,
                failed = ?failed_personas,
                "Chapter created with partial reviews"
            );
        }

        Ok(SubmitChapterResponse {
            chapter_id: chapter.id,
            chapter_number: chapter.chapter_number,
            title: chapter.title,
            word_count: chapter.word_count,
            reviews_created,
            failed_personas,
        })
    }

    /// 单个人设的生成 + 落库；失败隔离到该人设，返回其名称
    async fn generate_and_persist(
        &self,
        input: &ReviewInput,
        persona: &PersonaRecord,
        chapter_id: Uuid,
    ) -> Result<(), String> {
        let generated = match self.review_generator.generate(input, persona).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::error!(
                    chapter_id = %chapter_id,
                    persona = %persona.name,
                    error = %e,
                    "Review generation failed"
                );
                return Err(persona.name.clone());
            }
        };

        let record = ReviewRecord {
            id: Uuid::new_v4(),
            chapter_id,
            persona_id: persona.id.clone(),
            review_text: generated.review_text,
            rating: generated.rating.value(),
            created_at: Utc::now(),
        };

        match self.review_repo.insert(&record).await {
            Ok(()) => {
                tracing::info!(
                    chapter_id = %chapter_id,
                    persona = %persona.name,
                    rating = record.rating,
                    "Review persisted"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    chapter_id = %chapter_id,
                    persona = %persona.name,
                    error = %e,
                    "Review persist failed"
                );
                Err(persona.name.clone())
            }
        }
    }
}

/// UpdateChapter Handler
///
/// 只更新标题/内容/字数，已有评论保持不动，不触发重新生成
pub struct UpdateChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl UpdateChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, command: UpdateChapter) -> Result<(), ApplicationError> {
        if command.title.trim().is_empty() {
            return Err(ApplicationError::validation("Chapter title is required"));
        }
        if command.content.trim().is_empty() {
            return Err(ApplicationError::validation("Chapter content is required"));
        }

        let chapter = self
            .chapter_repo
            .find_with_novel(command.chapter_id)
            .await?
            .filter(|c| c.owner_id == command.user_id)
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.chapter_id))?;

        let word_count = command.content.chars().count() as i64;
        self.chapter_repo
            .update(
                chapter.chapter.id,
                command.title.trim(),
                &command.content,
                word_count,
            )
            .await?;

        tracing::info!(chapter_id = %chapter.chapter.id, word_count, "Chapter updated");

        Ok(())
    }
}

/// DeleteChapter Handler
pub struct DeleteChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl DeleteChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, command: DeleteChapter) -> Result<(), ApplicationError> {
        let chapter = self
            .chapter_repo
            .find_with_novel(command.chapter_id)
            .await?
            .filter(|c| c.owner_id == command.user_id)
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.chapter_id))?;

        // 外键级联只删除该章节自己的评论
        self.chapter_repo.delete(chapter.chapter.id).await?;

        tracing::info!(chapter_id = %chapter.chapter.id, "Chapter deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::{
        GenerateTextRequest, GenerationError, NovelRecord, TextGeneratorPort, UserRecord,
        UserRepositoryPort,
    };
    use crate::application::review_generator::ReviewGeneratorConfig;
    use crate::infrastructure::adapters::{FakeLlmClient, FakeLlmClientConfig};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteChapterRepository,
        SqliteNovelRepository, SqlitePersonaRepository, SqliteReviewRepository,
        SqliteUserRepository,
    };

    /// 对指定人设失败、其余成功的桩后端
    struct SelectiveFailGenerator {
        fail_when_system_contains: Vec<String>,
        requests: Mutex<Vec<GenerateTextRequest>>,
    }

    impl SelectiveFailGenerator {
        fn new(fail_names: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                fail_when_system_contains: fail_names.iter().map(|s| s.to_string()).collect(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn system_texts(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.system_text.clone())
                .collect()
        }
    }

    #[async_trait]
    impl TextGeneratorPort for SelectiveFailGenerator {
        async fn generate(
            &self,
            request: GenerateTextRequest,
        ) -> Result<String, GenerationError> {
            let fail = self
                .fail_when_system_contains
                .iter()
                .any(|name| request.system_text.contains(name));
            self.requests.lock().unwrap().push(request);

            if fail {
                Err(GenerationError::ServiceError("backend down".to_string()))
            } else {
                Ok("## 总体评价\n整体流畅。\n\n评分: 8".to_string())
            }
        }
    }

    struct TestContext {
        novel_repo: Arc<SqliteNovelRepository>,
        chapter_repo: Arc<SqliteChapterRepository>,
        review_repo: Arc<SqliteReviewRepository>,
        persona_repo: Arc<SqlitePersonaRepository>,
        user_id: Uuid,
        novel_id: Uuid,
    }

    async fn setup() -> TestContext {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let user_repo = SqliteUserRepository::new(pool.clone());
        let user_id = Uuid::new_v4();
        user_repo
            .insert(&UserRecord {
                id: user_id,
                username: "author".to_string(),
                email: "author@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let novel_repo = Arc::new(SqliteNovelRepository::new(pool.clone()));
        let novel_id = Uuid::new_v4();
        novel_repo
            .insert(&NovelRecord {
                id: novel_id,
                user_id,
                title: "山雾".to_string(),
                description: "一部连载小说".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        TestContext {
            novel_repo,
            chapter_repo: Arc::new(SqliteChapterRepository::new(pool.clone())),
            review_repo: Arc::new(SqliteReviewRepository::new(pool.clone())),
            persona_repo: Arc::new(SqlitePersonaRepository::new(pool)),
            user_id,
            novel_id,
        }
    }

    fn handler(ctx: &TestContext, generator: Arc<dyn TextGeneratorPort>) -> SubmitChapterHandler {
        SubmitChapterHandler::new(
            ctx.novel_repo.clone(),
            ctx.chapter_repo.clone(),
            ctx.review_repo.clone(),
            ctx.persona_repo.clone(),
            Arc::new(ReviewGenerator::new(
                generator,
                ReviewGeneratorConfig::default(),
            )),
        )
    }

    fn submit(ctx: &TestContext, number: i64, content: &str) -> SubmitChapter {
        SubmitChapter {
            user_id: ctx.user_id,
            novel_id: ctx.novel_id,
            chapter_number: number,
            title: format!("第{}章", number),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_chapter_generates_six_reviews() {
        let ctx = setup().await;
        let fake = Arc::new(FakeLlmClient::new(FakeLlmClientConfig::default()));
        let handler = handler(&ctx, fake);

        let content = "雾从山脚漫上来，把整条石板路吞了进去。";
        let response = handler.handle(submit(&ctx, 1, content)).await.unwrap();

        assert_eq!(response.reviews_created, 6);
        assert!(response.failed_personas.is_empty());
        assert_eq!(response.word_count, content.chars().count() as i64);

        let reviews = ctx
            .review_repo
            .find_by_chapter(response.chapter_id)
            .await
            .unwrap();
        assert_eq!(reviews.len(), 6);
        for review in &reviews {
            assert!((1..=10).contains(&review.rating));
            assert!(!review.review_text.contains("评分"));
        }
    }

    #[tokio::test]
    async fn test_partial_failure_still_creates_chapter() {
        let ctx = setup().await;
        let generator = SelectiveFailGenerator::new(&["文学评论家", "出版编辑"]);
        let handler = handler(&ctx, generator);

        let response = handler
            .handle(submit(&ctx, 1, "开篇的内容。"))
            .await
            .unwrap();

        assert_eq!(response.reviews_created, 4);
        assert_eq!(response.failed_personas.len(), 2);
        assert!(response.failed_personas.contains(&"文学评论家".to_string()));
        assert!(response.failed_personas.contains(&"出版编辑".to_string()));

        let reviews = ctx
            .review_repo
            .find_by_chapter(response.chapter_id)
            .await
            .unwrap();
        assert_eq!(reviews.len(), 4);
    }

    #[tokio::test]
    async fn test_all_personas_failing_still_creates_chapter() {
        let ctx = setup().await;
        let generator = SelectiveFailGenerator::new(&["你是"]); // 所有系统提示词都以此开头
        let handler = handler(&ctx, generator);

        let response = handler.handle(submit(&ctx, 1, "内容。")).await.unwrap();

        assert_eq!(response.reviews_created, 0);
        assert_eq!(response.failed_personas.len(), 6);

        let chapter = ctx
            .chapter_repo
            .find_by_id(response.chapter_id)
            .await
            .unwrap();
        assert!(chapter.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_chapter_number_conflicts() {
        let ctx = setup().await;
        let fake = Arc::new(FakeLlmClient::new(FakeLlmClientConfig::default()));
        let handler = handler(&ctx, fake);

        let first = handler.handle(submit(&ctx, 1, "第一次提交。")).await.unwrap();

        let result = handler.handle(submit(&ctx, 1, "重复提交。")).await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));

        // 冲突的提交不产生任何评论行
        let reviews = ctx
            .review_repo
            .find_by_chapter(first.chapter_id)
            .await
            .unwrap();
        assert_eq!(reviews.len(), 6);

        let chapters = ctx
            .chapter_repo
            .find_all_by_novel(ctx.novel_id)
            .await
            .unwrap();
        assert_eq!(chapters.len(), 1);
    }

    #[tokio::test]
    async fn test_validation_rejected_before_side_effects() {
        let ctx = setup().await;
        let fake = Arc::new(FakeLlmClient::new(FakeLlmClientConfig::default()));
        let handler = handler(&ctx, fake);

        let mut command = submit(&ctx, 1, "内容。");
        command.title = "  ".to_string();
        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::ValidationError(_))
        ));

        let mut command = submit(&ctx, 1, "内容。");
        command.content = String::new();
        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::ValidationError(_))
        ));

        let command = submit(&ctx, 0, "内容。");
        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::ValidationError(_))
        ));

        let chapters = ctx
            .chapter_repo
            .find_all_by_novel(ctx.novel_id)
            .await
            .unwrap();
        assert!(chapters.is_empty());
    }

    #[tokio::test]
    async fn test_foreign_novel_rejected() {
        let ctx = setup().await;
        let fake = Arc::new(FakeLlmClient::new(FakeLlmClientConfig::default()));
        let handler = handler(&ctx, fake);

        let mut command = submit(&ctx, 1, "内容。");
        command.user_id = Uuid::new_v4();

        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_prior_chapters_flow_into_prompts() {
        let ctx = setup().await;
        let generator = SelectiveFailGenerator::new(&[]);
        let handler = handler(&ctx, generator.clone());

        handler.handle(submit(&ctx, 1, "第一章内容。")).await.unwrap();
        handler.handle(submit(&ctx, 2, "第二章内容。")).await.unwrap();

        generator.requests.lock().unwrap().clear();
        handler.handle(submit(&ctx, 3, "第三章内容。")).await.unwrap();

        // 第三章的每个系统提示词都按升序列出前两章
        let system_texts = generator.system_texts();
        assert_eq!(system_texts.len(), 6);
        for text in &system_texts {
            let first = text.find("第1章").expect("chapter 1 listed");
            let second = text.find("第2章").expect("chapter 2 listed");
            assert!(first < second);
            assert!(!text.contains("第3章 "));
        }
    }

    #[tokio::test]
    async fn test_update_chapter_keeps_reviews() {
        let ctx = setup().await;
        let fake = Arc::new(FakeLlmClient::new(FakeLlmClientConfig::default()));
        let submit_handler = handler(&ctx, fake);

        let created = submit_handler
            .handle(submit(&ctx, 1, "原始内容。"))
            .await
            .unwrap();

        let update_handler = UpdateChapterHandler::new(ctx.chapter_repo.clone());
        update_handler
            .handle(UpdateChapter {
                user_id: ctx.user_id,
                chapter_id: created.chapter_id,
                title: "改名".to_string(),
                content: "修改后的更长的内容。".to_string(),
            })
            .await
            .unwrap();

        let chapter = ctx
            .chapter_repo
            .find_by_id(created.chapter_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(chapter.title, "改名");
        assert_eq!(chapter.word_count, "修改后的更长的内容。".chars().count() as i64);

        // 评论原样保留，不重新生成
        let reviews = ctx
            .review_repo
            .find_by_chapter(created.chapter_id)
            .await
            .unwrap();
        assert_eq!(reviews.len(), 6);
    }

    #[tokio::test]
    async fn test_delete_chapter_removes_only_its_reviews() {
        let ctx = setup().await;
        let fake = Arc::new(FakeLlmClient::new(FakeLlmClientConfig::default()));
        let submit_handler = handler(&ctx, fake);

        let first = submit_handler.handle(submit(&ctx, 1, "第一章。")).await.unwrap();
        let second = submit_handler.handle(submit(&ctx, 2, "第二章。")).await.unwrap();

        let delete_handler = DeleteChapterHandler::new(ctx.chapter_repo.clone());
        delete_handler
            .handle(DeleteChapter {
                user_id: ctx.user_id,
                chapter_id: first.chapter_id,
            })
            .await
            .unwrap();

        let gone = ctx.review_repo.find_by_chapter(first.chapter_id).await.unwrap();
        assert!(gone.is_empty());

        let kept = ctx.review_repo.find_by_chapter(second.chapter_id).await.unwrap();
        assert_eq!(kept.len(), 6);
    }
}
