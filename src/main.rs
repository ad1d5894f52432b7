//! Recrit - 连载小说 AI 评审系统
//!
//! 架构:
//! - Domain: persona/, review/ (Bounded Contexts)
//! - Application: commands, queries, ports, review_generator
//! - Infrastructure: http, persistence, adapters, memory

use std::sync::Arc;

use recrit::application::ReviewGeneratorConfig;
use recrit::config::{load_config, print_config};
use recrit::infrastructure::adapters::{HttpLlmClient, HttpLlmClientConfig};
// use recrit::infrastructure::adapters::{FakeLlmClient, FakeLlmClientConfig};
use recrit::infrastructure::http::{AppState, HttpServer, ServerConfig};
use recrit::infrastructure::memory::InMemoryTokenStore;
use recrit::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteChapterRepository, SqliteNovelRepository,
    SqlitePersonaRepository, SqliteReviewRepository, SqliteUserRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},recrit={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Recrit - 连载小说 AI 评审系统");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let novel_repo = Arc::new(SqliteNovelRepository::new(pool.clone()));
    let chapter_repo = Arc::new(SqliteChapterRepository::new(pool.clone()));
    let review_repo = Arc::new(SqliteReviewRepository::new(pool.clone()));
    let persona_repo = Arc::new(SqlitePersonaRepository::new(pool.clone()));

    // 人设目录不完整属于启动级错误，直接退出
    use recrit::application::ports::PersonaRepositoryPort;
    let personas = persona_repo.find_all().await?;
    if personas.len() != recrit::domain::persona::CATALOG.len() {
        anyhow::bail!(
            "Persona catalog incomplete: {}/{} seeded",
            personas.len(),
            recrit::domain::persona::CATALOG.len()
        );
    }
    tracing::info!(count = personas.len(), "Persona catalog loaded");

    // 创建 HTTP LLM 客户端
    let llm_config = HttpLlmClientConfig {
        base_url: config.generation.url.clone(),
        api_key: config.generation.api_key.clone(),
        model_standard: config.generation.model_standard.clone(),
        model_premium: config.generation.model_premium.clone(),
        timeout_secs: config.generation.timeout_secs,
    };
    let text_generator = Arc::new(HttpLlmClient::new(llm_config)?);

    // // 创建 Fake LLM 客户端（离线测试用，始终返回固定评论）
    // let llm_config = FakeLlmClientConfig {
    //     rating: 8,
    //     delay_ms: 200,
    // };
    // let text_generator = Arc::new(FakeLlmClient::new(llm_config));

    // 创建内存令牌存储
    let token_store = Arc::new(InMemoryTokenStore::new());

    // 评论生成配置
    let review_config = ReviewGeneratorConfig {
        short_content_threshold: config.generation.short_content_threshold,
        max_output_tokens: config.generation.max_output_tokens,
        temperature: config.generation.temperature,
    };

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        user_repo,
        novel_repo,
        chapter_repo,
        review_repo,
        persona_repo,
        token_store,
        text_generator,
        review_config,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
