//! SQLite Database - 数据库连接和迁移

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::persona::CATALOG;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/recrit.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
///
/// 连接级 PRAGMA 通过连接选项设置，保证对池中每条连接生效：
/// - WAL 模式，允许并发读写
/// - busy_timeout=5000ms，遇到锁时等待而不是立即失败
/// - synchronous=NORMAL，平衡性能和安全性
/// - 外键约束开启，小说→章节→评论 级联删除依赖它
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000))
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and foreign keys enabled");

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 创建 users 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 novels 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS novels (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 chapters 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chapters (
            id TEXT PRIMARY KEY,
            novel_id TEXT NOT NULL,
            chapter_number INTEGER NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            word_count INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (novel_id) REFERENCES novels(id) ON DELETE CASCADE,
            UNIQUE (novel_id, chapter_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 personas 表（类型标签即主键）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS personas (
            id TEXT PRIMARY KEY,
            name TEXT UNIQUE NOT NULL,
            description TEXT NOT NULL,
            evaluation_criteria TEXT NOT NULL,
            tone TEXT NOT NULL,
            seed_order INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 reviews 表
    // 注意：(chapter_id, persona_id) 刻意不加唯一约束，
    // 重复的生成运行会追加评论行
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id TEXT PRIMARY KEY,
            chapter_id TEXT NOT NULL,
            persona_id TEXT NOT NULL,
            review_text TEXT NOT NULL,
            rating INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 10),
            created_at TEXT NOT NULL,
            FOREIGN KEY (chapter_id) REFERENCES chapters(id) ON DELETE CASCADE,
            FOREIGN KEY (persona_id) REFERENCES personas(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建索引
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_novels_user_id
        ON novels(user_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_chapters_novel_id
        ON chapters(novel_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_reviews_chapter_id
        ON reviews(chapter_id)
        "#,
    )
    .execute(pool)
    .await?;

    seed_personas(pool).await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// 种子化人设目录（幂等，已存在的行不动）
async fn seed_personas(pool: &DbPool) -> Result<(), sqlx::Error> {
    for (order, persona) in CATALOG.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO personas (id, name, description, evaluation_criteria, tone, seed_order)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(persona.persona_type.as_str())
        .bind(persona.name)
        .bind(persona.description)
        .bind(persona.evaluation_criteria)
        .bind(persona.tone)
        .bind(order as i64)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_personas_seeded_once() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // 再跑一次迁移不产生重复行
        run_migrations(&pool).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM personas")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 6);
    }

    #[tokio::test]
    async fn test_rating_check_constraint() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        // 伪造前置行，直接试探 CHECK 约束
        sqlx::query("INSERT INTO users (id, username, email, password_hash, created_at) VALUES ('u', 'a', 'a@b.c', 'h', 't')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO novels (id, user_id, title, created_at) VALUES ('n', 'u', 't', 't')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO chapters (id, novel_id, chapter_number, title, content, word_count, created_at) VALUES ('c', 'n', 1, 't', 'x', 1, 't')")
            .execute(&pool)
            .await
            .unwrap();

        let result = sqlx::query(
            "INSERT INTO reviews (id, chapter_id, persona_id, review_text, rating, created_at) VALUES ('r', 'c', 'editor', 'x', 11, 't')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }
}
