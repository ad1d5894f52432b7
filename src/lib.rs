//! Recrit - 连载小说 AI 评审系统
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Persona Context: 六个固定模拟读者人设的目录
//! - Review Context: 提示词构建与评分解析
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextGenerator, Repositories, TokenStore）
//! - Commands: CQRS 命令处理器（含章节提交的评论编排）
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + Bearer 认证
//! - Persistence: SQLite 存储
//! - Adapters: LLM Client（OpenAI 兼容）
//! - Memory: 令牌内存存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
