//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文本生成后端配置
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generation: GenerationConfig::default(),
            database: DatabaseConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 文本生成后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// 生成服务基础 URL（OpenAI 兼容）
    #[serde(default = "default_generation_url")]
    pub url: String,

    /// API Key，无鉴权的本地服务可不设
    #[serde(default)]
    pub api_key: Option<String>,

    /// standard 档对应的模型名（短章节）
    #[serde(default = "default_model_standard")]
    pub model_standard: String,

    /// premium 档对应的模型名（长章节）
    #[serde(default = "default_model_premium")]
    pub model_premium: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,

    /// 输出 token 上限
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 短章节阈值（字符数），低于该值走 standard 档
    #[serde(default = "default_short_content_threshold")]
    pub short_content_threshold: usize,
}

fn default_generation_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model_standard() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_model_premium() -> String {
    "gpt-4".to_string()
}

fn default_generation_timeout() -> u64 {
    120
}

fn default_max_output_tokens() -> u32 {
    1500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_short_content_threshold() -> usize {
    1000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            url: default_generation_url(),
            api_key: None,
            model_standard: default_model_standard(),
            model_premium: default_model_premium(),
            timeout_secs: default_generation_timeout(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            short_content_threshold: default_short_content_threshold(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/recrit.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
