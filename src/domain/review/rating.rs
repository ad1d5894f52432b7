//! Review Context - 评分解析
//!
//! 生成文本末尾应包含一行 "评分: N"；这里负责把它解析出来、
//! 钳制到有效区间，并从正文中剥离。

use regex::Regex;
use std::sync::LazyLock;

/// 评分有效区间下界
pub const RATING_MIN: i64 = 1;
/// 评分有效区间上界
pub const RATING_MAX: i64 = 10;
/// 未解析到评分行时使用的缺省评分
pub const DEFAULT_RATING: i64 = 7;

/// 评分标签后的第一个整数（半角/全角冒号均接受）
static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"评分[:：]\s*(\d+)").expect("rating pattern"));

/// 整个评分行（用于从正文剥离）
static RATING_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*评分[:：].*$").expect("rating line pattern"));

/// 评分（[1,10] 的整数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(i64);

impl Rating {
    /// 将任意整数钳制到有效区间
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(RATING_MIN, RATING_MAX))
    }

    /// 缺省评分
    pub fn default_neutral() -> Self {
        Self(DEFAULT_RATING)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 从生成文本中提取评分
///
/// 取第一个评分标签后的整数并钳制；没有评分行时返回缺省评分
pub fn extract_rating(text: &str) -> Rating {
    RATING_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map(Rating::clamped)
        .unwrap_or_else(Rating::default_neutral)
}

/// 剥离评分行，返回作为评论正文存储的文本
pub fn strip_rating_line(text: &str) -> String {
    RATING_LINE_RE.replace_all(text, "").trim().to_string()
}
