//! Review Context - 提示词构建
//!
//! 系统提示词 = 人设身份 + 评审视角 + 前情章节摘要；
//! 用户提示词 = 章节信息 + 全文 + 输出格式要求。

use crate::domain::persona::prompt_fragment_for;

/// 前情章节摘要的截取长度（字符数）
pub const EXCERPT_CHARS: usize = 200;

/// 前情章节（用于提示词上下文，只保留编号 + 标题 + 内容）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorChapter {
    pub chapter_number: i64,
    pub title: String,
    pub content: String,
}

/// 按字符截取内容摘要
fn excerpt(content: &str) -> String {
    content.chars().take(EXCERPT_CHARS).collect()
}

/// 构建系统提示词
///
/// 未知人设类型不报错，使用通用评审视角
pub fn build_system_prompt(
    persona_name: &str,
    persona_type: &str,
    prior_chapters: &[PriorChapter],
) -> String {
    let mut prompt = format!(
        "你是\u{201c}{}\u{201d}。{}",
        persona_name,
        prompt_fragment_for(persona_type)
    );

    if prior_chapters.is_empty() {
        prompt.push_str("\n\n这是这部小说的第一章。请重点评价第一印象以及吸引读者的能力。");
    } else {
        prompt.push_str("\n\n这部小说此前的章节：\n");
        for chapter in prior_chapters {
            prompt.push_str(&format!(
                "- 第{}章 {}：{}...\n",
                chapter.chapter_number,
                chapter.title,
                excerpt(&chapter.content)
            ));
        }
        prompt.push_str("\n评价新章节时，请考虑与前文的连贯性和衔接。");
    }

    prompt.push_str(
        "\n\n评价时请务必给出具体例子，兼顾正面反馈与改进建议。请使用中文撰写，不少于200字。",
    );

    prompt
}

/// 构建用户提示词
pub fn build_user_prompt(
    chapter_number: i64,
    chapter_title: &str,
    chapter_content: &str,
    is_first_chapter: bool,
) -> String {
    format!(
        "小说进度: {}\n\
         章节编号: {}\n\
         章节标题: {}\n\n\
         章节内容:\n{}\n\n\
         请评价以上章节，并按照如下格式输出：\n\n\
         ## 优点\n\
         [2-3条具体优点]\n\n\
         ## 改进建议\n\
         [2-3条具体改进建议]\n\n\
         ## 总体评价\n\
         [整体评价与鼓励]\n\n\
         评分: [1-10的整数]\n",
        if is_first_chapter { "第一章" } else { "连载中" },
        chapter_number,
        chapter_title,
        chapter_content,
    )
}
