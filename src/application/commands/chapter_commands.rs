//! Chapter Commands

use uuid::Uuid;

/// 提交章节命令（创建章节并触发评论生成）
#[derive(Debug, Clone)]
pub struct SubmitChapter {
    pub user_id: Uuid,
    pub novel_id: Uuid,
    pub chapter_number: i64,
    pub title: String,
    pub content: String,
}

/// 更新章节命令（不触发评论重新生成）
#[derive(Debug, Clone)]
pub struct UpdateChapter {
    pub user_id: Uuid,
    pub chapter_id: Uuid,
    pub title: String,
    pub content: String,
}

/// 删除章节命令（级联删除其评论）
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub user_id: Uuid,
    pub chapter_id: Uuid,
}
