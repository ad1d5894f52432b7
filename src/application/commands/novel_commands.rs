//! Novel Commands

use uuid::Uuid;

/// 创建小说命令
#[derive(Debug, Clone)]
pub struct CreateNovel {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
}

/// 更新小说命令
#[derive(Debug, Clone)]
pub struct UpdateNovel {
    pub user_id: Uuid,
    pub novel_id: Uuid,
    pub title: String,
    pub description: String,
}

/// 删除小说命令（级联删除章节及其评论）
#[derive(Debug, Clone)]
pub struct DeleteNovel {
    pub user_id: Uuid,
    pub novel_id: Uuid,
}
