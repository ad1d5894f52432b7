//! Novel Queries

use uuid::Uuid;

/// 获取用户的小说列表
#[derive(Debug, Clone)]
pub struct ListNovels {
    pub user_id: Uuid,
}

/// 获取小说详情（含章节列表）
#[derive(Debug, Clone)]
pub struct GetNovel {
    pub user_id: Uuid,
    pub novel_id: Uuid,
}
