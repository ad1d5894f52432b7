//! Query Handlers 实现

mod chapter_handlers;
mod novel_handlers;
mod persona_handlers;

pub use chapter_handlers::{ChapterDetailResponse, GetChapterWithReviewsHandler, ReviewResponse};
pub use novel_handlers::{
    ChapterSummaryResponse, GetNovelHandler, ListNovelsHandler, NovelDetailResponse,
    NovelSummaryResponse,
};
pub use persona_handlers::{ListPersonasHandler, PersonaResponse};
