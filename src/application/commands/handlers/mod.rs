//! Command Handlers 实现

mod auth_handlers;
mod chapter_handlers;
mod novel_handlers;

pub use auth_handlers::{AuthResponse, LoginUserHandler, RegisterUserHandler};
pub use chapter_handlers::{
    DeleteChapterHandler, SubmitChapterHandler, SubmitChapterResponse, UpdateChapterHandler,
};
pub use novel_handlers::{
    CreateNovelHandler, CreateNovelResponse, DeleteNovelHandler, UpdateNovelHandler,
};
