//! Auth Commands

/// 注册用户命令
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 登录命令
#[derive(Debug, Clone)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}
