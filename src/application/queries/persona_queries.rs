//! Persona Queries

/// 获取人设目录
#[derive(Debug, Clone)]
pub struct ListPersonas;
