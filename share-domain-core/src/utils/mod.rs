//! 工具函数模块

pub mod note_id;
pub mod password;
pub mod url;
