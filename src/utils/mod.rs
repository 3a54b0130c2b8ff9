//! 工具模块

pub mod prompt;
pub mod text;
