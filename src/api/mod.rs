//! API 模块
//!
//! 负责所有与外部系统的交互

pub mod llm;

// 重新导出常用类型
pub use llm::{AnswerShape, LlmClient};
