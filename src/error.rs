//! 应用错误类型
//!
//! 只收录代码自身会构造的领域错误，第三方库错误交给 anyhow 包装

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器配置或启动失败
    #[error("浏览器错误: {0}")]
    Browser(String),

    /// 题目区块里没有预期的输入控件
    #[error("题目缺少{control}")]
    MissingControl { control: &'static str },

    /// 选项序号越界
    #[error("选项序号 {index} 超出范围 [0, {count})")]
    ChoiceOutOfRange { index: usize, count: usize },

    /// 模型返回内容无法按约定格式解析
    #[error("模型响应格式错误: {0}")]
    MalformedAnswer(String),
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
