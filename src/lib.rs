//! # Form Auto Fill
//!
//! 自动填写并提交多页在线表单的应用程序
//!
//! ## 工作流程
//!
//! 1. 启动持久化浏览器会话并打开表单（首次运行只做登录引导）
//! 2. 逐页扫描题目区块，识别题型（文本 / 单选 / 下拉）
//! 3. 逐题决定答案：身份规则直接填写，其余交给模型回答
//! 4. 把答案写回页面控件，再寻找下一页 / 提交按钮翻页
//! 5. 每次翻页前经过人工确认，直到没有后续页面
//!
//! ## 模块结构
//!
//! - `classify` - 题目区块的扫描与题型识别
//! - `resolve` - 身份规则路由与模型作答决定
//! - `api::llm` - 模型查询客户端（OpenRouter 兼容接口）
//! - `processing` - 逐页遍历引擎与控件操作
//! - `browser` - 持久化会话启动与页面等待
//! - `models` - 题目、身份信息与按钮文案表
//! - `app` / `config` / `logger` - 应用组装、配置与日志

pub mod api;
pub mod app;
pub mod browser;
pub mod classify;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod processing;
pub mod resolve;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{BlockSnapshot, ClassifiedQuestion, IdentityProfile, QuestionKind};
pub use resolve::{Resolution, Route};
