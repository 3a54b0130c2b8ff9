//! 浏览器模块
//!
//! 负责持久化会话的启动与页面级的通用操作

pub mod session;

pub use session::{capture_page, launch_session, wait_for_quiescence, Session};
