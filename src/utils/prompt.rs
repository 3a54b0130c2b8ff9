//! 人工交互工具
//!
//! 封装启动时的地址询问、确认关卡与回车暂停

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};

/// 询问目标表单地址，直接回车使用默认值
pub fn ask_form_url(default_url: &str) -> Result<String> {
    let url: String = Input::new()
        .with_prompt("表单地址")
        .default(default_url.to_string())
        .interact_text()
        .context("读取表单地址失败")?;
    Ok(url)
}

/// 确认关卡：返回用户是否同意继续
pub fn confirm(message: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()
        .context("读取确认输入失败")
}

/// 暂停等待用户按回车
pub fn pause(message: &str) -> Result<()> {
    let _: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()
        .context("读取输入失败")?;
    Ok(())
}
