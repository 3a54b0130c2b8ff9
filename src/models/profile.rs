//! 身份信息模型
//!
//! 填表时使用的个人信息，按 内置默认值 < profile.toml < 环境变量 的顺序加载

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// 身份信息
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityProfile {
    /// 姓名
    pub name: String,
    /// 学号
    pub id: String,
    /// 邮箱
    pub email: String,
    /// 班级序号（从 0 开始，对应班级选项在页面上的位置）
    pub class_index: usize,
}

impl Default for IdentityProfile {
    fn default() -> Self {
        Self {
            name: "Somchai Jaidee".to_string(),
            id: "67990001".to_string(),
            email: "67990001@kmitl.ac.th".to_string(),
            class_index: 3,
        }
    }
}

/// profile.toml 中的可选字段，缺省的字段保持原值
#[derive(Debug, Default, Deserialize)]
struct ProfileFile {
    name: Option<String>,
    id: Option<String>,
    email: Option<String>,
    class_index: Option<usize>,
}

impl IdentityProfile {
    /// 加载身份信息
    ///
    /// 先取内置默认值，再用 profile.toml（路径可用 PROFILE_FILE 覆盖）
    /// 中出现的字段覆盖，最后用 NAME / ID / EMAIL / CLASS 环境变量覆盖。
    pub fn load() -> Self {
        let mut profile = Self::default();

        let path = std::env::var("PROFILE_FILE").unwrap_or_else(|_| "profile.toml".to_string());
        if Path::new(&path).exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match profile.apply_toml(&content) {
                    Ok(_) => debug!("已从 {} 加载身份信息", path),
                    Err(e) => warn!("⚠️ 身份配置文件 {} 解析失败: {}", path, e),
                },
                Err(e) => warn!("⚠️ 读取身份配置文件 {} 失败: {}", path, e),
            }
        }

        profile.apply_env();
        profile
    }

    /// 用一段 TOML 内容覆盖身份字段
    ///
    /// # 参数
    /// - `content`: TOML 文本，字段均可缺省
    pub fn apply_toml(&mut self, content: &str) -> Result<()> {
        let file: ProfileFile = toml::from_str(content).context("身份配置内容格式错误")?;
        if let Some(name) = file.name {
            self.name = name;
        }
        if let Some(id) = file.id {
            self.id = id;
        }
        if let Some(email) = file.email {
            self.email = email;
        }
        if let Some(class_index) = file.class_index {
            self.class_index = class_index;
        }
        Ok(())
    }

    /// 用环境变量覆盖身份字段
    fn apply_env(&mut self) {
        if let Ok(name) = std::env::var("NAME") {
            self.name = name;
        }
        if let Ok(id) = std::env::var("ID") {
            self.id = id;
        }
        if let Ok(email) = std::env::var("EMAIL") {
            self.email = email;
        }
        if let Some(class_index) = std::env::var("CLASS").ok().and_then(|v| v.parse().ok()) {
            self.class_index = class_index;
        }
    }
}
