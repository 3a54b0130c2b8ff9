//! 文本处理工具

use regex::Regex;
use std::sync::OnceLock;

/// 日志与报告中题干预览的字符预算
pub const PREVIEW_LEN: usize = 80;

/// 空白符匹配（含换行），进程内只编译一次
fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("空白符正则不合法"))
}

/// 压缩空白并截断文本，用于日志与报告中的预览
///
/// 先去掉首尾空白、把连续空白压成单个空格，再按字符数截断，
/// 超出部分以 "..." 结尾。按字符计数，多字节文本不会被截断在半个字符上。
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回处理后的文本
pub fn preview(text: &str, max_len: usize) -> String {
    let collapsed = whitespace_pattern().replace_all(text.trim(), " ");
    if collapsed.chars().count() > max_len {
        collapsed.chars().take(max_len).collect::<String>() + "..."
    } else {
        collapsed.into_owned()
    }
}
