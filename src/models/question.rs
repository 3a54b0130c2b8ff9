//! 题目数据模型

use serde::Deserialize;

/// 题型
///
/// 枚举顺序即识别优先级：一个区块同时出现多种输入控件时，
/// 按 文本 > 单选 > 下拉 判定，都不存在则为未知。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    /// 文本题（自由作答）
    Text,
    /// 单选题
    Radio,
    /// 下拉选择题
    Dropdown,
    /// 未知题型（跳过不作答）
    Unknown,
}

impl QuestionKind {
    /// 题型的日志名称
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::Text => "文本题",
            QuestionKind::Radio => "单选题",
            QuestionKind::Dropdown => "下拉题",
            QuestionKind::Unknown => "未知题型",
        }
    }
}

/// 单个题目区块的页面快照
///
/// 由页面内 JS 一次性采集，字段与采集脚本的返回结构一一对应
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlockSnapshot {
    /// 标题原文（可能多行，第一行才是题干）
    pub heading: Option<String>,
    /// 配图地址
    pub image: Option<String>,
    /// 文本输入框数量
    pub text_inputs: usize,
    /// 邮箱输入框数量
    pub email_inputs: usize,
    /// 单选项文案（按文档顺序）
    pub radio_labels: Vec<String>,
    /// 下拉选项文案（按文档顺序）
    pub dropdown_labels: Vec<String>,
}

/// 分类后的题目
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedQuestion {
    /// 题干（标题的第一行）
    pub prompt: String,
    /// 配图地址
    pub image: Option<String>,
    /// 题型
    pub kind: QuestionKind,
    /// 选项文案，序号 0 对应页面上的第一个选项（文本题为空）
    pub choices: Vec<String>,
}
