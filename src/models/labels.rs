//! 翻页按钮文案表

use phf::phf_map;

/// 翻页控件类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContinuationKind {
    /// 进入下一页
    Next,
    /// 提交表单
    Submit,
}

impl ContinuationKind {
    /// 控件的日志名称
    pub fn label(&self) -> &'static str {
        match self {
            ContinuationKind::Next => "下一页",
            ContinuationKind::Submit => "提交",
        }
    }
}

/// 按钮文案到翻页控件类型的映射（覆盖英文与泰文界面）
static CONTINUATION_LABELS: phf::Map<&'static str, ContinuationKind> = phf_map! {
    "Next" => ContinuationKind::Next,
    "ถัดไป" => ContinuationKind::Next,
    "Submit" => ContinuationKind::Submit,
    "ส่ง" => ContinuationKind::Submit,
};

/// 根据按钮文案识别翻页控件，文案先去除首尾空白再精确匹配
pub fn match_continuation(label: &str) -> Option<ContinuationKind> {
    CONTINUATION_LABELS.get(label.trim()).copied()
}
