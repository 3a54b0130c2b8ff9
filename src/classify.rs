//! 题目识别模块
//!
//! 分两步：先用页面内 JS 一次性采集所有题目区块的快照，
//! 再对快照做纯函数分类，不触碰页面。

use crate::models::{BlockSnapshot, ClassifiedQuestion, QuestionKind};
use anyhow::{Context, Result};
use chromiumoxide::Page;

/// 题目区块快照采集脚本
///
/// 返回结构与 [`BlockSnapshot`] 字段一一对应；
/// 区块顺序与 find_elements 的结果一致（均为文档顺序）
const SCAN_SCRIPT: &str = r#"
(() => {
    const blocks = Array.from(document.querySelectorAll('div[role="listitem"]'));
    return blocks.map((block) => {
        const heading = block.querySelector('div[role="heading"]');
        const image = block.querySelector('img');
        const radios = Array.from(block.querySelectorAll('div[role="radio"]'));
        const values = Array.from(block.querySelectorAll('div[data-value]'));
        return {
            heading: heading ? heading.innerText : null,
            image: image ? image.getAttribute('src') : null,
            text_inputs: block.querySelectorAll('input[type="text"]').length,
            email_inputs: block.querySelectorAll('input[type="email"]').length,
            radio_labels: radios.map((radio) => {
                const holder = radio.parentElement && radio.parentElement.parentElement;
                return holder ? holder.textContent.trim() : '';
            }),
            dropdown_labels: values.map((value) => value.innerText.trim()),
        };
    });
})()
"#;

/// 采集当前页面上所有题目区块的快照
pub async fn scan_blocks(page: &Page) -> Result<Vec<BlockSnapshot>> {
    let snapshots = page
        .evaluate(SCAN_SCRIPT)
        .await
        .context("执行题目扫描脚本失败")?
        .into_value()
        .context("解析题目快照失败")?;
    Ok(snapshots)
}

/// 对快照做分类：提取题干、配图和题型
///
/// 题干只保留标题的第一行，后续行（必答标记之类）丢弃。
/// 题型按固定优先级判断：文本 > 单选 > 下拉，都不存在则为未知。
/// 纯函数，同一快照的分类结果恒定。
pub fn classify(snapshot: &BlockSnapshot) -> ClassifiedQuestion {
    let prompt = snapshot
        .heading
        .as_deref()
        .unwrap_or("")
        .split('\n')
        .next()
        .unwrap_or("")
        .to_string();

    let (kind, choices) = if snapshot.text_inputs > 0 {
        (QuestionKind::Text, Vec::new())
    } else if !snapshot.radio_labels.is_empty() {
        (QuestionKind::Radio, snapshot.radio_labels.clone())
    } else if !snapshot.dropdown_labels.is_empty() {
        (QuestionKind::Dropdown, snapshot.dropdown_labels.clone())
    } else {
        (QuestionKind::Unknown, Vec::new())
    };

    ClassifiedQuestion {
        prompt,
        image: snapshot.image.clone(),
        kind,
        choices,
    }
}
