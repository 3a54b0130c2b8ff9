//! 核心处理模块
//!
//! 负责表单的逐页遍历：扫描题目区块、逐题作答、寻找翻页控件，
//! 循环到没有后续页面为止。

use crate::api::llm::LlmClient;
use crate::browser::session;
use crate::classify;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{match_continuation, ClassifiedQuestion, ContinuationKind};
use crate::resolve::{self, Resolution, SkipReason};
use crate::utils::{prompt, text};
use anyhow::{Context, Result};
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use std::fs;
use std::io::Write;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// 题目区块选择器
const BLOCK_SELECTOR: &str = "div[role='listitem']";
/// 翻页按钮选择器
const BUTTON_SELECTOR: &str = "div[role='button']";
/// 提交完成后的跳转链接选择器
const FINISH_LINK_SELECTOR: &str = "a[rel='noopener']";
/// 下拉选项选择器
const OPTION_SELECTOR: &str = "div[role='option']";
/// 下拉选项出现的等待上限
const OPTION_TIMEOUT: Duration = Duration::from_secs(5);
/// 下拉选项轮询间隔
const OPTION_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 遍历统计
#[derive(Debug, Default)]
pub struct TraversalStats {
    /// 处理过的页数
    pub pages: usize,
    /// 已作答题数
    pub answered: usize,
    /// 未作答题数
    pub skipped: usize,
}

/// 翻页结果
#[derive(Debug, PartialEq, Eq)]
enum NavOutcome {
    /// 已进入后续页面
    Advanced,
    /// 已打开完成链接，流程结束
    Finished,
    /// 没有任何后续控件，视为完成
    Done,
}

/// 单题处理结果
enum BlockOutcome {
    /// 已作答
    Answered,
    /// 放弃作答
    Skipped(SkipReason),
}

/// 表单处理器
///
/// 持有遍历过程所需的共享资源：配置、模型客户端与未作答报告
pub struct FormProcessor<'a> {
    config: &'a Config,
    llm: LlmClient,
    report: SkippedReport,
}

impl<'a> FormProcessor<'a> {
    /// 创建表单处理器
    pub fn new(config: &'a Config) -> Result<Self> {
        Ok(Self {
            config,
            llm: LlmClient::new(config),
            report: SkippedReport::create(&config.skipped_report_file)?,
        })
    }

    /// 遍历整个表单
    ///
    /// 每一页先扫描作答再翻页；没有下一页、提交按钮和完成链接时结束。
    /// 配置了页数上限时超限强制停止。
    pub async fn process_form(&self, page: &Page) -> Result<TraversalStats> {
        let mut stats = TraversalStats::default();

        loop {
            if self.config.max_pages > 0 && stats.pages >= self.config.max_pages {
                warn!("⚠️ 已达到页数上限 {}，停止遍历", self.config.max_pages);
                break;
            }
            stats.pages += 1;
            log_page_start(stats.pages);

            self.process_page(page, stats.pages, &mut stats).await?;

            match self.navigate(page).await? {
                NavOutcome::Advanced => continue,
                NavOutcome::Finished => {
                    info!("🎉 表单流程已全部完成");
                    break;
                }
                NavOutcome::Done => {
                    info!("✓ 没有更多页面，遍历结束");
                    break;
                }
            }
        }

        Ok(stats)
    }

    /// 处理当前页上的所有题目区块
    ///
    /// 每道题单独隔离：一道题失败只记日志和报告，不影响其余题目
    async fn process_page(
        &self,
        page: &Page,
        page_index: usize,
        stats: &mut TraversalStats,
    ) -> Result<()> {
        session::wait_for_quiescence(page).await?;

        let total = classify::scan_blocks(page).await?.len();
        if total == 0 {
            info!("本页没有题目区块");
            return Ok(());
        }
        info!("📋 本页共 {} 道题", total);

        for block_index in 0..total {
            // 每道题前重新等待并采集快照，作答可能触发页面脚本更新
            session::wait_for_quiescence(page).await?;
            let snapshots = classify::scan_blocks(page).await?;
            let snapshot = match snapshots.get(block_index) {
                Some(snapshot) => snapshot,
                None => {
                    warn!("⚠️ 题目区块数量发生变化，跳过本页剩余题目");
                    break;
                }
            };

            let question = classify::classify(snapshot);
            log_question(page_index, block_index + 1, &question);

            match self.answer_block(page, block_index, &question).await {
                Ok(BlockOutcome::Answered) => stats.answered += 1,
                Ok(BlockOutcome::Skipped(reason)) => {
                    stats.skipped += 1;
                    self.report_skip(page_index, block_index + 1, &question.prompt, reason.describe());
                }
                Err(e) => {
                    error!("[第 {} 页] ❌ 题目 {} 处理失败: {}", page_index, block_index + 1, e);
                    stats.skipped += 1;
                    self.report_skip(page_index, block_index + 1, &question.prompt, "处理失败");
                }
            }
        }

        Ok(())
    }

    /// 作答单个题目区块：先决定答案，再操作控件
    async fn answer_block(
        &self,
        page: &Page,
        block_index: usize,
        question: &ClassifiedQuestion,
    ) -> Result<BlockOutcome> {
        let resolution = resolve::resolve(&self.config.profile, &self.llm, question).await?;

        match resolution {
            Resolution::FillText(value) => {
                let block = locate_block(page, block_index).await?;
                fill_input(&block, "input[type='text']", "文本输入框", &value).await?;
                info!("✏️ 已填入文本: {}", text::preview(&value, text::PREVIEW_LEN));
                Ok(BlockOutcome::Answered)
            }
            Resolution::FillEmail(value) => {
                let block = locate_block(page, block_index).await?;
                fill_input(&block, "input[type='email']", "邮箱输入框", &value).await?;
                info!("✏️ 已填入邮箱: {}", value);
                Ok(BlockOutcome::Answered)
            }
            Resolution::PickRadio(index) => {
                let block = locate_block(page, block_index).await?;
                pick_radio(&block, index).await?;
                info!("🔘 已选择第 {} 个选项", index + 1);
                Ok(BlockOutcome::Answered)
            }
            Resolution::PickDropdown(index) => {
                let block = locate_block(page, block_index).await?;
                pick_dropdown(page, &block, block_index, index).await?;
                info!("📑 已选择第 {} 个下拉选项", index + 1);
                Ok(BlockOutcome::Answered)
            }
            Resolution::Skip(reason) => Ok(BlockOutcome::Skipped(reason)),
        }
    }

    /// 寻找并激活当前页的后续控件
    ///
    /// 先找下一页/提交按钮，再找完成链接；每次激活前都经过人工确认。
    /// 什么都没找到就是终态，不算错误。
    async fn navigate(&self, page: &Page) -> Result<NavOutcome> {
        let buttons = page.find_elements(BUTTON_SELECTOR).await.unwrap_or_default();
        for button in &buttons {
            let label = match button.inner_text().await {
                Ok(Some(label)) => label,
                _ => continue,
            };
            let kind = match match_continuation(&label) {
                Some(kind) => kind,
                None => continue,
            };

            info!("🧭 找到{}按钮: {}", kind.label(), label.trim());
            if !self.confirm_gate(&format!("即将{}，是否继续？", kind.label()))? {
                info!("⏹️ 用户取消，停止遍历");
                return Ok(NavOutcome::Done);
            }

            button.click().await.context("点击翻页按钮失败")?;
            session::wait_for_quiescence(page).await?;
            match kind {
                ContinuationKind::Next => info!("➡️ 已进入下一页"),
                ContinuationKind::Submit => info!("📨 已提交当前表单"),
            }
            return Ok(NavOutcome::Advanced);
        }

        // 没有翻页按钮时检查提交完成后的跳转链接
        match page.find_element(FINISH_LINK_SELECTOR).await {
            Ok(link) => {
                info!("🏁 找到完成链接");
                if !self.confirm_gate("即将打开完成链接，是否继续？")? {
                    info!("⏹️ 用户取消，停止遍历");
                    return Ok(NavOutcome::Done);
                }
                link.click().await.context("点击完成链接失败")?;
                session::wait_for_quiescence(page).await?;
                self.capture_result(page).await;
                Ok(NavOutcome::Finished)
            }
            Err(_) => Ok(NavOutcome::Done),
        }
    }

    /// 人工确认关卡，自动确认模式下直接放行
    fn confirm_gate(&self, message: &str) -> Result<bool> {
        if self.config.auto_confirm {
            info!("🤖 自动确认模式: {}", message);
            return Ok(true);
        }
        prompt::confirm(message)
    }

    /// 截图保存结果页，失败只告警
    async fn capture_result(&self, page: &Page) {
        let path = format!("result-{}.png", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        match session::capture_page(page, &path).await {
            Ok(_) => info!("📸 结果页截图已保存至: {}", path),
            Err(e) => warn!("⚠️ 结果页截图失败: {}", e),
        }
    }

    /// 记录未作答题目，报告写入失败只告警，不影响流程
    fn report_skip(&self, page_index: usize, question_index: usize, prompt: &str, reason: &str) {
        warn!("[第 {} 页] ⚠️ 题目 {} 未作答: {}", page_index, question_index, reason);
        if let Err(e) = self.report.write(page_index, question_index, prompt, reason) {
            warn!("⚠️ 写入未作答报告失败: {}", e);
        }
    }
}

/// 定位第 block_index 个题目区块
async fn locate_block(page: &Page, block_index: usize) -> Result<Element> {
    let blocks = page
        .find_elements(BLOCK_SELECTOR)
        .await
        .context("定位题目区块失败")?;
    blocks
        .into_iter()
        .nth(block_index)
        .ok_or_else(|| anyhow::anyhow!("题目区块 {} 不存在", block_index + 1))
}

/// 在区块内的输入框中填入文本
async fn fill_input(
    block: &Element,
    selector: &str,
    control: &'static str,
    value: &str,
) -> Result<()> {
    let input = block
        .find_element(selector)
        .await
        .map_err(|_| AppError::MissingControl { control })?;
    input.click().await?;
    input.type_str(value).await?;
    Ok(())
}

/// 点击区块内第 index 个单选项
async fn pick_radio(block: &Element, index: usize) -> Result<()> {
    let radios = block
        .find_elements("div[role='radio']")
        .await
        .context("定位单选项失败")?;
    let radio = radios.get(index).ok_or(AppError::ChoiceOutOfRange {
        index,
        count: radios.len(),
    })?;
    radio.click().await?;
    Ok(())
}

/// 选择区块内第 index 个下拉选项
///
/// 下拉控件必须先展开、等目标选项可见可用之后再点击，
/// 分两步是控件本身的行为要求
async fn pick_dropdown(page: &Page, block: &Element, block_index: usize, index: usize) -> Result<()> {
    // 第一步：点击收起状态的下拉框将其展开
    let opener = block
        .find_element("div[data-value]")
        .await
        .map_err(|_| AppError::MissingControl { control: "下拉框" })?;
    opener.click().await?;

    // 第二步：等目标选项可见可用后点击
    wait_for_option(page, block_index, index).await?;

    let options = block
        .find_elements(OPTION_SELECTOR)
        .await
        .context("定位下拉选项失败")?;
    let option = options.get(index).ok_or(AppError::ChoiceOutOfRange {
        index,
        count: options.len(),
    })?;
    option.click().await?;
    Ok(())
}

/// 轮询等待下拉选项出现、可见且未禁用
async fn wait_for_option(page: &Page, block_index: usize, option_index: usize) -> Result<()> {
    let script = format!(
        r#"
(() => {{
    const block = document.querySelectorAll("{block}")[{block_index}];
    if (!block) return false;
    const option = block.querySelectorAll("{option}")[{option_index}];
    if (!option) return false;
    const rect = option.getBoundingClientRect();
    const style = window.getComputedStyle(option);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden'
        && option.getAttribute('aria-disabled') !== 'true';
}})()
"#,
        block = BLOCK_SELECTOR,
        block_index = block_index,
        option = OPTION_SELECTOR,
        option_index = option_index,
    );

    let deadline = Instant::now() + OPTION_TIMEOUT;
    loop {
        let ready = match page.evaluate(script.clone()).await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            Err(_) => false,
        };
        if ready {
            return Ok(());
        }
        if Instant::now() >= deadline {
            anyhow::bail!("等待下拉选项出现超时 (选项 {})", option_index + 1);
        }
        sleep(OPTION_POLL_INTERVAL).await;
    }
}

/// 未作答题目报告
///
/// 把每道放弃的题目追加到报告文件，供人工补答
pub struct SkippedReport {
    report_file_path: String,
}

impl SkippedReport {
    /// 创建报告文件并写入带时间戳的文件头
    pub fn create(path: impl Into<String>) -> Result<Self> {
        let report_file_path = path.into();
        let header = format!(
            "{}\n未作答题目报告 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        fs::write(&report_file_path, header)
            .with_context(|| format!("初始化报告文件失败: {}", report_file_path))?;
        Ok(Self { report_file_path })
    }

    /// 追加一条未作答记录
    ///
    /// # 参数
    /// - `page_index`: 页码
    /// - `question_index`: 题目序号
    /// - `prompt`: 题干
    /// - `reason`: 原因
    pub fn write(
        &self,
        page_index: usize,
        question_index: usize,
        prompt: &str,
        reason: &str,
    ) -> Result<()> {
        debug!(
            "写入报告: 第 {} 页 | 题目 {} | 原因: {}",
            page_index, question_index, reason
        );

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_file_path)?;

        let line = format!(
            "第 {} 页 | 题目 {} | {} | 题干: {}\n",
            page_index,
            question_index,
            reason,
            text::preview(prompt, text::PREVIEW_LEN)
        );
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_page_start(page_index: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📄 开始处理第 {} 页", page_index);
    info!("{}", "=".repeat(60));
}

fn log_question(page_index: usize, question_index: usize, question: &ClassifiedQuestion) {
    info!(
        "\n[第 {} 页] 题目 {} · {}",
        page_index,
        question_index,
        question.kind.label()
    );
    info!("🔍 题干: {}", text::preview(&question.prompt, text::PREVIEW_LEN));
    if question.image.is_some() {
        info!("🖼️ 题目附带配图");
    }
}
