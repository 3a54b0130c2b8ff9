use crate::browser::session::{self, Session};
use crate::config::Config;
use crate::processing::{FormProcessor, TraversalStats};
use crate::utils::prompt;
use anyhow::Result;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    session: Session,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 启动浏览器并打开表单
        let session = session::launch_session(&config).await?;

        Ok(Self { config, session })
    }

    /// 运行应用主逻辑
    pub async fn run(mut self) -> Result<()> {
        // 首次运行只做登录引导，不进入填表流程
        if self.session.first_run {
            run_first_time_setup(&self.config)?;
            self.session.browser.close().await?;
            return Ok(());
        }

        // 遍历表单
        let processor = FormProcessor::new(&self.config)?;
        let stats = processor.process_form(&self.session.page).await?;

        // 输出最终统计
        print_final_stats(&stats, &self.config);

        self.session.browser.close().await?;
        Ok(())
    }
}

/// 首次运行引导：等用户在浏览器里完成登录后退出
fn run_first_time_setup(config: &Config) -> Result<()> {
    info!("\n{}", "=".repeat(60));
    info!("🆕 首次运行引导");
    info!("请在打开的浏览器中登录表单账号并完成授权");
    info!("会话将保存在 {} 目录，下次运行直接开始填表", config.user_data_dir);
    info!("{}", "=".repeat(60));

    prompt::pause("完成登录后按回车退出")?;

    info!("✅ 引导完成，请重新运行程序开始填表");
    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 自动填表模式");
    info!("📄 目标表单: {}", config.form_url);
    info!("🤖 模型: {}", config.llm_model_name);
    if config.auto_confirm {
        info!("⚡ 自动确认模式已开启");
    }
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &TraversalStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 填表完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 处理页数: {}", stats.pages);
    info!("✅ 已作答: {}", stats.answered);
    info!("❌ 未作答: {}", stats.skipped);
    info!("{}", "=".repeat(60));
    if stats.skipped > 0 {
        info!("\n未作答题目已记录至: {}", config.skipped_report_file);
    }
}
