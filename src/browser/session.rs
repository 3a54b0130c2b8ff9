//! 浏览器会话管理

use crate::config::Config;
use crate::error::AppError;
use anyhow::{Context, Result};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// 页面就绪轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// 就绪后的稳定等待，留给表单脚本完成渲染
const SETTLE_DELAY: Duration = Duration::from_millis(300);
/// 页面就绪等待上限
const QUIESCENCE_TIMEOUT: Duration = Duration::from_secs(15);

/// 浏览器会话
pub struct Session {
    pub browser: Browser,
    pub page: Page,
    /// 会话目录是否为本次运行新建（首次运行）
    pub first_run: bool,
}

/// 启动持久化浏览器会话并打开目标表单
///
/// 会话目录此前不存在时视为首次运行，由调用方决定是否进入登录引导。
/// 登录态依赖真实的浏览器环境，所以默认带界面启动，
/// 并关闭自动化特征标记。
pub async fn launch_session(config: &Config) -> Result<Session> {
    let first_run = !Path::new(&config.user_data_dir).exists();
    if first_run {
        info!("🆕 会话目录 {} 不存在，本次为首次运行", config.user_data_dir);
    }

    info!("🚀 启动浏览器...");
    debug!("会话目录: {}, 无头模式: {}", config.user_data_dir, config.headless);

    let mut builder = BrowserConfig::builder()
        .user_data_dir(&config.user_data_dir)
        .arg("--disable-blink-features=AutomationControlled");
    if config.headless {
        builder = builder.new_headless_mode();
    } else {
        builder = builder.with_head();
    }
    let browser_config = builder.build().map_err(AppError::Browser)?;

    // 启动浏览器
    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        anyhow::anyhow!("启动浏览器失败: {}", e)
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(SETTLE_DELAY).await;

    // 打开表单页面
    let page = browser.new_page(config.form_url.as_str()).await.map_err(|e| {
        error!("打开表单页面失败: {}", e);
        anyhow::anyhow!("打开表单页面失败: {}", e)
    })?;
    wait_for_quiescence(&page).await?;
    info!("✅ 已打开表单页面: {}", config.form_url);

    Ok(Session {
        browser,
        page,
        first_run,
    })
}

/// 等待页面就绪
///
/// 轮询 document.readyState 直到 complete，超时告警后继续；
/// 就绪后再等一小段时间让页面稳定下来
pub async fn wait_for_quiescence(page: &Page) -> Result<()> {
    let deadline = Instant::now() + QUIESCENCE_TIMEOUT;
    loop {
        let ready = match page.evaluate("document.readyState === 'complete'").await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            // 导航过程中的瞬时失败，按未就绪处理
            Err(_) => false,
        };
        if ready {
            break;
        }
        if Instant::now() >= deadline {
            warn!("⚠️ 等待页面就绪超时，继续执行");
            break;
        }
        sleep(POLL_INTERVAL).await;
    }
    sleep(SETTLE_DELAY).await;
    Ok(())
}

/// 把当前页面整页截图保存为 PNG
///
/// # 参数
/// - `page`: 页面对象
/// - `path`: 保存路径
pub async fn capture_page(page: &Page, path: &str) -> Result<()> {
    page.save_screenshot(
        ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build(),
        path,
    )
    .await
    .with_context(|| format!("保存截图失败: {}", path))?;
    Ok(())
}
