use anyhow::Result;
use form_auto_fill::app::App;
use form_auto_fill::config::Config;
use form_auto_fill::logger;
use form_auto_fill::utils::prompt;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let mut config = Config::from_env();

    // 询问表单地址（自动确认模式下直接用配置值）
    if !config.auto_confirm {
        config.form_url = prompt::ask_form_url(&config.form_url)?;
    }

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
