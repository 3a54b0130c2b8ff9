use form_auto_fill::browser::session;
use form_auto_fill::classify;
use form_auto_fill::config::Config;
use form_auto_fill::logger;
use form_auto_fill::processing::FormProcessor;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_launch_browser_session() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 启动浏览器并打开表单
    let mut session = session::launch_session(&config)
        .await
        .expect("启动浏览器失败");

    let url = session
        .page
        .url()
        .await
        .expect("获取页面地址失败")
        .unwrap_or_default();
    assert!(!url.is_empty(), "页面应当有地址");

    session.browser.close().await.expect("关闭浏览器失败");
}

#[tokio::test]
#[ignore]
async fn test_scan_form_blocks() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 启动浏览器并打开表单
    let mut session = session::launch_session(&config)
        .await
        .expect("启动浏览器失败");

    // 采集当前页的题目快照
    let snapshots = classify::scan_blocks(&session.page)
        .await
        .expect("采集题目快照失败");
    println!("本页共 {} 道题", snapshots.len());

    for snapshot in &snapshots {
        let question = classify::classify(snapshot);
        println!("{} | {}", question.kind.label(), question.prompt);
    }

    session.browser.close().await.expect("关闭浏览器失败");
}

#[tokio::test]
#[ignore]
async fn test_full_form_flow() {
    // 初始化日志
    logger::init();

    // 加载配置（自动确认，跳过人工关卡）
    // 注意：会真实作答并提交表单，请用测试表单运行
    let mut config = Config::from_env();
    config.auto_confirm = true;

    // 启动浏览器并打开表单
    let mut session = session::launch_session(&config)
        .await
        .expect("启动浏览器失败");
    assert!(!session.first_run, "首次运行请先手动完成登录引导");

    // 遍历表单
    let processor = FormProcessor::new(&config).expect("创建表单处理器失败");
    let stats = processor
        .process_form(&session.page)
        .await
        .expect("遍历表单失败");

    println!(
        "处理页数: {}, 已作答: {}, 未作答: {}",
        stats.pages, stats.answered, stats.skipped
    );
    assert!(stats.pages >= 1, "至少应当处理一页");

    session.browser.close().await.expect("关闭浏览器失败");
}
