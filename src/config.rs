use crate::models::IdentityProfile;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 目标表单地址
    pub form_url: String,
    /// 浏览器会话目录（保存登录状态）
    pub user_data_dir: String,
    /// 是否无头模式
    pub headless: bool,
    /// 遍历页数上限（0 表示不限制）
    pub max_pages: usize,
    /// 自动确认模式（跳过地址询问与人工确认）
    pub auto_confirm: bool,
    /// 未作答题目报告文件
    pub skipped_report_file: String,
    // --- 身份信息 ---
    pub profile: IdentityProfile,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_url: "https://docs.google.com/forms/d/e/1FAIpQLSfa548JMCp-JSEoYEsmk9DDE-FIj9oYyQr-6Bbof8XdQ__jhQ/formResponse?pli=1".to_string(),
            user_data_dir: "data".to_string(),
            headless: false,
            max_pages: 0,
            auto_confirm: false,
            skipped_report_file: "skipped.txt".to_string(),
            profile: IdentityProfile::default(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://openrouter.ai/api/v1".to_string(),
            llm_model_name: "google/gemini-2.5-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            form_url: std::env::var("FORM_URL").unwrap_or(default.form_url),
            user_data_dir: std::env::var("USER_DATA_DIR").unwrap_or(default.user_data_dir),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            max_pages: std::env::var("MAX_PAGES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_pages),
            auto_confirm: std::env::var("AUTO_CONFIRM").ok().and_then(|v| v.parse().ok()).unwrap_or(default.auto_confirm),
            skipped_report_file: std::env::var("SKIPPED_REPORT_FILE").unwrap_or(default.skipped_report_file),
            profile: IdentityProfile::load(),
            llm_api_key: std::env::var("OPENROUTER_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("OPENROUTER_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("OPENROUTER_MODEL").unwrap_or(default.llm_model_name),
        }
    }
}
