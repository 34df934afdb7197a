use std::time::Duration;

/// 程序配置
///
/// 优先级：命令行参数 > 环境变量 > 默认值
#[derive(Clone, Debug)]
pub struct Config {
    /// 站点根地址
    pub base_url: String,
    /// Cookie 存放目录
    pub cookie_dir: String,
    /// 每批处理的账号数量
    pub batch_size: usize,
    /// 批次之间的等待时间（秒）
    pub batch_wait_secs: u64,
    /// 是否使用无头模式
    pub headless: bool,
    /// 浏览器 User-Agent
    pub user_agent: String,
    /// 页面加载超时（秒）
    pub page_load_timeout_secs: u64,
    /// 点击登录后等待页面稳定的时间（秒）
    pub login_settle_secs: u64,
    /// 首页滚动后等待内容加载的时间（毫秒）
    pub feed_scroll_pause_ms: u64,
    /// 每新找到多少个投稿后重新加载首页
    pub reload_interval: usize,
    /// 单个投稿最多滚动次数
    pub max_scroll_attempts: usize,
    /// 投稿页滚动后的等待时间（毫秒）
    pub scroll_pause_ms: u64,
    /// 每次点赞后的等待时间（毫秒）
    pub click_pause_ms: u64,
    /// 每累计多少次点赞检查一次限流
    pub limit_check_interval: u32,
    /// 限流检查前的等待时间（毫秒）
    pub limit_check_pause_ms: u64,
    /// 投稿之间的等待时间（毫秒）
    pub post_delay_ms: u64,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.threads.net".to_string(),
            cookie_dir: "cookies".to_string(),
            batch_size: 5,
            batch_wait_secs: 60,
            headless: false,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            page_load_timeout_secs: 20,
            login_settle_secs: 20,
            feed_scroll_pause_ms: 5000,
            reload_interval: 10,
            max_scroll_attempts: 5,
            scroll_pause_ms: 2000,
            click_pause_ms: 500,
            limit_check_interval: 10,
            limit_check_pause_ms: 2000,
            post_delay_ms: 2000,
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: env_or("BASE_URL", default.base_url),
            cookie_dir: env_or("COOKIE_DIR", default.cookie_dir),
            batch_size: env_parse("BATCH_SIZE", default.batch_size),
            batch_wait_secs: env_parse("BATCH_WAIT_SECS", default.batch_wait_secs),
            headless: env_parse("HEADLESS", default.headless),
            user_agent: env_or("USER_AGENT", default.user_agent),
            page_load_timeout_secs: env_parse("PAGE_LOAD_TIMEOUT_SECS", default.page_load_timeout_secs),
            login_settle_secs: env_parse("LOGIN_SETTLE_SECS", default.login_settle_secs),
            feed_scroll_pause_ms: env_parse("FEED_SCROLL_PAUSE_MS", default.feed_scroll_pause_ms),
            reload_interval: env_parse("RELOAD_INTERVAL", default.reload_interval),
            max_scroll_attempts: env_parse("MAX_SCROLL_ATTEMPTS", default.max_scroll_attempts),
            scroll_pause_ms: env_parse("SCROLL_PAUSE_MS", default.scroll_pause_ms),
            click_pause_ms: env_parse("CLICK_PAUSE_MS", default.click_pause_ms),
            limit_check_interval: env_parse("LIMIT_CHECK_INTERVAL", default.limit_check_interval),
            limit_check_pause_ms: env_parse("LIMIT_CHECK_PAUSE_MS", default.limit_check_pause_ms),
            post_delay_ms: env_parse("POST_DELAY_MS", default.post_delay_ms),
            output_log_file: env_or("OUTPUT_LOG_FILE", default.output_log_file),
            verbose_logging: env_parse("VERBOSE_LOGGING", default.verbose_logging),
        }
    }

    /// 批大小至少为 1
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    /// 限流检查间隔至少为 1
    pub fn effective_limit_check_interval(&self) -> u32 {
        self.limit_check_interval.max(1)
    }

    /// 账号无需 Cookie 也需访问的首页地址
    pub fn home_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    /// 登录页地址
    pub fn login_url(&self) -> String {
        format!("{}/login/", self.base_url.trim_end_matches('/'))
    }

    /// 把相对路径（如 `/@user/post/xxx`）转换为完整投稿地址
    pub fn post_url(&self, href: &str) -> String {
        if href.starts_with("https://") || href.starts_with("http://") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), href)
        }
    }

    pub fn batch_wait(&self) -> Duration {
        Duration::from_secs(self.batch_wait_secs)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn login_settle(&self) -> Duration {
        Duration::from_secs(self.login_settle_secs)
    }

    pub fn feed_scroll_pause(&self) -> Duration {
        Duration::from_millis(self.feed_scroll_pause_ms)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn click_pause(&self) -> Duration {
        Duration::from_millis(self.click_pause_ms)
    }

    pub fn limit_check_pause(&self) -> Duration {
        Duration::from_millis(self.limit_check_pause_ms)
    }

    pub fn post_delay(&self) -> Duration {
        Duration::from_millis(self.post_delay_ms)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
