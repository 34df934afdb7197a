//! 测试用的假浏览器、会话工厂、限流检测和报告输出

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use threads_autolike::models::{AccountReport, RunResults, StoredCookie};
use threads_autolike::services::{BatchInfo, RateLimitProbe, Reporter};
use threads_autolike::{Account, AppError, AppResult, Config, LikeButton, PageDriver, SessionFactory};

pub const BASE_URL: &str = "https://threads.test";
pub const SESSION_COOKIE: &str = "sessionid";

/// 测试配置：间隔较小，Cookie 放在临时目录
pub fn test_config(cookie_dir: &std::path::Path) -> Config {
    Config {
        base_url: BASE_URL.to_string(),
        cookie_dir: cookie_dir.display().to_string(),
        batch_size: 2,
        batch_wait_secs: 60,
        login_settle_secs: 0,
        output_log_file: cookie_dir.join("output.txt").display().to_string(),
        ..Config::default()
    }
}

pub fn session_value(username: &str) -> String {
    format!("session-{}", username)
}

/// 站点行为设定
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// 首页投稿总数；None 表示无限
    pub feed_size: Option<usize>,
    /// 每次滚动新出现的投稿数
    pub page_size: usize,
    /// 每个投稿页的按钮数
    pub buttons_per_post: usize,
    /// 每个投稿页中已点赞的按钮数（排在最前）
    pub pre_liked_per_post: usize,
    /// 每个投稿页中点击时已失效的按钮序号
    pub detached_buttons: Vec<usize>,
    /// 打开时超时的投稿链接
    pub timeout_posts: Vec<String>,
    /// 打开时返回浏览器错误的投稿链接
    pub broken_posts: Vec<String>,
    /// 打开时 panic 的投稿链接
    pub panic_posts: Vec<String>,
    /// 账号 → 正确密码
    pub passwords: HashMap<String, String>,
    /// 无法启动浏览器的账号
    pub fail_open: Vec<String>,
    /// 启动浏览器时 panic 的账号
    pub panic_open: Vec<String>,
    /// 限制弹窗文本
    pub restriction_text: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            feed_size: None,
            page_size: 5,
            buttons_per_post: 3,
            pre_liked_per_post: 0,
            detached_buttons: Vec::new(),
            timeout_posts: Vec::new(),
            broken_posts: Vec::new(),
            panic_posts: Vec::new(),
            passwords: HashMap::new(),
            fail_open: Vec::new(),
            panic_open: Vec::new(),
            restriction_text: None,
        }
    }
}

impl SiteSettings {
    pub fn with_account(mut self, username: &str, password: &str) -> Self {
        self.passwords
            .insert(username.to_string(), password.to_string());
        self
    }
}

/// 站点上发生过的事件
#[derive(Debug, Default)]
pub struct SiteLog {
    pub opened: Vec<String>,
    pub closed: Vec<String>,
    pub logins: Vec<String>,
    pub clicks: u32,
    pub home_loads: u32,
}

/// 假站点：保存设定和事件记录，所有会话共享
#[derive(Debug, Default)]
pub struct FakeSite {
    pub settings: SiteSettings,
    pub log: Mutex<SiteLog>,
}

impl FakeSite {
    pub fn new(settings: SiteSettings) -> Arc<Self> {
        Arc::new(Self {
            settings,
            log: Mutex::new(SiteLog::default()),
        })
    }

    pub fn logins(&self) -> Vec<String> {
        self.log.lock().unwrap().logins.clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.log.lock().unwrap().opened.clone()
    }

    pub fn closed(&self) -> Vec<String> {
        self.log.lock().unwrap().closed.clone()
    }

    pub fn clicks(&self) -> u32 {
        self.log.lock().unwrap().clicks
    }

    pub fn home_loads(&self) -> u32 {
        self.log.lock().unwrap().home_loads
    }
}

#[derive(Debug, Clone)]
enum Screen {
    Blank,
    Home { revealed: usize },
    Login,
    Post { href: String, liked: Vec<bool> },
}

/// 假浏览器会话
pub struct FakeDriver {
    site: Arc<FakeSite>,
    username: String,
    screen: Mutex<Screen>,
    cookies: Mutex<Vec<StoredCookie>>,
}

impl FakeDriver {
    pub fn new(site: Arc<FakeSite>, username: &str) -> Self {
        Self {
            site,
            username: username.to_string(),
            screen: Mutex::new(Screen::Blank),
            cookies: Mutex::new(Vec::new()),
        }
    }

    fn feed_cap(&self, revealed: usize) -> usize {
        match self.site.settings.feed_size {
            Some(size) => revealed.min(size),
            None => revealed,
        }
    }

    fn post_href(i: usize) -> String {
        format!("/@author{}/post/P{}", i % 4, i)
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn navigate(&self, url: &str) -> AppResult<()> {
        let path = url.strip_prefix(BASE_URL).unwrap_or(url);
        if self.site.settings.timeout_posts.iter().any(|p| p == path) {
            return Err(AppError::PageLoadTimeout {
                url: url.to_string(),
            });
        }
        if self.site.settings.broken_posts.iter().any(|p| p == path) {
            return Err(AppError::Browser("net::ERR_CONNECTION_RESET".to_string()));
        }
        if self.site.settings.panic_posts.iter().any(|p| p == path) {
            panic!("renderer crashed on {}", path);
        }

        let screen = if path == "/" || path.is_empty() {
            self.site.log.lock().unwrap().home_loads += 1;
            Screen::Home {
                revealed: self.feed_cap(self.site.settings.page_size),
            }
        } else if path.starts_with("/login") {
            Screen::Login
        } else if path.contains("/post/") {
            let settings = &self.site.settings;
            let liked = (0..settings.buttons_per_post)
                .map(|i| i < settings.pre_liked_per_post)
                .collect();
            Screen::Post {
                href: path.to_string(),
                liked,
            }
        } else {
            Screen::Blank
        };
        *self.screen.lock().unwrap() = screen;
        Ok(())
    }

    async fn reload(&self) -> AppResult<()> {
        Ok(())
    }

    async fn wait_for_element(&self, _selector: &str, _timeout: Duration) -> AppResult<bool> {
        Ok(true)
    }

    async fn scroll_to_bottom(&self) -> AppResult<()> {
        let mut screen = self.screen.lock().unwrap();
        if let Screen::Home { revealed } = &mut *screen {
            let next = *revealed + self.site.settings.page_size;
            *revealed = self.feed_cap(next);
        }
        Ok(())
    }

    async fn page_height(&self) -> AppResult<u64> {
        let screen = self.screen.lock().unwrap();
        Ok(match &*screen {
            Screen::Home { revealed } => (*revealed as u64) * 100,
            Screen::Post { .. } => 1000,
            _ => 0,
        })
    }

    async fn page_source(&self) -> AppResult<String> {
        let screen = self.screen.lock().unwrap();
        let mut html = String::from("<html><body>");
        if let Screen::Home { revealed } = &*screen {
            for i in 0..*revealed {
                html.push_str(&format!(
                    r#"<a class="x1i10hfl" href="{}">post</a><a class="x1i10hfl" href="/@author{}">profile</a>"#,
                    Self::post_href(i),
                    i % 4
                ));
            }
        }
        html.push_str("</body></html>");
        Ok(html)
    }

    async fn find_like_buttons(&self) -> AppResult<Vec<LikeButton>> {
        let screen = self.screen.lock().unwrap();
        match &*screen {
            Screen::Post { href, liked } => Ok(liked
                .iter()
                .enumerate()
                .map(|(i, liked)| {
                    let fill = if *liked { "currentColor" } else { "transparent" };
                    LikeButton::new(format!("{}#{}", href, i), Some(fill))
                })
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    async fn click(&self, button: &LikeButton) -> AppResult<()> {
        let mut screen = self.screen.lock().unwrap();
        let Screen::Post { href, liked } = &mut *screen else {
            return Err(AppError::ElementNotFound {
                selector: button.id.clone(),
            });
        };
        let index = button
            .id
            .strip_prefix(&format!("{}#", href))
            .and_then(|i| i.parse::<usize>().ok())
            .ok_or_else(|| AppError::ElementNotFound {
                selector: button.id.clone(),
            })?;
        if self.site.settings.detached_buttons.contains(&index) {
            return Err(AppError::ElementDetached {
                id: button.id.clone(),
            });
        }
        liked[index] = true;
        self.site.log.lock().unwrap().clicks += 1;
        Ok(())
    }

    async fn element_text(&self, _selector: &str) -> AppResult<Option<String>> {
        Ok(self.site.settings.restriction_text.clone())
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        *self.screen.lock().unwrap() = Screen::Login;
        self.site
            .log
            .lock()
            .unwrap()
            .logins
            .push(username.to_string());

        if self.site.settings.passwords.get(username).map(String::as_str) == Some(password) {
            self.cookies.lock().unwrap().push(StoredCookie::new(
                SESSION_COOKIE,
                session_value(username),
                ".threads.test",
            ));
        }
        Ok(())
    }

    async fn is_logged_in(&self) -> AppResult<bool> {
        let expected = session_value(&self.username);
        Ok(self
            .cookies
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.name == SESSION_COOKIE && c.value == expected))
    }

    async fn cookies(&self) -> AppResult<Vec<StoredCookie>> {
        Ok(self.cookies.lock().unwrap().clone())
    }

    async fn set_cookies(&self, cookies: &[StoredCookie]) -> AppResult<()> {
        self.cookies.lock().unwrap().extend_from_slice(cookies);
        Ok(())
    }

    async fn close(&mut self) -> AppResult<()> {
        self.site
            .log
            .lock()
            .unwrap()
            .closed
            .push(self.username.clone());
        Ok(())
    }
}

/// 每个账号创建一个 `FakeDriver`
pub struct FakeSessionFactory {
    pub site: Arc<FakeSite>,
}

impl FakeSessionFactory {
    pub fn new(site: Arc<FakeSite>) -> Arc<Self> {
        Arc::new(Self { site })
    }
}

#[async_trait]
impl SessionFactory for FakeSessionFactory {
    async fn open(&self, account: &Account) -> AppResult<Box<dyn PageDriver>> {
        let settings = &self.site.settings;
        if settings.panic_open.contains(&account.username) {
            panic!("browser crashed for {}", account.username);
        }
        if settings.fail_open.contains(&account.username) {
            return Err(AppError::Browser("launch failed".to_string()));
        }
        self.site
            .log
            .lock()
            .unwrap()
            .opened
            .push(account.username.clone());
        Ok(Box::new(FakeDriver::new(self.site.clone(), &account.username)))
    }
}

/// 第 N 次检查时（从 1 开始）判定为限流
pub struct FireOnCheck {
    fire_at: u32,
    calls: AtomicU32,
}

impl FireOnCheck {
    pub fn new(fire_at: u32) -> Arc<Self> {
        Arc::new(Self {
            fire_at,
            calls: AtomicU32::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateLimitProbe for FireOnCheck {
    async fn is_limited(&self, _driver: &dyn PageDriver) -> AppResult<bool> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(call == self.fire_at)
    }
}

/// 从不判定为限流
pub struct NeverLimited;

#[async_trait]
impl RateLimitProbe for NeverLimited {
    async fn is_limited(&self, _driver: &dyn PageDriver) -> AppResult<bool> {
        Ok(false)
    }
}

/// 记录所有报告事件
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<String>>,
    pub summaries: Mutex<Vec<(RunResults, bool)>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn summaries(&self) -> Vec<(RunResults, bool)> {
        self.summaries.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn run_started(&self, total_accounts: usize, batch_size: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("run {} {}", total_accounts, batch_size));
    }

    fn batch_started(&self, batch: &BatchInfo) {
        self.events.lock().unwrap().push(format!(
            "batch {}/{} {}-{}",
            batch.number, batch.total_batches, batch.first, batch.last
        ));
    }

    fn account_finished(&self, username: &str, report: &AccountReport) {
        self.events
            .lock()
            .unwrap()
            .push(format!("account {} {} {}", username, report.status, report.likes));
    }

    fn summary(&self, results: &RunResults, is_final: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("summary {}", if is_final { "final" } else { "interim" }));
        self.summaries
            .lock()
            .unwrap()
            .push((results.clone(), is_final));
    }

    fn waiting(&self, wait: Duration) {
        self.events
            .lock()
            .unwrap()
            .push(format!("wait {}", wait.as_secs()));
    }
}
