//! 基于 chromiumoxide 的 `PageDriver` 实现
//!
//! 每个账号启动一个独立的浏览器（临时用户数据目录），
//! `close()` 时关闭浏览器、终止事件任务并删除临时目录。

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::Browser;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use crate::browser::{launch_browser, LaunchOptions};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::js_executor::JsExecutor;
use crate::infrastructure::page_driver::{LikeButton, PageDriver, SessionFactory};
use crate::infrastructure::selectors;
use crate::models::{Account, StoredCookie};

/// 轮询元素时的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chromium 会话
pub struct ChromeDriver {
    browser: Option<Browser>,
    handler_task: Option<JoinHandle<()>>,
    executor: JsExecutor,
    profile_dir: Option<TempDir>,
    login_url: String,
    page_load_timeout: Duration,
    login_settle: Duration,
}

impl ChromeDriver {
    /// 按配置启动一个新会话
    pub async fn launch(config: &Config) -> AppResult<Self> {
        let profile_dir = tempfile::Builder::new()
            .prefix("autolike-profile-")
            .tempdir()?;

        let options = LaunchOptions {
            headless: config.headless,
            user_agent: &config.user_agent,
            profile_dir: profile_dir.path(),
        };
        let (browser, handler_task, page) = launch_browser(&options).await?;

        Ok(Self {
            browser: Some(browser),
            handler_task: Some(handler_task),
            executor: JsExecutor::new(page),
            profile_dir: Some(profile_dir),
            login_url: config.login_url(),
            page_load_timeout: config.page_load_timeout(),
            login_settle: config.login_settle(),
        })
    }

    /// 在超时时间内等待选择器出现
    async fn poll_selector(&self, selector: &str, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        loop {
            if self.executor.page().find_element(selector).await.is_ok() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// 在输入框中输入文本（先清空）
    async fn fill_input(&self, selector: &str, text: &str) -> AppResult<()> {
        let found: bool = self
            .executor
            .call(
                "(sel) => { const el = document.querySelector(sel); if (el) { el.value = ''; } return !!el; }",
                selector,
            )
            .await?;
        if !found {
            return Err(AppError::ElementNotFound {
                selector: selector.to_string(),
            });
        }

        self.executor
            .page()
            .find_element(selector)
            .await?
            .click()
            .await?
            .type_str(text)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    async fn navigate(&self, url: &str) -> AppResult<()> {
        debug!("正在打开: {}", url);
        match timeout(self.page_load_timeout, self.executor.page().goto(url)).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(AppError::PageLoadTimeout {
                url: url.to_string(),
            }),
        }
    }

    async fn reload(&self) -> AppResult<()> {
        match timeout(self.page_load_timeout, self.executor.page().reload()).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(AppError::PageLoadTimeout {
                url: "reload".to_string(),
            }),
        }
    }

    async fn wait_for_element(&self, selector: &str, limit: Duration) -> AppResult<bool> {
        Ok(self.poll_selector(selector, limit).await)
    }

    async fn scroll_to_bottom(&self) -> AppResult<()> {
        self.executor
            .eval("(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()")
            .await?;
        Ok(())
    }

    async fn page_height(&self) -> AppResult<u64> {
        self.executor.eval_as("document.body.scrollHeight").await
    }

    async fn page_source(&self) -> AppResult<String> {
        Ok(self.executor.page().content().await?)
    }

    async fn find_like_buttons(&self) -> AppResult<Vec<LikeButton>> {
        // 给每个按钮打上标记，返回标记 ID 与图标 fill 状态
        const TAG_BUTTONS: &str = r#"
            ({ attr, button, icon }) => {
                const out = [];
                window.__autolikeSeq = window.__autolikeSeq || 0;
                document.querySelectorAll(button).forEach((el) => {
                    const svg = el.querySelector(icon);
                    if (!svg) return;
                    const path = svg.querySelector('path');
                    if (!path) return;
                    let id = el.getAttribute(attr);
                    if (!id) {
                        window.__autolikeSeq += 1;
                        id = String(window.__autolikeSeq);
                        el.setAttribute(attr, id);
                    }
                    out.push({ id: id, fill: path.getAttribute('fill') });
                });
                return out;
            }
        "#;

        let args = serde_json::json!({
            "attr": selectors::BUTTON_MARK_ATTR,
            "button": selectors::LIKE_BUTTON,
            "icon": selectors::LIKE_ICON,
        });
        self.executor.call(TAG_BUTTONS, &args).await
    }

    async fn click(&self, button: &LikeButton) -> AppResult<()> {
        let selector = format!("[{}=\"{}\"]", selectors::BUTTON_MARK_ATTR, button.id);
        let clicked: bool = self
            .executor
            .call(
                "(sel) => { const el = document.querySelector(sel); if (!el || !el.isConnected) return false; el.click(); return true; }",
                &selector,
            )
            .await?;
        if clicked {
            Ok(())
        } else {
            Err(AppError::ElementDetached {
                id: button.id.clone(),
            })
        }
    }

    async fn element_text(&self, selector: &str) -> AppResult<Option<String>> {
        self.executor
            .call(
                "(sel) => { const el = document.querySelector(sel); return el ? (el.innerText || '') : null; }",
                selector,
            )
            .await
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        self.navigate(&self.login_url).await?;
        info!("正在访问登录页: {}", self.login_url);

        if !self
            .poll_selector(selectors::USERNAME_INPUT, Duration::from_secs(10))
            .await
        {
            return Err(AppError::ElementNotFound {
                selector: selectors::USERNAME_INPUT.to_string(),
            });
        }

        self.fill_input(selectors::USERNAME_INPUT, username).await?;
        debug!("已输入用户名");
        self.fill_input(selectors::PASSWORD_INPUT, password).await?;
        debug!("已输入密码");

        sleep(Duration::from_secs(2)).await;

        const CLICK_XPATH: &str = r#"
            (xpath) => {
                const hit = document.evaluate(xpath, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null);
                const node = hit.singleNodeValue;
                if (!node) return false;
                const button = node.closest("div[role='button']") || node;
                button.click();
                return true;
            }
        "#;
        let clicked: bool = self
            .executor
            .call(CLICK_XPATH, selectors::LOGIN_BUTTON_XPATH)
            .await?;
        if !clicked {
            return Err(AppError::ElementNotFound {
                selector: selectors::LOGIN_BUTTON_XPATH.to_string(),
            });
        }
        info!("已点击登录按钮，等待页面稳定...");

        sleep(self.login_settle).await;

        if !self.poll_selector("body", self.page_load_timeout).await {
            return Err(AppError::PageLoadTimeout {
                url: self.login_url.clone(),
            });
        }
        Ok(())
    }

    async fn is_logged_in(&self) -> AppResult<bool> {
        let cookies = self.executor.page().get_cookies().await?;
        Ok(cookies
            .iter()
            .any(|c| c.name == selectors::SESSION_COOKIE && !c.value.is_empty()))
    }

    async fn cookies(&self) -> AppResult<Vec<StoredCookie>> {
        let cookies = self.executor.page().get_cookies().await?;
        Ok(cookies
            .into_iter()
            .map(|c| StoredCookie {
                name: c.name,
                value: c.value,
                domain: c.domain,
                path: c.path,
                expires: if c.session { None } else { Some(c.expires) },
                http_only: c.http_only,
                secure: c.secure,
            })
            .collect())
    }

    async fn set_cookies(&self, cookies: &[StoredCookie]) -> AppResult<()> {
        let mut params = Vec::with_capacity(cookies.len());
        for cookie in cookies {
            let param = CookieParam::builder()
                .name(cookie.name.clone())
                .value(cookie.value.clone())
                .domain(cookie.domain.clone())
                .path(cookie.path.clone())
                .secure(cookie.secure)
                .http_only(cookie.http_only)
                .build()
                .map_err(AppError::Browser)?;
            params.push(param);
        }
        self.executor.page().set_cookies(params).await?;
        Ok(())
    }

    async fn close(&mut self) -> AppResult<()> {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("关闭浏览器失败: {}", e);
            }
            if let Err(e) = browser.wait().await {
                warn!("等待浏览器进程退出失败: {}", e);
            }
        }
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
        if let Some(dir) = self.profile_dir.take() {
            if let Err(e) = dir.close() {
                debug!("删除临时用户目录失败: {}", e);
            }
        }
        info!("浏览器已关闭");
        Ok(())
    }
}

// 未调用 close() 就被丢弃时，至少终止事件任务
impl Drop for ChromeDriver {
    fn drop(&mut self) {
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
    }
}

/// 为每个账号启动新 Chromium 的会话工厂
pub struct ChromeSessionFactory {
    config: Config,
}

impl ChromeSessionFactory {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SessionFactory for ChromeSessionFactory {
    async fn open(&self, account: &Account) -> AppResult<Box<dyn PageDriver>> {
        debug!("为账号 {} 启动浏览器会话", account.username);
        let driver = ChromeDriver::launch(&self.config).await?;
        Ok(Box::new(driver))
    }
}
