//! 登录服务 - 业务能力层
//!
//! 优先复用已保存的 Cookie；Cookie 无效时删除并改为表单登录。

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::PageDriver;
use crate::models::Account;
use crate::services::cookie_store::CookieStore;

/// 登录方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// 通过已保存的 Cookie 恢复会话
    RestoredSession,
    /// 通过登录表单登录
    Interactive,
}

/// 登录服务
pub struct AuthService {
    home_url: String,
    cookie_store: CookieStore,
}

impl AuthService {
    pub fn new(config: &Config, cookie_store: CookieStore) -> Self {
        Self {
            home_url: config.home_url(),
            cookie_store,
        }
    }

    /// 登录账号
    ///
    /// 表单登录失败或登录后检测不到会话时返回 `AppError::AuthenticationFailed`。
    pub async fn authenticate(&self, driver: &dyn PageDriver, account: &Account) -> AppResult<AuthMethod> {
        let username = &account.username;

        if self.try_restore(driver, username).await {
            info!("账号 {}: 已通过保存的 Cookie 恢复会话", username);
            return Ok(AuthMethod::RestoredSession);
        }

        driver
            .login(username, &account.password)
            .await
            .map_err(|e| AppError::auth_failed(username, e.to_string()))?;

        if !driver.is_logged_in().await? {
            return Err(AppError::auth_failed(username, "登录后未检测到会话"));
        }
        info!("账号 {}: 登录成功", username);

        self.persist(driver, username).await;
        Ok(AuthMethod::Interactive)
    }

    /// 保存当前会话的 Cookie（失败只记录警告）
    pub async fn persist(&self, driver: &dyn PageDriver, username: &str) {
        let result = match driver.cookies().await {
            Ok(cookies) => self.cookie_store.save(username, &cookies).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => info!("账号 {}: 已保存 Cookie", username),
            Err(e) => warn!("账号 {}: 保存 Cookie 失败: {}", username, e),
        }
    }

    /// 尝试用保存的 Cookie 恢复会话
    async fn try_restore(&self, driver: &dyn PageDriver, username: &str) -> bool {
        let cookies = match self.cookie_store.load(username).await {
            Ok(Some(cookies)) if !cookies.is_empty() => cookies,
            Ok(_) => return false,
            Err(e) => {
                warn!("账号 {}: 读取 Cookie 失败，改为表单登录: {}", username, e);
                return false;
            }
        };

        let restored = async {
            driver.navigate(&self.home_url).await?;
            driver.set_cookies(&cookies).await?;
            driver.reload().await?;
            driver.is_logged_in().await
        }
        .await;

        match restored {
            Ok(true) => true,
            Ok(false) => {
                warn!("账号 {}: 保存的 Cookie 已失效，删除后改为表单登录", username);
                if let Err(e) = self.cookie_store.delete(username).await {
                    warn!("账号 {}: 删除 Cookie 失败: {}", username, e);
                }
                false
            }
            Err(e) => {
                warn!("账号 {}: 恢复会话失败，改为表单登录: {}", username, e);
                false
            }
        }
    }
}
