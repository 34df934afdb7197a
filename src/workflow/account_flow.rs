//! 账号处理流程 - 流程层
//!
//! 核心职责：定义"一个账号"的完整处理流程
//!
//! 流程顺序：
//! 1. 启动浏览器会话
//! 2. 登录（Cookie 恢复 → 表单登录）
//! 3. 收集推荐投稿
//! 4. 逐个投稿点赞
//! 5. 保存 Cookie（成功 / 限流）
//! 6. 关闭浏览器（任何情况下）

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{PageDriver, SessionFactory};
use crate::models::{Account, AccountReport, AccountStatus};
use crate::services::{AuthService, CookieStore, FeedService, LikeService, RateLimitProbe};
use crate::workflow::account_ctx::AccountCtx;

/// 账号处理流程
///
/// - 持有会话工厂，不持有具体会话
/// - 任何错误都在这里转换为 `failed`，不向上传播
pub struct AccountFlow {
    factory: Arc<dyn SessionFactory>,
    auth_service: AuthService,
    feed_service: FeedService,
    like_service: LikeService,
    config: Config,
}

impl AccountFlow {
    pub fn new(
        config: &Config,
        factory: Arc<dyn SessionFactory>,
        probe: Arc<dyn RateLimitProbe>,
    ) -> Self {
        let cookie_store = CookieStore::new(&config.cookie_dir);
        Self {
            factory,
            auth_service: AuthService::new(config, cookie_store),
            feed_service: FeedService::new(config),
            like_service: LikeService::new(config, probe),
            config: config.clone(),
        }
    }

    /// 处理单个账号
    ///
    /// 浏览器会话在入口处获取，在所有返回路径上释放。
    pub async fn run(&self, account: &Account, ctx: &AccountCtx) -> AccountReport {
        self.log_account(account, ctx);

        let mut driver = match self.factory.open(account).await {
            Ok(driver) => driver,
            Err(e) => {
                error!("{} ❌ 启动浏览器失败: {}", ctx, e);
                return AccountReport::failed();
            }
        };

        // panic 也要先关闭浏览器，再记为失败
        let result = AssertUnwindSafe(self.process(driver.as_ref(), account, ctx))
            .catch_unwind()
            .await;

        if let Err(e) = driver.close().await {
            warn!("{} 关闭浏览器失败: {}", ctx, e);
        }
        info!("{} 浏览器已关闭", ctx);

        match result {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => {
                error!("{} ❌ 处理失败: {}", ctx, e);
                AccountReport::failed()
            }
            Err(_) => {
                error!("{} ❌ 处理过程中发生意外错误", ctx);
                AccountReport::failed()
            }
        }
    }

    async fn process(
        &self,
        driver: &dyn PageDriver,
        account: &Account,
        ctx: &AccountCtx,
    ) -> AppResult<AccountReport> {
        let method = self.auth_service.authenticate(driver, account).await?;
        info!("{} 登录方式: {:?}", ctx, method);

        let hrefs = self
            .feed_service
            .fetch_posts(driver, account.num_likes)
            .await?;
        let post_urls: Vec<String> = hrefs.iter().map(|h| self.config.post_url(h)).collect();

        let outcome = self.like_service.like_posts(driver, &post_urls).await?;
        let report = AccountReport::from(outcome);

        match report.status {
            AccountStatus::RateLimited => {
                warn!("{} ⚠️ 检测到限流，停止处理，累计点赞 {} 次", ctx, report.likes);
            }
            _ => {
                info!("{} ✓ 处理完成，累计点赞 {} 次", ctx, report.likes);
            }
        }

        self.auth_service
            .persist(driver, &account.username)
            .await;

        Ok(report)
    }

    // ========== 日志辅助方法 ==========

    fn log_account(&self, account: &Account, ctx: &AccountCtx) {
        info!("{}", "-".repeat(40));
        info!("{} 开始处理", ctx);
        info!("{} 目标投稿数: {}", ctx, account.num_likes);
        info!("{}", "-".repeat(40));
    }
}
