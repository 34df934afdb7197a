//! 点赞服务 - 业务能力层
//!
//! 打开投稿页，逐个点击尚未点赞的按钮；
//! 会话累计点赞数每达到检查间隔的整数倍时调用限流检测，命中后立即中止。

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::PageDriver;
use crate::models::LikeOutcome;
use crate::services::rate_limit::RateLimitProbe;

/// 点赞服务
pub struct LikeService {
    probe: Arc<dyn RateLimitProbe>,
    page_load_timeout: Duration,
    max_scroll_attempts: usize,
    scroll_pause: Duration,
    click_pause: Duration,
    check_interval: u32,
    limit_check_pause: Duration,
    post_delay: Duration,
}

impl LikeService {
    pub fn new(config: &Config, probe: Arc<dyn RateLimitProbe>) -> Self {
        Self {
            probe,
            page_load_timeout: config.page_load_timeout(),
            max_scroll_attempts: config.max_scroll_attempts,
            scroll_pause: config.scroll_pause(),
            click_pause: config.click_pause(),
            check_interval: config.effective_limit_check_interval(),
            limit_check_pause: config.limit_check_pause(),
            post_delay: config.post_delay(),
        }
    }

    /// 依次处理多个投稿
    ///
    /// 返回整个会话的点赞数；某个投稿检测到限流时立即返回 `RateLimited`，
    /// 其中的数量包含此前所有投稿的点赞。
    /// 单个投稿出错只记为 0 次，继续处理下一个投稿。
    pub async fn like_posts(&self, driver: &dyn PageDriver, post_urls: &[String]) -> AppResult<LikeOutcome> {
        let total_posts = post_urls.len();
        let mut total_likes = 0u32;

        for (index, url) in post_urls.iter().enumerate() {
            info!("处理中: {}/{} - {}", index + 1, total_posts, url);

            let outcome = match self.like_post(driver, url, total_likes).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("处理投稿 {} 时发生错误，跳过: {}", url, e);
                    LikeOutcome::Completed(0)
                }
            };

            total_likes += outcome.count();
            if outcome.is_rate_limited() {
                return Ok(LikeOutcome::RateLimited(total_likes));
            }
            info!("投稿 {} 点赞了 {} 条评论", url, outcome.count());

            sleep(self.post_delay).await;
            info!(
                "进度: 累计点赞 {} 次（已处理 {}/{} 个投稿）",
                total_likes,
                index + 1,
                total_posts
            );
        }

        info!("全部投稿处理完成，累计点赞 {} 次", total_likes);
        Ok(LikeOutcome::Completed(total_likes))
    }

    /// 处理单个投稿
    ///
    /// `session_total` 为本会话此前已完成的点赞数。
    /// 页面加载超时只跳过本投稿（记为 0 次）。
    pub async fn like_post(
        &self,
        driver: &dyn PageDriver,
        post_url: &str,
        session_total: u32,
    ) -> AppResult<LikeOutcome> {
        info!("开始处理投稿: {}", post_url);

        match driver.navigate(post_url).await {
            Ok(()) => {}
            Err(AppError::PageLoadTimeout { url }) => {
                error!("页面加载超时: {}", url);
                return Ok(LikeOutcome::Completed(0));
            }
            Err(e) => return Err(e),
        }
        if !driver.wait_for_element("body", self.page_load_timeout).await? {
            error!("页面加载超时: {}", post_url);
            return Ok(LikeOutcome::Completed(0));
        }

        let mut click_count = 0u32;
        let mut running_total = session_total;

        for attempt in 0..self.max_scroll_attempts {
            debug!("滚动尝试 {}/{}", attempt + 1, self.max_scroll_attempts);

            let buttons = match driver.find_like_buttons().await {
                Ok(buttons) => buttons,
                Err(e) => {
                    warn!("查找点赞按钮失败: {}", e);
                    Vec::new()
                }
            };
            if buttons.is_empty() {
                debug!("未找到点赞按钮，继续滚动");
            }

            for button in buttons.iter() {
                if button.is_liked() {
                    debug!("跳过已点赞的按钮 {}", button.id);
                    continue;
                }

                match driver.click(button).await {
                    Ok(()) => {}
                    Err(e) if e.is_transient() => continue,
                    Err(e) => {
                        error!("点击按钮时发生错误: {}", e);
                        continue;
                    }
                }

                click_count += 1;
                running_total += 1;
                info!("已点赞，本投稿累计: {}", click_count);
                sleep(self.click_pause).await;

                if running_total % self.check_interval == 0 && self.check_limit(driver, running_total).await {
                    return Ok(LikeOutcome::RateLimited(click_count));
                }
            }

            let last_height = driver.page_height().await?;
            driver.scroll_to_bottom().await?;
            sleep(self.scroll_pause).await;
            let new_height = driver.page_height().await?;
            if new_height == last_height {
                info!("无法继续滚动，结束本投稿");
                break;
            }
        }

        info!("{}", "-".repeat(50));
        info!("本投稿共点赞 {} 次", click_count);
        info!("{}", "-".repeat(50));
        Ok(LikeOutcome::Completed(click_count))
    }

    /// 检查是否被限流（检测失败按未限流处理）
    async fn check_limit(&self, driver: &dyn PageDriver, running_total: u32) -> bool {
        info!("★ 已累计点赞 {} 次，检查是否被限流", running_total);
        sleep(self.limit_check_pause).await;

        match self.probe.is_limited(driver).await {
            Ok(true) => {
                warn!("{}", "=".repeat(50));
                warn!("检测到平台限制，累计点赞: {}，停止处理", running_total);
                warn!("{}", "=".repeat(50));
                true
            }
            Ok(false) => {
                info!("★ 未检测到限制，继续处理");
                false
            }
            Err(e) => {
                warn!("限流检测失败，继续处理: {}", e);
                false
            }
        }
    }
}
