//! 推荐投稿收集服务 - 业务能力层
//!
//! 只负责"从首页收集投稿链接"，不关心点赞

use std::collections::HashSet;
use std::time::Duration;

use scraper::{Html, Selector};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::selectors;
use crate::infrastructure::PageDriver;

/// 推荐投稿收集服务
pub struct FeedService {
    home_url: String,
    reload_interval: usize,
    scroll_pause: Duration,
}

impl FeedService {
    pub fn new(config: &Config) -> Self {
        Self {
            home_url: config.home_url(),
            reload_interval: config.reload_interval.max(1),
            scroll_pause: config.feed_scroll_pause(),
        }
    }

    /// 收集最多 `wanted` 个投稿链接
    ///
    /// 滚动首页并提取链接，直到数量足够，或者滚动后页面高度不再变化（到底）。
    /// 每新找到 `reload_interval` 个投稿后重新加载首页。
    pub async fn fetch_posts(&self, driver: &dyn PageDriver, wanted: usize) -> AppResult<Vec<String>> {
        let mut posts: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        if wanted == 0 {
            return Ok(posts);
        }

        let mut needs_load = true;
        let mut found_since_load = 0usize;
        let mut last_height = 0u64;

        while posts.len() < wanted {
            if needs_load {
                driver.navigate(&self.home_url).await?;
                info!("首页已加载，当前投稿数: {}", posts.len());
                sleep(self.scroll_pause).await;
                last_height = driver.page_height().await?;
                found_since_load = 0;
                needs_load = false;
            }

            driver.scroll_to_bottom().await?;
            sleep(self.scroll_pause).await;

            let html = driver.page_source().await?;
            for href in extract_post_links(&html) {
                if !seen.insert(href.clone()) {
                    continue;
                }
                posts.push(href);
                found_since_load += 1;
                if posts.len() >= wanted {
                    break;
                }
                if found_since_load >= self.reload_interval {
                    needs_load = true;
                    break;
                }
            }

            let new_height = driver.page_height().await?;
            if new_height == last_height {
                info!("已到达首页底部，无法加载更多投稿");
                break;
            }
            last_height = new_height;
        }

        posts.truncate(wanted);
        info!("共收集到 {} 个推荐投稿", posts.len());
        for (i, href) in posts.iter().enumerate() {
            debug!("{}. {}", i + 1, href);
        }

        Ok(posts)
    }
}

/// 从 HTML 中提取投稿链接（按出现顺序去重）
pub fn extract_post_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse(selectors::POST_LINK) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let mut links: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if href.contains(selectors::POST_PATH_MARKER) && !links.iter().any(|l| l == href) {
                links.push(href.to_string());
            }
        }
    }
    links
}
