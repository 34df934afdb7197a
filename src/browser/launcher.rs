use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult};

/// 浏览器启动参数
#[derive(Debug, Clone)]
pub struct LaunchOptions<'a> {
    pub headless: bool,
    pub user_agent: &'a str,
    /// 独立的用户数据目录，保证账号之间不共享会话
    pub profile_dir: &'a Path,
}

/// 启动浏览器并打开一个空白页
///
/// 返回浏览器、事件处理任务和页面；调用方负责在结束时关闭浏览器并终止事件任务。
pub async fn launch_browser(options: &LaunchOptions<'_>) -> AppResult<(Browser, JoinHandle<()>, Page)> {
    info!("🚀 启动浏览器...");
    debug!(
        "无头模式: {}, 用户数据目录: {}",
        options.headless,
        options.profile_dir.display()
    );

    let builder = BrowserConfig::builder();
    let builder = if options.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };

    let config = builder
        .user_data_dir(options.profile_dir)
        .arg(format!("--user-agent={}", options.user_agent))
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--lang=ja-JP",
        ])
        .build()
        .map_err(|e| {
            error!("配置浏览器失败: {}", e);
            AppError::Browser(format!("配置浏览器失败: {}", e))
        })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        AppError::Browser(format!("启动浏览器失败: {}", e))
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            error!("创建页面失败: {}", e);
            handler_task.abort();
            return Err(AppError::Browser(format!("创建页面失败: {}", e)));
        }
    };

    info!("✅ 浏览器已就绪");
    Ok((browser, handler_task, page))
}
