//! 浏览器能力接口 - 基础设施层
//!
//! 上层只通过 `PageDriver` 操作页面，不直接接触 chromiumoxide，
//! 因此批处理、点赞循环、状态分类都可以用假实现测试。

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::{Account, StoredCookie};

/// 页面上一个可点击的"赞"按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeButton {
    /// 页面内的标记 ID，用于再次定位
    pub id: String,
    /// 图标 path 的 fill 属性
    pub fill: Option<String>,
}

impl LikeButton {
    pub fn new(id: impl Into<String>, fill: Option<&str>) -> Self {
        Self {
            id: id.into(),
            fill: fill.map(str::to_string),
        }
    }

    /// fill 非空且不是 transparent 即视为已赞
    pub fn is_liked(&self) -> bool {
        match self.fill.as_deref() {
            None => false,
            Some(fill) => {
                let fill = fill.trim();
                !fill.is_empty() && fill != "transparent"
            }
        }
    }
}

/// 单个浏览器会话的能力集合
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 打开地址；超时返回 `AppError::PageLoadTimeout`
    async fn navigate(&self, url: &str) -> AppResult<()>;

    /// 重新加载当前页面
    async fn reload(&self) -> AppResult<()>;

    /// 等待选择器出现，超时返回 `false`
    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> AppResult<bool>;

    /// 滚动到页面底部
    async fn scroll_to_bottom(&self) -> AppResult<()>;

    /// 当前 `document.body.scrollHeight`
    async fn page_height(&self) -> AppResult<u64>;

    /// 当前页面 HTML
    async fn page_source(&self) -> AppResult<String>;

    /// 查找当前页面上的所有"赞"按钮
    async fn find_like_buttons(&self) -> AppResult<Vec<LikeButton>>;

    /// 点击按钮；元素失效时返回 `AppError::ElementDetached`
    async fn click(&self, button: &LikeButton) -> AppResult<()>;

    /// 第一个匹配元素的文本，不存在时返回 None
    async fn element_text(&self, selector: &str) -> AppResult<Option<String>>;

    /// 通过登录表单登录
    async fn login(&self, username: &str, password: &str) -> AppResult<()>;

    /// 当前会话是否已登录
    async fn is_logged_in(&self) -> AppResult<bool>;

    /// 读取当前会话的 Cookie
    async fn cookies(&self) -> AppResult<Vec<StoredCookie>>;

    /// 写入 Cookie 到当前会话
    async fn set_cookies(&self, cookies: &[StoredCookie]) -> AppResult<()>;

    /// 关闭会话并释放浏览器
    async fn close(&mut self) -> AppResult<()>;
}

/// 为每个账号创建独立的浏览器会话
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self, account: &Account) -> AppResult<Box<dyn PageDriver>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_state_decides_liked() {
        assert!(!LikeButton::new("1", None).is_liked());
        assert!(!LikeButton::new("2", Some("transparent")).is_liked());
        assert!(!LikeButton::new("3", Some("")).is_liked());
        assert!(LikeButton::new("4", Some("currentColor")).is_liked());
        assert!(LikeButton::new("5", Some("#ff3040")).is_liked());
    }
}
