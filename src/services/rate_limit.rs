//! 限流检测 - 业务能力层
//!
//! 点赞循环每累计一定次数后调用一次 `RateLimitProbe`，
//! 检测逻辑可以替换，默认实现查找平台的限制提示弹窗。

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::infrastructure::selectors;
use crate::infrastructure::PageDriver;

/// 限流判断
#[async_trait]
pub trait RateLimitProbe: Send + Sync {
    /// 当前页面是否显示平台限制
    async fn is_limited(&self, driver: &dyn PageDriver) -> AppResult<bool>;
}

/// 默认的限制提示文案（英 / 日 / 中）
pub const DEFAULT_NOTICE_MARKERS: &[&str] = &[
    "Try Again Later",
    "We limit how often",
    "後でもう一度",
    "制限しています",
    "稍后再试",
];

/// 通过限制提示弹窗判断限流
///
/// 弹窗存在且文本包含任一提示文案时判定为限流；
/// 只有弹窗（如普通菜单）而没有提示文案时不判定。
#[derive(Debug, Clone)]
pub struct RestrictionNoticeProbe {
    selector: String,
    pattern: Regex,
}

impl RestrictionNoticeProbe {
    pub fn new<S: AsRef<str>>(selector: impl Into<String>, markers: &[S]) -> AppResult<Self> {
        if markers.is_empty() {
            return Err(AppError::Config("限流提示文案不能为空".to_string()));
        }
        let alternatives: Vec<String> = markers
            .iter()
            .map(|m| regex::escape(m.as_ref()))
            .collect();
        let pattern = Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))
            .map_err(|e| AppError::Config(format!("限流提示文案无效: {}", e)))?;

        Ok(Self {
            selector: selector.into(),
            pattern,
        })
    }

    /// 使用默认弹窗选择器和默认文案
    pub fn with_defaults() -> AppResult<Self> {
        Self::new(selectors::RESTRICTION_DIALOG, DEFAULT_NOTICE_MARKERS)
    }

    /// 文本是否包含限制提示
    pub fn matches_notice(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

#[async_trait]
impl RateLimitProbe for RestrictionNoticeProbe {
    async fn is_limited(&self, driver: &dyn PageDriver) -> AppResult<bool> {
        match driver.element_text(&self.selector).await? {
            Some(text) => {
                debug!("限制弹窗文本: {}", crate::utils::logging::truncate_text(&text, 80));
                Ok(self.matches_notice(&text))
            }
            None => Ok(false),
        }
    }
}
