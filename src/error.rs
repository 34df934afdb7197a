//! 错误类型
//!
//! 下层（infrastructure / services / workflow）统一返回 `AppResult`，
//! 顶层（main / App）使用 `anyhow::Result` 汇总。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 账号文件缺失或格式错误
    #[error("账号文件加载失败 ({path}): {reason}")]
    AccountsLoad { path: String, reason: String },

    /// 登录失败
    #[error("账号 {username} 登录失败: {reason}")]
    AuthenticationFailed { username: String, reason: String },

    /// 页面加载超时
    #[error("页面加载超时: {url}")]
    PageLoadTimeout { url: String },

    /// 元素已从页面上分离
    #[error("元素已失效: {id}")]
    ElementDetached { id: String },

    /// 元素不存在
    #[error("未找到元素: {selector}")]
    ElementNotFound { selector: String },

    /// 浏览器启动、连接或 CDP 调用失败
    #[error("浏览器错误: {0}")]
    Browser(String),

    /// 页面内脚本执行失败
    #[error("执行脚本失败: {0}")]
    Script(String),

    /// Cookie 文件读写失败
    #[error("Cookie 存储失败 ({path}): {source}")]
    CookieStore {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML解析失败: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AppError {
    /// 是否为可忽略的元素查找错误（元素失效 / 不存在）
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::ElementDetached { .. } | AppError::ElementNotFound { .. }
        )
    }

    /// 创建登录失败错误
    pub fn auth_failed(username: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::AuthenticationFailed {
            username: username.into(),
            reason: reason.into(),
        }
    }

    /// 创建账号文件加载错误
    pub fn accounts_load(path: impl Into<String>, reason: impl ToString) -> Self {
        AppError::AccountsLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_lookup_errors_are_transient() {
        assert!(AppError::ElementDetached { id: "3".into() }.is_transient());
        assert!(AppError::ElementNotFound {
            selector: "svg".into()
        }
        .is_transient());
        assert!(!AppError::PageLoadTimeout { url: "x".into() }.is_transient());
        assert!(!AppError::auth_failed("alice", "bad password").is_transient());
    }

    #[test]
    fn display_carries_context() {
        let err = AppError::auth_failed("alice", "未检测到会话");
        assert_eq!(err.to_string(), "账号 alice 登录失败: 未检测到会话");
    }
}
