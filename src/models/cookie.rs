use serde::{Deserialize, Serialize};

/// 持久化的会话 Cookie
///
/// 只保存恢复会话所需的字段，不依赖 CDP 的类型定义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    /// 过期时间（Unix 秒）；会话 Cookie 为 None
    #[serde(default)]
    pub expires: Option<f64>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
}

fn default_path() -> String {
    "/".to_string()
}

impl StoredCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: default_path(),
            expires: None,
            http_only: false,
            secure: true,
        }
    }
}
