use std::fmt;

use serde::{Deserialize, Serialize};

/// 默认点赞投稿数
pub const DEFAULT_NUM_LIKES: usize = 10;

fn default_num_likes() -> usize {
    DEFAULT_NUM_LIKES
}

/// 账号记录（加载后不再修改）
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password: String,
    /// 需要处理的投稿数量
    #[serde(default = "default_num_likes")]
    pub num_likes: usize,
}

impl Account {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        num_likes: usize,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            num_likes,
        }
    }
}

// 密码不进入日志
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"***")
            .field("num_likes", &self.num_likes)
            .finish()
    }
}

/// TOML 账号文件的外层结构
#[derive(Debug, Clone, Deserialize)]
pub struct AccountFile {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_likes_defaults_to_ten() {
        let account: Account =
            serde_json::from_str(r#"{"username":"alice","password":"pw"}"#).unwrap();
        assert_eq!(account.num_likes, 10);
    }

    #[test]
    fn debug_hides_password() {
        let account = Account::new("alice", "hunter2", 3);
        let printed = format!("{:?}", account);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }
}
