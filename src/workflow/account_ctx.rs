//! 账号处理上下文
//!
//! 封装"我正在处理第几批的第几个账号"这一信息

use std::fmt::Display;

/// 账号处理上下文（仅用于日志显示）
#[derive(Debug, Clone)]
pub struct AccountCtx {
    pub username: String,

    /// 账号在整次运行中的序号（从1开始）
    pub account_index: usize,

    /// 账号总数
    pub total_accounts: usize,

    /// 所在批次（从1开始）
    pub batch_number: usize,
}

impl AccountCtx {
    pub fn new(
        username: impl Into<String>,
        account_index: usize,
        total_accounts: usize,
        batch_number: usize,
    ) -> Self {
        Self {
            username: username.into(),
            account_index,
            total_accounts,
            batch_number,
        }
    }
}

impl Display for AccountCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[批次#{} 账号 {}/{} {}]",
            self.batch_number, self.account_index, self.total_accounts, self.username
        )
    }
}
