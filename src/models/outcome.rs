//! 处理结果模型
//!
//! - `LikeOutcome`：单个投稿 / 单个账号点赞循环的结果
//! - `AccountStatus` / `AccountReport`：单个账号的最终状态
//! - `RunResults` / `RunTotals`：整次运行的汇总

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// 点赞循环结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// 正常结束，携带点赞数
    Completed(u32),
    /// 检测到限流后中止，携带中止前的点赞数
    RateLimited(u32),
}

impl LikeOutcome {
    pub fn count(&self) -> u32 {
        match self {
            LikeOutcome::Completed(n) | LikeOutcome::RateLimited(n) => *n,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LikeOutcome::RateLimited(_))
    }
}

/// 账号处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountStatus {
    Success,
    RateLimited,
    Failed,
}

impl AccountStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AccountStatus::Success => "success",
            AccountStatus::RateLimited => "rate-limited",
            AccountStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单个账号的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountReport {
    pub likes: u32,
    pub status: AccountStatus,
}

impl AccountReport {
    pub fn failed() -> Self {
        Self {
            likes: 0,
            status: AccountStatus::Failed,
        }
    }
}

impl From<LikeOutcome> for AccountReport {
    fn from(outcome: LikeOutcome) -> Self {
        match outcome {
            LikeOutcome::Completed(likes) => Self {
                likes,
                status: AccountStatus::Success,
            },
            LikeOutcome::RateLimited(likes) => Self {
                likes,
                status: AccountStatus::RateLimited,
            },
        }
    }
}

/// 整次运行的结果表
///
/// 按首次插入顺序保存；同一账号再次插入时原位覆盖，保证键唯一。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResults {
    entries: IndexMap<String, AccountReport>,
}

impl RunResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖，返回旧值
    pub fn insert(&mut self, username: impl Into<String>, report: AccountReport) -> Option<AccountReport> {
        self.entries.insert(username.into(), report)
    }

    /// 合并另一批结果
    pub fn merge(&mut self, other: RunResults) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, username: &str) -> Option<&AccountReport> {
        self.entries.get(username)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccountReport)> {
        self.entries.iter().map(|(name, report)| (name.as_str(), report))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 汇总统计（每次调用时重新计算）
    pub fn totals(&self) -> RunTotals {
        self.entries
            .values()
            .fold(RunTotals::default(), |mut totals, report| {
                totals.accounts += 1;
                totals.likes += u64::from(report.likes);
                match report.status {
                    AccountStatus::RateLimited => totals.rate_limited += 1,
                    AccountStatus::Failed => totals.failed += 1,
                    AccountStatus::Success => {}
                }
                totals
            })
    }
}

/// 运行汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub accounts: usize,
    pub likes: u64,
    pub rate_limited: usize,
    pub failed: usize,
}
