//! 批量账号处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **分批**：按固定大小把账号切分为连续的批次，保持原始顺序
//! 2. **串行处理**：批内逐个调用 `AccountFlow`，单个账号失败不影响其他账号
//! 3. **汇总**：每批结束后合并结果并输出中间汇总
//! 4. **节流**：还有后续批次时固定等待一段时间
//! 5. **最终报告**：最后一批结束后输出最终汇总

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::time::sleep;
use tracing::error;

use crate::config::Config;
use crate::models::{Account, AccountReport, RunResults};
use crate::services::{BatchInfo, Reporter};
use crate::workflow::{AccountCtx, AccountFlow};

/// 把账号切分为大小为 `batch_size` 的连续批次（`batch_size` 为 0 时按 1 处理）
pub fn partition(accounts: &[Account], batch_size: usize) -> Vec<&[Account]> {
    accounts.chunks(batch_size.max(1)).collect()
}

/// 批量账号处理器
pub struct BatchProcessor {
    flow: AccountFlow,
    reporter: Arc<dyn Reporter>,
    batch_size: usize,
    batch_wait: Duration,
}

impl BatchProcessor {
    pub fn new(config: &Config, flow: AccountFlow, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            flow,
            reporter,
            batch_size: config.effective_batch_size(),
            batch_wait: config.batch_wait(),
        }
    }

    /// 处理全部账号，返回整次运行的结果表
    pub async fn run(&self, accounts: &[Account]) -> RunResults {
        let total_accounts = accounts.len();
        let batches = partition(accounts, self.batch_size);
        let total_batches = batches.len();
        let mut results = RunResults::new();

        self.reporter.run_started(total_accounts, self.batch_size);

        for (batch_idx, batch) in batches.iter().enumerate() {
            let batch_start = batch_idx * self.batch_size;
            let info = BatchInfo {
                number: batch_idx + 1,
                total_batches,
                first: batch_start + 1,
                last: batch_start + batch.len(),
                total_accounts,
            };
            self.reporter.batch_started(&info);

            let batch_results = self.process_batch(batch, batch_start, &info).await;
            results.merge(batch_results);

            self.reporter.summary(&results, false);

            if batch_idx + 1 < total_batches {
                self.reporter.waiting(self.batch_wait);
                sleep(self.batch_wait).await;
            }
        }

        self.reporter.summary(&results, true);
        results
    }

    /// 串行处理一个批次
    async fn process_batch(&self, batch: &[Account], batch_start: usize, info: &BatchInfo) -> RunResults {
        let mut batch_results = RunResults::new();

        for (idx, account) in batch.iter().enumerate() {
            let ctx = AccountCtx::new(
                &account.username,
                batch_start + idx + 1,
                info.total_accounts,
                info.number,
            );

            // 账号流程内部的 panic 也只记为失败
            let report = match AssertUnwindSafe(self.flow.run(account, &ctx))
                .catch_unwind()
                .await
            {
                Ok(report) => report,
                Err(_) => {
                    error!("{} ❌ 处理过程中发生意外错误", ctx);
                    AccountReport::failed()
                }
            };

            self.reporter.account_finished(&account.username, &report);
            batch_results.insert(account.username.clone(), report);
        }

        batch_results
    }
}
