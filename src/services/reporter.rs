//! 运行报告 - 业务能力层
//!
//! 编排层通过 `Reporter` 输出批次进度和汇总，不直接依赖日志系统；
//! 默认实现 `TracingReporter` 写入 tracing，并把最终汇总追加到日志文件。

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::models::{AccountReport, RunResults};

/// 批次信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchInfo {
    /// 批次编号（从 1 开始）
    pub number: usize,
    pub total_batches: usize,
    /// 本批第一个账号的序号（从 1 开始）
    pub first: usize,
    /// 本批最后一个账号的序号
    pub last: usize,
    pub total_accounts: usize,
}

/// 报告输出接口
pub trait Reporter: Send + Sync {
    fn run_started(&self, total_accounts: usize, batch_size: usize);
    fn batch_started(&self, batch: &BatchInfo);
    fn account_finished(&self, username: &str, report: &AccountReport);
    /// `is_final` 为 true 时是整次运行的最终汇总
    fn summary(&self, results: &RunResults, is_final: bool);
    fn waiting(&self, wait: Duration);
}

/// 基于 tracing 的报告输出
pub struct TracingReporter {
    output_log_file: Option<PathBuf>,
}

impl TracingReporter {
    pub fn new(output_log_file: Option<PathBuf>) -> Self {
        Self { output_log_file }
    }

    fn append_to_file(&self, lines: &[String]) {
        let Some(path) = &self.output_log_file else {
            return;
        };
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| {
                for line in lines {
                    writeln!(file, "{}", line)?;
                }
                Ok(())
            });
        if let Err(e) = result {
            warn!("写入日志文件 {} 失败: {}", path.display(), e);
        }
    }
}

impl Reporter for TracingReporter {
    fn run_started(&self, total_accounts: usize, batch_size: usize) {
        info!("✓ 共 {} 个账号", total_accounts);
        info!("📋 将以每批 {} 个的方式处理", batch_size);
    }

    fn batch_started(&self, batch: &BatchInfo) {
        info!("\n{}", "=".repeat(60));
        info!("📦 开始处理第 {}/{} 批", batch.number, batch.total_batches);
        info!(
            "👤 本批账号: {}-{} / 共 {} 个",
            batch.first, batch.last, batch.total_accounts
        );
        info!("{}", "=".repeat(60));
    }

    fn account_finished(&self, username: &str, report: &AccountReport) {
        info!(
            "账号 {}: 状态 {}，点赞 {} 次",
            username, report.status, report.likes
        );
    }

    fn summary(&self, results: &RunResults, is_final: bool) {
        let lines = format_summary(results);
        for line in &lines {
            info!("{}", line);
        }
        if is_final {
            self.append_to_file(&lines);
        }
    }

    fn waiting(&self, wait: Duration) {
        info!("⏳ 等待 {} 秒后处理下一批", wait.as_secs());
    }
}

/// 生成汇总表
pub fn format_summary(results: &RunResults) -> Vec<String> {
    let totals = results.totals();
    let mut lines = Vec::with_capacity(results.len() + 10);

    lines.push("=".repeat(70));
    lines.push("全部账号处理结果:".to_string());
    lines.push("=".repeat(70));
    lines.push(format!("{:<20} {:<15} {:<10}", "账号", "状态", "点赞数"));
    lines.push("-".repeat(70));
    for (username, report) in results.iter() {
        lines.push(format!(
            "{:<20} {:<15} {:<10}",
            username,
            report.status.label(),
            report.likes
        ));
    }
    lines.push("=".repeat(70));
    lines.push(format!("总点赞数: {}", totals.likes));
    lines.push(format!("限流账号数: {}", totals.rate_limited));
    lines.push(format!("失败账号数: {}", totals.failed));
    lines.push("=".repeat(70));

    lines
}
