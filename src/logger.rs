//! 日志初始化

use std::fs;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化全局 tracing 订阅者
///
/// 未设置 `RUST_LOG` 时，默认级别为 `info`（verbose 时为 `debug`）。
/// 重复调用是安全的（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件（写入本次运行的头部）
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n自动点赞运行日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}
