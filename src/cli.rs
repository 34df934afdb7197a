//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// 多账号自动点赞 Threads 评论
#[derive(Debug, Parser)]
#[command(name = "threads_autolike", version, about)]
pub struct Cli {
    /// 账号文件（JSON 数组或 TOML）；不指定时交互式输入单个账号
    #[arg(short, long, env = "ACCOUNTS_FILE")]
    pub accounts: Option<PathBuf>,

    /// 每批处理的账号数量
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// 批次之间的等待时间（秒）
    #[arg(long)]
    pub batch_wait: Option<u64>,

    /// Cookie 存放目录
    #[arg(long)]
    pub cookie_dir: Option<String>,

    /// 使用无头模式
    #[arg(long)]
    pub headless: bool,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 结束后不等待回车
    #[arg(long)]
    pub no_pause: bool,
}

impl Cli {
    /// 用命令行参数覆盖配置
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(size) = self.batch_size {
            config.batch_size = size;
        }
        if let Some(wait) = self.batch_wait {
            config.batch_wait_secs = wait;
        }
        if let Some(dir) = &self.cookie_dir {
            config.cookie_dir = dir.clone();
        }
        if self.headless {
            config.headless = true;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        config
    }
}
