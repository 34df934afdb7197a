//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、输出启动信息
//! 2. **加载账号**：从账号文件读取，或交互式输入单个账号
//! 3. **组装依赖**：Chromium 会话工厂、限流检测、报告输出
//! 4. **批量处理**：委托 `BatchProcessor`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::ChromeSessionFactory;
use crate::logger;
use crate::models::{self, Account, RunResults};
use crate::orchestrator::batch_processor::BatchProcessor;
use crate::services::{RestrictionNoticeProbe, TracingReporter};
use crate::utils::{logging, prompt};
use crate::workflow::AccountFlow;

/// 账号来源
#[derive(Debug, Clone)]
pub enum AccountSource {
    /// 账号文件
    File(PathBuf),
    /// 控制台输入
    Interactive,
}

/// 应用主结构
pub struct App {
    config: Config,
    source: AccountSource,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, source: AccountSource) -> Result<Self> {
        // 初始化日志文件
        logger::init_log_file(&config.output_log_file)?;

        logging::log_startup(&config);

        Ok(Self { config, source })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunResults> {
        let accounts = self.load_accounts().await?;

        if accounts.is_empty() {
            warn!("⚠️ 没有可处理的账号，程序结束");
            return Ok(RunResults::new());
        }

        let factory = Arc::new(ChromeSessionFactory::new(&self.config));
        let probe = Arc::new(RestrictionNoticeProbe::with_defaults()?);
        let reporter = Arc::new(TracingReporter::new(Some(PathBuf::from(
            &self.config.output_log_file,
        ))));

        let flow = AccountFlow::new(&self.config, factory, probe);
        let processor = BatchProcessor::new(&self.config, flow, reporter);

        let results = processor.run(&accounts).await;
        info!("\n日志已保存至: {}", self.config.output_log_file);
        Ok(results)
    }

    /// 加载账号
    async fn load_accounts(&self) -> Result<Vec<Account>> {
        match &self.source {
            AccountSource::File(path) => {
                info!("\n📁 正在读取账号文件: {}", path.display());
                Ok(models::load_accounts(path).await)
            }
            AccountSource::Interactive => Ok(vec![prompt::prompt_account()?]),
        }
    }
}
