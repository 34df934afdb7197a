use anyhow::Result;
use clap::Parser;
use threads_autolike::cli::Cli;
use threads_autolike::utils::prompt;
use threads_autolike::{logger, AccountSource, App, Config};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.apply(Config::from_env());

    // 初始化日志
    logger::init(config.verbose_logging);

    let source = match &cli.accounts {
        Some(path) => AccountSource::File(path.clone()),
        None => AccountSource::Interactive,
    };

    // 初始化并运行应用
    let outcome = match App::initialize(config, source) {
        Ok(app) => app.run().await.map(|_| ()),
        Err(e) => Err(e),
    };
    if let Err(e) = &outcome {
        error!("❌ 程序运行失败: {:#}", e);
    }

    if !cli.no_pause {
        prompt::wait_for_enter();
    }

    Ok(())
}
