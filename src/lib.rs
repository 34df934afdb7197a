//! # Threads Autolike
//!
//! 多账号自动点赞 Threads 投稿评论的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Browser / Page），只暴露能力
//! - `PageDriver` - 浏览器能力接口（导航、滚动、查找按钮、点击、等待）
//! - `ChromeDriver` - 基于 chromiumoxide 的实现，每个账号一个独立浏览器
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个账号或单个投稿
//! - `AuthService` - Cookie 恢复 / 表单登录
//! - `FeedService` - 收集推荐投稿
//! - `LikeService` - 点赞循环
//! - `RateLimitProbe` - 限流检测
//! - `Reporter` - 进度与汇总输出
//!
//! ### ③ 流程层（Workflow）
//! - `AccountFlow` - 单个账号的完整流程（会话 → 登录 → 收集 → 点赞 → 保存 Cookie）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 分批、串行、批间等待、汇总
//! - `orchestrator/app` - 应用入口

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{LikeButton, PageDriver, SessionFactory};
pub use models::{Account, AccountReport, AccountStatus, LikeOutcome, RunResults, RunTotals};
pub use orchestrator::{partition, AccountSource, App, BatchProcessor};
pub use workflow::{AccountCtx, AccountFlow};
