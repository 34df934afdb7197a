//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 加载账号（文件或交互式输入）
//! - 组装浏览器会话工厂、限流检测和报告输出
//!
//! ### `batch_processor` - 批量账号处理器
//! - 按固定大小分批，批内串行
//! - 批次之间固定等待
//! - 汇总并输出结果
//!
//! ## 层次关系
//!
//! ```text
//! app (加载 Vec<Account>)
//!     ↓
//! batch_processor (分批处理 Vec<Account>)
//!     ↓
//! workflow::AccountFlow (处理单个 Account)
//!     ↓
//! services (能力层：auth / feed / like / cookie / rate_limit / reporter)
//!     ↓
//! infrastructure (基础设施：PageDriver / ChromeDriver)
//! ```

pub mod app;
pub mod batch_processor;

// 重新导出主要类型
pub use app::{AccountSource, App};
pub use batch_processor::{partition, BatchProcessor};
