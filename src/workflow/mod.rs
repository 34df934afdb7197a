pub mod account_ctx;
pub mod account_flow;

pub use account_ctx::AccountCtx;
pub use account_flow::AccountFlow;
