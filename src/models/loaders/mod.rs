pub mod account_loader;

pub use account_loader::{load_accounts, try_load_accounts};
