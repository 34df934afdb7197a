pub mod account;
pub mod cookie;
pub mod loaders;
pub mod outcome;

pub use account::{Account, AccountFile, DEFAULT_NUM_LIKES};
pub use cookie::StoredCookie;
pub use loaders::{load_accounts, try_load_accounts};
pub use outcome::{AccountReport, AccountStatus, LikeOutcome, RunResults, RunTotals};
