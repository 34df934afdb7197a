pub mod chrome_driver;
pub mod js_executor;
pub mod page_driver;
pub mod selectors;

pub use chrome_driver::{ChromeDriver, ChromeSessionFactory};
pub use js_executor::JsExecutor;
pub use page_driver::{LikeButton, PageDriver, SessionFactory};
