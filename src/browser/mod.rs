pub mod launcher;

pub use launcher::{launch_browser, LaunchOptions};
