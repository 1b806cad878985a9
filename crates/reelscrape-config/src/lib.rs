pub mod config;
pub mod error;
pub mod paths;
pub mod selectors;

pub use config::{BrowserOptions, ScrapeConfig, DEFAULT_OUTPUT_FILE, DEFAULT_URL, DEFAULT_WAIT_SECS};
pub use error::ConfigError;
pub use paths::{PathManager, container_base_path};
pub use selectors::{Selector, SelectorConfig};
