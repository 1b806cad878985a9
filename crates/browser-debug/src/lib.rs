pub mod inspector;
pub mod config;

pub use inspector::{PageInspector, sanitize_label};
pub use config::{DebugConfig, ScreenshotFormat};
