use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::env;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ScreenshotFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "jpeg")]
    Jpeg,
}

impl ScreenshotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ScreenshotFormat::Png => "png",
            ScreenshotFormat::Jpeg => "jpg",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebugConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_true")]
    pub capture_screenshots: bool,

    #[serde(default = "default_true")]
    pub capture_html: bool,

    #[serde(default)]
    pub screenshot_format: ScreenshotFormat,
}

fn default_enabled() -> bool {
    env::var("BROWSER_DEBUG").map(|v| v == "1" || v == "true").unwrap_or(false)
}

fn default_output_dir() -> PathBuf {
    env::var("BROWSER_DEBUG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./browser_debug"))
}

fn default_true() -> bool {
    true
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            output_dir: default_output_dir(),
            capture_screenshots: true,
            capture_html: true,
            screenshot_format: ScreenshotFormat::Png,
        }
    }
}

impl DebugConfig {
    /// Create a new DebugConfig from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create an enabled config writing into `output_dir`
    pub fn new(enabled: bool, output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create debug output directory: {:?}", output_dir))?;

        Ok(Self {
            enabled,
            output_dir,
            ..Default::default()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_output_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("debug");

        let config = DebugConfig::new(true, &dir).unwrap();

        assert!(config.is_enabled());
        assert_eq!(config.output_dir(), dir.as_path());
        assert!(dir.is_dir());
        assert!(config.capture_html);
    }

    #[test]
    fn test_screenshot_extension() {
        assert_eq!(ScreenshotFormat::Png.extension(), "png");
        assert_eq!(ScreenshotFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DebugConfig = serde_json::from_str(
            r#"{"enabled": true, "output_dir": "/tmp/dbg", "screenshot_format": "jpeg"}"#,
        )
        .unwrap();

        assert!(config.enabled);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/dbg"));
        assert_eq!(config.screenshot_format, ScreenshotFormat::Jpeg);
        assert!(config.capture_screenshots);
    }
}
