use anyhow::{Context, Result};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::config::{DebugConfig, ScreenshotFormat};

/// Dumps page artifacts (screenshot, HTML, JSON reports) into a per-run
/// directory under the configured output directory.
pub struct PageInspector {
    page: Page,
    config: DebugConfig,
    run_dir: PathBuf,
    artifact_counter: u32,
}

impl PageInspector {
    pub fn new(page: Page, config: DebugConfig) -> Result<Self> {
        let run_dir = config
            .output_dir
            .join(chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());
        std::fs::create_dir_all(&run_dir)
            .with_context(|| format!("Failed to create debug output directory: {:?}", run_dir))?;

        debug!("Browser debug artifacts will be written to {:?}", run_dir);

        Ok(Self {
            page,
            config,
            run_dir,
            artifact_counter: 0,
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    fn next_path(&mut self, label: &str, extension: &str) -> PathBuf {
        self.artifact_counter += 1;
        self.run_dir.join(format!(
            "{:03}_{}.{}",
            self.artifact_counter,
            sanitize_label(label),
            extension
        ))
    }

    /// Capture a screenshot with a label
    pub async fn screenshot(&mut self, label: &str) -> Result<Option<PathBuf>> {
        if !self.config.capture_screenshots {
            return Ok(None);
        }

        let format = match self.config.screenshot_format {
            ScreenshotFormat::Png => CaptureScreenshotFormat::Png,
            ScreenshotFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
        };
        let params = ScreenshotParams::builder().format(format).full_page(true).build();

        let data = self.page.screenshot(params).await?;
        let path = self.next_path(label, self.config.screenshot_format.extension());
        std::fs::write(&path, data)
            .with_context(|| format!("Failed to write screenshot to {:?}", path))?;
        info!("Screenshot saved: {:?}", path);
        Ok(Some(path))
    }

    /// Save full page HTML
    pub async fn save_page_html(&mut self, label: &str) -> Result<Option<PathBuf>> {
        if !self.config.capture_html {
            return Ok(None);
        }

        let html = self.page.content().await?;
        let path = self.next_path(label, "html");
        std::fs::write(&path, html)
            .with_context(|| format!("Failed to write HTML to {:?}", path))?;
        info!("Page HTML saved: {:?}", path);
        Ok(Some(path))
    }

    /// Location, title and ready state of the page
    pub async fn get_page_state(&self) -> Result<Value> {
        let url = self.page.url().await?.unwrap_or_default();

        let js = r#"
        (() => {
            return {
                title: document.title,
                readyState: document.readyState,
                bodyChildren: document.body ? document.body.children.length : 0,
            };
        })()
        "#;

        let mut state = json!({ "url": url });
        match self.page.evaluate(js).await {
            Ok(result) => {
                if let Some(obj) = result.value().and_then(|v| v.as_object()) {
                    for (key, val) in obj {
                        state[key] = val.clone();
                    }
                }
            }
            Err(e) => {
                warn!("Failed to execute JavaScript for page state: {}", e);
            }
        }

        Ok(state)
    }

    /// Write any serializable report next to the page artifacts
    pub fn write_json<T: Serialize + ?Sized>(&mut self, label: &str, data: &T) -> Result<PathBuf> {
        let path = self.next_path(label, "json");
        std::fs::write(&path, serde_json::to_string_pretty(data)?)
            .with_context(|| format!("Failed to write report to {:?}", path))?;
        debug!("Debug report saved: {:?}", path);
        Ok(path)
    }

    /// Screenshot, HTML and page state for one checkpoint. Failures are
    /// logged and never propagated.
    pub async fn capture(&mut self, label: &str) {
        if let Err(e) = self.screenshot(label).await {
            warn!("Failed to capture screenshot for '{}': {}", label, e);
        }
        if let Err(e) = self.save_page_html(label).await {
            warn!("Failed to save page HTML for '{}': {}", label, e);
        }
        match self.get_page_state().await {
            Ok(state) => {
                if let Err(e) = self.write_json(&format!("{}_state", label), &state) {
                    warn!("Failed to save page state for '{}': {}", label, e);
                }
            }
            Err(e) => warn!("Failed to read page state for '{}': {}", label, e),
        }
    }
}

pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}
