use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use reelscrape_config::{PathManager, ScrapeConfig, Selector};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use which::which;
use crate::dom::{attribute_script, text_script, DomSource};
use crate::error::ScrapeError;

/// One Chromium process with a single page.
pub struct BrowserSession {
    browser: Option<Browser>,
    handler_task: Option<JoinHandle<()>>,
    page: Page,
}

impl BrowserSession {
    /// Locate (or download) Chromium, launch it and open a blank page.
    pub async fn launch(config: &ScrapeConfig, paths: &PathManager) -> Result<Self> {
        let profile_dir = paths.browser_profile_dir();
        std::fs::create_dir_all(&profile_dir)?;

        let chrome_path = match config.browser.executable.clone().or_else(find_system_chromium) {
            Some(path) => path,
            None => fetch_chromium(&paths.chromium_download_dir()).await?,
        };

        let browser_config = build_browser_config(&chrome_path, &profile_dir, config)?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| anyhow!("Failed to launch browser: {}", e))?;

        let handler_task = tokio::spawn(async move {
            let mut error_count = 0;
            const MAX_ERRORS: usize = 10;

            while let Some(h) = handler.next().await {
                match h {
                    Ok(_) => error_count = 0,
                    Err(e) => {
                        error_count += 1;
                        warn!(
                            "Browser handler error (count: {}/{}): {:?}",
                            error_count, MAX_ERRORS, e
                        );
                        if error_count >= MAX_ERRORS {
                            error!(
                                "Browser handler received {} consecutive errors. Browser process may have crashed.",
                                error_count
                            );
                            break;
                        }
                    }
                }
            }

            debug!("Browser handler task ended");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler_task.abort();
                return Err(anyhow!("Failed to open page: {}", e));
            }
        };

        info!("Browser launched with {:?}", chrome_path);
        Ok(Self {
            browser: Some(browser),
            handler_task: Some(handler_task),
            page,
        })
    }

    /// Navigate and then wait a fixed delay for client-side rendering.
    pub async fn open(&self, url: &str, wait: Duration) -> Result<(), ScrapeError> {
        info!("Navigating to {}", url);
        self.page.goto(url).await.map_err(|e| ScrapeError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        debug!("Waiting {:?} for page content", wait);
        sleep(wait).await;
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn evaluate<T: DeserializeOwned>(&self, selector: &Selector, script: String) -> Result<T, ScrapeError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| ScrapeError::query(selector, e))?;
        result.into_value::<T>().map_err(|e| ScrapeError::query(selector, e))
    }

    /// Close the browser and give the handler a moment to drain.
    pub async fn shutdown(&mut self) -> Result<()> {
        if let Some(mut browser) = self.browser.take() {
            info!("Shutting down browser instance");

            if let Err(e) = browser.close().await {
                warn!("Browser did not close cleanly: {}", e);
            }
            if let Some(handler_task) = self.handler_task.take() {
                let _ = tokio::time::timeout(Duration::from_secs(2), handler_task).await;
            }

            info!("Browser session ended");
        }
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if self.browser.is_some() {
            // chromiumoxide kills the child process when the Browser is dropped
            debug!("Browser session dropped without shutdown");
        }
        if let Some(handler_task) = self.handler_task.take() {
            handler_task.abort();
        }
    }
}

#[async_trait]
impl DomSource for BrowserSession {
    async fn query_texts(&self, selector: &Selector) -> Result<Vec<Option<String>>, ScrapeError> {
        self.evaluate(selector, text_script(selector)).await
    }

    async fn query_attributes(
        &self,
        selector: &Selector,
        attribute: &str,
    ) -> Result<Vec<Option<String>>, ScrapeError> {
        self.evaluate(selector, attribute_script(selector, attribute)).await
    }
}

/// Check if we're running in Docker
fn is_docker() -> bool {
    Path::new("/.dockerenv").exists()
        || std::fs::read_to_string("/proc/self/cgroup")
            .map(|s| s.contains("docker") || s.contains("containerd"))
            .unwrap_or(false)
}

/// Find an installed Chromium or Chrome
fn find_system_chromium() -> Option<PathBuf> {
    let mut candidates: Vec<&str> = Vec::new();

    if cfg!(target_os = "macos") {
        candidates.extend([
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/opt/homebrew/bin/chromium",
        ]);
    }

    candidates.extend([
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/usr/local/bin/chromium",
        "/usr/local/bin/chromium-browser",
        "/usr/bin/google-chrome",
        "/opt/chromium/chromium",
    ]);

    for path in candidates {
        if Path::new(path).exists() {
            return Some(PathBuf::from(path));
        }
    }

    which("chromium")
        .or_else(|_| which("chromium-browser"))
        .or_else(|_| which("google-chrome"))
        .ok()
}

/// Download a Chromium build when none is installed
async fn fetch_chromium(download_dir: &Path) -> Result<PathBuf> {
    info!("No system Chromium found, downloading via BrowserFetcher...");
    tokio::fs::create_dir_all(download_dir).await?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(download_dir)
            .build()
            .map_err(|e| anyhow!("Failed to create BrowserFetcherOptions: {}", e))?,
    );

    let fetched = fetcher
        .fetch()
        .await
        .map_err(|e| anyhow!("Failed to fetch Chromium: {}", e))?;

    info!("Chromium downloaded to: {:?}", fetched.executable_path);
    Ok(fetched.executable_path)
}

fn build_browser_config(chrome_path: &Path, profile_dir: &Path, config: &ScrapeConfig) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .chrome_executable(chrome_path)
        .arg("--disable-gpu")
        .arg("--disable-extensions")
        .arg("--disable-notifications")
        .arg("--log-level=3")
        .arg("--window-size=1280,1024")
        .arg(format!("--user-data-dir={}", profile_dir.display()));

    // chromiumoxide launches headless unless told otherwise
    if !config.headless {
        builder = builder.with_head();
    }

    if is_docker() || !cfg!(target_os = "macos") {
        builder = builder
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage");
    }

    for arg in &config.browser.extra_args {
        builder = builder.arg(arg.as_str());
    }

    builder
        .build()
        .map_err(|e| anyhow!("Failed to build browser config: {}", e))
}
