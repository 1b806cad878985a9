use anyhow::Result;
use browser_debug::{DebugConfig, PageInspector};
use reelscrape_config::{PathManager, ScrapeConfig};
use std::time::Duration;
use tracing::{info, warn};
use crate::browser::BrowserSession;
use crate::empire::extract::{extract_movies, ScrapeReport};

/// Runs one scrape of the listing page: launch, load, wait, extract, close.
pub struct ListingScraper {
    config: ScrapeConfig,
    paths: PathManager,
    debug_config: DebugConfig,
}

impl ListingScraper {
    pub fn new(config: ScrapeConfig, paths: PathManager) -> Self {
        let debug_config = config.debug_config();
        Self {
            config,
            paths,
            debug_config,
        }
    }

    pub fn with_debug(mut self, debug_config: DebugConfig) -> Self {
        self.debug_config = debug_config;
        self
    }

    /// A browser launch failure is returned as-is. Once launched, the browser
    /// is shut down whether or not the extraction succeeded.
    pub async fn run(&self) -> Result<ScrapeReport> {
        let mut session = BrowserSession::launch(&self.config, &self.paths).await?;

        let outcome = self.scrape(&session).await;

        if let Err(e) = session.shutdown().await {
            warn!("Failed to shut down browser: {}", e);
        }

        outcome
    }

    async fn scrape(&self, session: &BrowserSession) -> Result<ScrapeReport> {
        session
            .open(&self.config.url, Duration::from_secs(self.config.wait_secs))
            .await?;

        let mut inspector = if self.debug_config.is_enabled() {
            match PageInspector::new(session.page().clone(), self.debug_config.clone()) {
                Ok(inspector) => Some(inspector),
                Err(e) => {
                    warn!("Browser debugging disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        if let Some(inspector) = inspector.as_mut() {
            inspector.capture("after_wait").await;
        }

        let report = extract_movies(session, &self.config.selectors).await?;

        if let Some(inspector) = inspector.as_mut() {
            if let Err(e) = inspector.write_json("alignment", &report.alignment) {
                warn!("Failed to save alignment report: {}", e);
            }
            info!("Browser debug artifacts saved to {:?}", inspector.run_dir());
        }

        Ok(report)
    }
}
