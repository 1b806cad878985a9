use anyhow::Result;
use std::path::PathBuf;

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("REELSCRAPE_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelscrape");
        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .join("reelscrape");

        Ok(Self { config_dir, data_dir })
    }

    pub fn from_docker_env() -> Self {
        Self::with_base(container_base_path())
    }

    /// Config at `base`, browser data in `base/data`
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Chromium profile directory
    pub fn browser_profile_dir(&self) -> PathBuf {
        self.data_dir.join("browser")
    }

    /// Where a fetched Chromium build is unpacked when none is installed
    pub fn chromium_download_dir(&self) -> PathBuf {
        self.data_dir.join("chromium_downloads")
    }

}

impl Default for PathManager {
    fn default() -> Self {
        // The container base directory only exists inside the image
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_layout() {
        let paths = PathManager::with_base("/srv/reelscrape");

        assert_eq!(paths.config_file(), PathBuf::from("/srv/reelscrape/config.toml"));
        assert_eq!(paths.browser_profile_dir(), PathBuf::from("/srv/reelscrape/data/browser"));
        assert_eq!(
            paths.chromium_download_dir(),
            PathBuf::from("/srv/reelscrape/data/chromium_downloads")
        );
    }

    #[test]
    fn test_platform_dirs_are_namespaced() {
        if let Ok(paths) = PathManager::new() {
            assert!(paths.config_file().ends_with("reelscrape/config.toml"));
            assert!(paths.browser_profile_dir().ends_with("reelscrape/browser"));
        }
    }
}
