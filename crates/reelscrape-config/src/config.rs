use browser_debug::DebugConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::ConfigError;
use crate::selectors::SelectorConfig;

pub const DEFAULT_URL: &str = "https://www.empireonline.com/movies/features/best-movies-2/";
pub const DEFAULT_OUTPUT_FILE: &str = "best_movies.csv";
pub const DEFAULT_WAIT_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapeConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Fixed delay after navigation before querying the page
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
    #[serde(default = "default_true")]
    pub headless: bool,
    #[serde(default)]
    pub browser: BrowserOptions,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub debug: Option<DebugConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowserOptions {
    /// Chromium binary; auto-detected (or fetched) when unset
    #[serde(default)]
    pub executable: Option<PathBuf>,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_wait_secs() -> u64 {
    DEFAULT_WAIT_SECS
}

fn default_true() -> bool {
    true
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            output_path: default_output_path(),
            wait_secs: default_wait_secs(),
            headless: true,
            browser: BrowserOptions::default(),
            selectors: SelectorConfig::default(),
            debug: None,
        }
    }
}

impl ScrapeConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit path must exist; otherwise the default location is used when
    /// present, and built-in defaults when not.
    pub fn load(explicit: Option<&Path>, default_path: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None if default_path.exists() => Self::load_from_file(default_path),
            None => Ok(Self::default()),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "url must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output_path must not be empty".to_string()));
        }
        for (name, selector) in self.selectors.named() {
            if selector.is_empty() {
                return Err(ConfigError::Invalid(format!("selector '{}' must not be empty", name)));
            }
        }
        if self.selectors.image_attribute.trim().is_empty() {
            return Err(ConfigError::Invalid("image_attribute must not be empty".to_string()));
        }
        Ok(())
    }

    /// Debug settings from the file, or from `BROWSER_DEBUG*` env vars
    pub fn debug_config(&self) -> DebugConfig {
        self.debug.clone().unwrap_or_else(DebugConfig::from_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Selector;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = ScrapeConfig::default();
        config.wait_secs = 9;
        config.headless = false;
        config.browser.extra_args = vec!["--lang=en-GB".to_string()];
        config.selectors.titles = Selector::css("h2 > strong");

        config.save_to_file(file.path()).unwrap();
        let loaded = ScrapeConfig::load_from_file(file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let file = NamedTempFile::new().unwrap();

        let loaded = ScrapeConfig::load_from_file(file.path()).unwrap();

        assert_eq!(loaded.url, DEFAULT_URL);
        assert_eq!(loaded.output_path, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(loaded.wait_secs, DEFAULT_WAIT_SECS);
        assert!(loaded.headless);
        assert!(loaded.debug.is_none());
    }

    #[test]
    fn test_load_missing_default_path_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("config.toml");

        let loaded = ScrapeConfig::load(None, &missing).unwrap();

        assert_eq!(loaded, ScrapeConfig::default());
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let err = ScrapeConfig::load(Some(&missing), &missing).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "wait_secs = \"soon\"").unwrap();

        let err = ScrapeConfig::load_from_file(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_validate() {
        assert!(ScrapeConfig::default().validate().is_ok());

        let mut config = ScrapeConfig::default();
        config.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = ScrapeConfig::default();
        config.url = "   ".to_string();
        assert!(config.validate().is_err());

        let mut config = ScrapeConfig::default();
        config.output_path = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = ScrapeConfig::default();
        config.selectors.casts = Selector::xpath("");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("casts"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("config.toml");

        ScrapeConfig::default().save_to_file(&path).unwrap();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("empireonline.com"));
    }
}
