use crate::output::Output;
use clap::Subcommand;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use reelscrape_config::{PathManager, ScrapeConfig};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,

    /// Write the default configuration file
    #[command(long_about = "Write a configuration file containing the built-in defaults (target URL, output file, wait time and selectors). Refuses to overwrite an existing file unless --force is given.")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// `--config` if given, else the default location, else built-in defaults
pub fn load_config(explicit: Option<&Path>) -> Result<ScrapeConfig> {
    let default_path = PathManager::default().config_file();
    let config = ScrapeConfig::load(explicit, &default_path)
        .map_err(|e| eyre!("Failed to load configuration: {}", e))?;
    tracing::debug!(url = %config.url, output = ?config.output_path, "Configuration loaded");
    Ok(config)
}

fn target_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathManager::default().config_file())
}

pub async fn run_config(cmd: ConfigCommands, config_path: Option<&Path>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config_path, output),
        ConfigCommands::Init { force } => init_config(config_path, force, output),
    }
}

fn show_config(config_path: Option<&Path>, output: &Output) -> Result<()> {
    let path = target_path(config_path);
    let config = load_config(config_path)?;
    let content = config
        .to_toml()
        .map_err(|e| eyre!("Failed to render configuration: {}", e))?;

    if output.is_human() {
        if output.is_quiet() {
            return Ok(());
        }
        let source = if path.exists() {
            path.display().to_string()
        } else {
            "built-in defaults".to_string()
        };
        println!("{} {}", "Configuration from".bright_white(), source.bright_cyan());
        println!();
        println!("{}", content);
    } else {
        output.json(&json!({
            "type": "config",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        }));
    }
    Ok(())
}

fn init_config(config_path: Option<&Path>, force: bool, output: &Output) -> Result<()> {
    let path = target_path(config_path);
    write_default_config(&path, force)?;
    output.success(format!("Configuration written to {}", path.display()));
    Ok(())
}

pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(eyre!(
            "Configuration file already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    ScrapeConfig::default()
        .save_to_file(path)
        .map_err(|e| eyre!("{}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        write_default_config(&path, false).unwrap();
        assert!(write_default_config(&path, false).is_err());
        write_default_config(&path, true).unwrap();

        let loaded = ScrapeConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, ScrapeConfig::default());
    }

    #[test]
    fn test_load_config_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "wait_secs = 2\noutput_path = \"top.csv\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.wait_secs, 2);
        assert_eq!(config.output_path, PathBuf::from("top.csv"));
    }
}
