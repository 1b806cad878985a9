use super::config::load_config;
use super::scrape_ui::ScrapeUI;
use crate::output::Output;
use browser_debug::DebugConfig;
use clap::{ArgAction, Args};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, ContentArrangement, Table};
use reelscrape_config::{PathManager, ScrapeConfig};
use reelscrape_models::MovieRecord;
use reelscrape_sources::{write_csv, ListingScraper, ScrapeReport};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default, Clone)]
pub struct ScrapeArgs {
    /// Page to scrape (defaults to the configured URL)
    #[arg(long)]
    pub url: Option<String>,

    /// CSV file to write
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Seconds to wait after navigation before reading the page
    #[arg(long, value_name = "SECONDS")]
    pub wait_secs: Option<u64>,

    /// Show the browser window instead of running headless
    #[arg(long, action = ArgAction::SetTrue)]
    pub headful: bool,

    /// Print a table of the extracted movies
    #[arg(long, action = ArgAction::SetTrue)]
    pub preview: bool,

    /// Save a screenshot, the page HTML and an alignment report
    #[arg(long, action = ArgAction::SetTrue)]
    pub debug: bool,
}

/// Command-line values override the loaded configuration.
pub fn apply_overrides(config: &mut ScrapeConfig, args: &ScrapeArgs) {
    if let Some(url) = &args.url {
        config.url = url.clone();
    }
    if let Some(out) = &args.out {
        config.output_path = out.clone();
    }
    if let Some(wait_secs) = args.wait_secs {
        config.wait_secs = wait_secs;
    }
    if args.headful {
        config.headless = false;
    }
}

pub async fn run_scrape(args: ScrapeArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &args);
    config
        .validate()
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;

    let mut scraper = ListingScraper::new(config.clone(), PathManager::default());
    if args.debug {
        let debug_config = DebugConfig::new(true, config.debug_config().output_dir())
            .map_err(|e| eyre!("{:#}", e))?;
        scraper = scraper.with_debug(debug_config);
    }

    output.info(format!("Navigating to {}", config.url));
    let ui = ScrapeUI::new(output.is_human() && !output.is_quiet());
    ui.set_message(format!("Loading page and waiting {}s for content...", config.wait_secs));

    let result = scraper.run().await;
    ui.finish();
    let report = result.map_err(|e| eyre!("Scrape failed: {:#}", e))?;

    report_problems(&report, output);

    let csv_written = match write_csv(&config.output_path, &report.records) {
        Ok(count) => {
            output.success(format!(
                "Data for {} movies has been written to {}",
                count,
                config.output_path.display()
            ));
            true
        }
        Err(e) => {
            tracing::error!("Failed to write CSV file: {}", e);
            output.error(format!("Failed to write CSV file: {}", e));
            false
        }
    };

    if args.preview && output.is_human() && !output.is_quiet() {
        println!("{}", preview_table(&report.records));
    }

    output.json(&summary_json(&report, &config.output_path, csv_written));

    Ok(())
}

fn report_problems(report: &ScrapeReport, output: &Output) {
    for skipped in &report.skipped {
        output.warn(format!(
            "Error processing movie at index {}: {}",
            skipped.index, skipped.reason
        ));
    }

    for mismatch in &report.alignment.mismatched {
        output.warn(format!(
            "Found {} {} for {} titles; values may be paired with the wrong movie",
            mismatch.found, mismatch.field, report.alignment.titles
        ));
    }

    for field in &report.unknown_fields {
        output.warn(format!("Could not find {} for the last movie, using \"Unknown\"", field));
    }
}

fn summary_json(report: &ScrapeReport, path: &Path, csv_written: bool) -> serde_json::Value {
    json!({
        "type": "result",
        "output_path": path.display().to_string(),
        "csv_written": csv_written,
        "records": report.records.len(),
        "with_release_date": report.records.iter().filter(|r| r.has_release_date()).count(),
        "skipped": report.skipped,
        "alignment": report.alignment,
        "unknown_fields": report.unknown_fields,
    })
}

const PREVIEW_WIDTH: usize = 48;

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub fn preview_table(records: &[MovieRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Director").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Cast").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(record.rank),
            Cell::new(truncate(&record.title, PREVIEW_WIDTH)),
            Cell::new(&record.release_date),
            Cell::new(truncate(&record.director, PREVIEW_WIDTH)),
            Cell::new(truncate(&record.cast, PREVIEW_WIDTH)),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut config = ScrapeConfig::default();
        let args = ScrapeArgs {
            url: Some("https://example.com/list".to_string()),
            out: Some(PathBuf::from("out/movies.csv")),
            wait_secs: Some(1),
            headful: true,
            ..Default::default()
        };

        apply_overrides(&mut config, &args);

        assert_eq!(config.url, "https://example.com/list");
        assert_eq!(config.output_path, PathBuf::from("out/movies.csv"));
        assert_eq!(config.wait_secs, 1);
        assert!(!config.headless);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = ScrapeConfig::default();

        apply_overrides(&mut config, &ScrapeArgs::default());

        assert_eq!(config, ScrapeConfig::default());
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Amélie", 10), "Amélie");
        assert_eq!(truncate("Amélie Poulain", 4), "Amé…");
    }

    #[test]
    fn test_preview_table_rows() {
        let records = vec![MovieRecord {
            rank: 1,
            title: "The Godfather".to_string(),
            release_date: "1972".to_string(),
            image: String::new(),
            director: "Francis Ford Coppola".to_string(),
            cast: "Marlon Brando".to_string(),
            description: String::new(),
        }];

        let rendered = preview_table(&records).to_string();

        assert!(rendered.contains("The Godfather"));
        assert!(rendered.contains("1972"));
        assert!(rendered.contains("Coppola"));
    }
}
