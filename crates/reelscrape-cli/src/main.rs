use clap::{ArgAction, Parser, Subcommand};
use commands::config::ConfigCommands;
use commands::scrape::ScrapeArgs;
use commands::{config, parse_title, scrape};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelscrape")]
#[command(about = "reelscrape - Export Empire's 100 best movies list to CSV")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the listing page and write the CSV (default)
    #[command(long_about = "Launch a headless Chromium, load the listing page, wait for it to render, extract every movie and write them to a CSV file. The last movie's director and cast are looked up again if they came out empty.")]
    Scrape(ScrapeArgs),

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },

    /// Split a listing headline into title and release date
    ParseTitle {
        /// Headline text, e.g. "12) Parasite (2019)"
        text: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or_else(|| Commands::Scrape(ScrapeArgs::default())) {
        Commands::Scrape(args) => scrape::run_scrape(args, config_path, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, config_path, &output).await,
        Commands::ParseTitle { text } => parse_title::run_parse_title(&text, &output),
    }
}
