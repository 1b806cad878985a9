pub mod config;
pub mod parse_title;
pub mod scrape;
pub mod scrape_ui;
