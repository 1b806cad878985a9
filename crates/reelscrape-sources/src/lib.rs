pub mod browser;
pub mod dom;
pub mod empire;
pub mod error;
pub mod export;

pub use browser::BrowserSession;
pub use dom::DomSource;
pub use empire::{parse_title, ListingScraper, ParsedTitle, ScrapeReport};
pub use error::ScrapeError;
pub use export::{write_csv, write_records};
