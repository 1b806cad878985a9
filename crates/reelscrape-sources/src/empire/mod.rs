pub mod client;
pub mod extract;
pub mod title;

pub use client::ListingScraper;
pub use extract::{extract_movies, AlignmentReport, FieldMismatch, RawListing, ScrapeReport, SkippedRecord};
pub use title::{parse_title, ParsedTitle};
