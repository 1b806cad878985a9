use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to navigate to {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Query {selector} failed: {message}")]
    Query { selector: String, message: String },

    #[error("No title element at index {index}")]
    MissingTitle { index: usize },

    #[error("Title element at index {index} has no readable text")]
    UnreadableTitle { index: usize },

    #[error("Failed to write CSV to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    pub fn query(selector: impl ToString, message: impl ToString) -> Self {
        ScrapeError::Query {
            selector: selector.to_string(),
            message: message.to_string(),
        }
    }
}
