pub mod movie;

pub use movie::{MovieRecord, CSV_HEADERS, UNKNOWN};
