use csv::WriterBuilder;
use reelscrape_models::{MovieRecord, CSV_HEADERS};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;
use crate::error::ScrapeError;

/// Write the header and one row per record, in order.
pub fn write_records<W: Write>(writer: W, records: &[MovieRecord]) -> Result<(), csv::Error> {
    // Header written by hand so an empty scrape still produces it
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `records` as CSV. The parent
/// directory is created when missing. A failed write leaves whatever was
/// written in place.
pub fn write_csv<P: AsRef<Path>>(path: P, records: &[MovieRecord]) -> Result<usize, ScrapeError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ScrapeError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write_records(file, records).map_err(|source| ScrapeError::CsvWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Data for {} movies has been written to {:?}", records.len(), path);
    Ok(records.len())
}
