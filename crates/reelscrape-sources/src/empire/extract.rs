use reelscrape_config::{Selector, SelectorConfig};
use reelscrape_models::{MovieRecord, UNKNOWN};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use crate::dom::DomSource;
use crate::empire::title::parse_title;
use crate::error::ScrapeError;

/// The five element lists as queried from the page, unaligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    pub titles: Vec<Option<String>>,
    pub images: Vec<Option<String>>,
    pub directors: Vec<Option<String>>,
    pub casts: Vec<Option<String>>,
    pub descriptions: Vec<Option<String>>,
}

/// A secondary list whose length differs from the title count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMismatch {
    pub field: &'static str,
    pub found: usize,
}

/// Positional alignment is never verified against page structure; this only
/// records which lists had a different length than the title list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlignmentReport {
    pub titles: usize,
    pub mismatched: Vec<FieldMismatch>,
}

impl AlignmentReport {
    pub fn is_aligned(&self) -> bool {
        self.mismatched.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

/// Outcome of one listing extraction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScrapeReport {
    pub records: Vec<MovieRecord>,
    pub skipped: Vec<SkippedRecord>,
    pub alignment: AlignmentReport,
    /// Last-record fields that fell back to "Unknown"
    pub unknown_fields: Vec<&'static str>,
}

impl RawListing {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn alignment(&self) -> AlignmentReport {
        let titles = self.titles.len();
        let mismatched = [
            ("images", self.images.len()),
            ("directors", self.directors.len()),
            ("casts", self.casts.len()),
            ("descriptions", self.descriptions.len()),
        ]
        .into_iter()
        .filter(|(_, found)| *found != titles)
        .map(|(field, found)| FieldMismatch { field, found })
        .collect();

        AlignmentReport { titles, mismatched }
    }

    /// Build the record at `index`. Only the title list is required; any other
    /// list that is too short, or whose entry is unreadable, yields "".
    pub fn record_at(&self, index: usize) -> Result<MovieRecord, ScrapeError> {
        let raw_title = self
            .titles
            .get(index)
            .ok_or(ScrapeError::MissingTitle { index })?
            .as_deref()
            .ok_or(ScrapeError::UnreadableTitle { index })?;
        let parsed = parse_title(raw_title);

        Ok(MovieRecord {
            rank: index as u32 + 1,
            title: parsed.title,
            release_date: parsed.release_date,
            image: entry(&self.images, index).trim().to_string(),
            director: clean_director(entry(&self.directors, index)),
            cast: clean_cast(entry(&self.casts, index)),
            description: entry(&self.descriptions, index).trim().to_string(),
        })
    }
}

fn entry(list: &[Option<String>], index: usize) -> &str {
    list.get(index).and_then(|v| v.as_deref()).unwrap_or("")
}

pub fn clean_director(raw: &str) -> String {
    raw.replace("Director:", "").replace("Directors:", "").trim().to_string()
}

pub fn clean_cast(raw: &str) -> String {
    raw.replace("Starring:", "").trim().to_string()
}

/// Issue the five list queries. A failing query aborts the extraction.
pub async fn collect_listing<D>(dom: &D, selectors: &SelectorConfig) -> Result<RawListing, ScrapeError>
where
    D: DomSource + ?Sized,
{
    let listing = RawListing {
        titles: dom.query_texts(&selectors.titles).await?,
        images: dom
            .query_attributes(&selectors.images, &selectors.image_attribute)
            .await?,
        directors: dom.query_texts(&selectors.directors).await?,
        casts: dom.query_texts(&selectors.casts).await?,
        descriptions: dom.query_texts(&selectors.descriptions).await?,
    };

    debug!(
        titles = listing.titles.len(),
        images = listing.images.len(),
        directors = listing.directors.len(),
        casts = listing.casts.len(),
        descriptions = listing.descriptions.len(),
        "Collected element lists"
    );

    Ok(listing)
}

/// Align the lists into records, skipping any record that fails, then repair
/// an empty director or cast on the final record.
pub async fn extract_movies<D>(dom: &D, selectors: &SelectorConfig) -> Result<ScrapeReport, ScrapeError>
where
    D: DomSource + ?Sized,
{
    let listing = collect_listing(dom, selectors).await?;
    if listing.is_empty() {
        warn!(selector = %selectors.titles, "No title elements matched; the page layout may have changed");
    }
    let alignment = listing.alignment();
    for mismatch in &alignment.mismatched {
        warn!(
            field = mismatch.field,
            found = mismatch.found,
            titles = alignment.titles,
            "Element list length differs from title count; fields may be paired with the wrong movie"
        );
    }

    let mut report = ScrapeReport {
        alignment,
        ..Default::default()
    };
    let total = listing.len();

    for index in 0..total {
        let mut record = match listing.record_at(index) {
            Ok(record) => record,
            Err(e) => {
                error!("Error processing movie at index {}: {}", index, e);
                report.skipped.push(SkippedRecord {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if index + 1 == total {
            if record.director.is_empty() {
                record.director = match lookup_fallback(dom, &selectors.fallback_director, clean_director).await {
                    Some(director) => director,
                    None => {
                        error!("Error finding director for {}", record.title);
                        report.unknown_fields.push("director");
                        UNKNOWN.to_string()
                    }
                };
            }
            if record.cast.is_empty() {
                record.cast = match lookup_fallback(dom, &selectors.fallback_cast, clean_cast).await {
                    Some(cast) => cast,
                    None => {
                        error!("Error finding cast for {}", record.title);
                        report.unknown_fields.push("cast");
                        UNKNOWN.to_string()
                    }
                };
            }
        }

        report.records.push(record);
    }

    info!(
        "Extracted {} of {} movies ({} skipped)",
        report.records.len(),
        total,
        report.skipped.len()
    );
    Ok(report)
}

/// Direct page lookup used for the final record. Takes the first readable
/// match in document order.
async fn lookup_fallback<D>(dom: &D, selector: &Selector, clean: fn(&str) -> String) -> Option<String>
where
    D: DomSource + ?Sized,
{
    match dom.query_texts(selector).await {
        Ok(values) => {
            let found = values.into_iter().flatten().next().map(|raw| clean(&raw));
            if found.is_none() {
                debug!(selector = %selector, "Fallback lookup matched nothing");
            }
            found
        }
        Err(e) => {
            warn!(selector = %selector, "Fallback lookup failed: {}", e);
            None
        }
    }
}
