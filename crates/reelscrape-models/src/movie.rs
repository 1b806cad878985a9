use serde::{Deserialize, Serialize};

/// Column order of the exported CSV file.
pub const CSV_HEADERS: [&str; 7] = [
    "Top 100",
    "Title",
    "Release date",
    "Image",
    "Director",
    "Cast",
    "Why should we watch this gem",
];

/// Placeholder used when the last record's director or cast cannot be recovered.
pub const UNKNOWN: &str = "Unknown";

/// One movie extracted from the listing page.
///
/// Field renames match [`CSV_HEADERS`], so a record serializes straight into a
/// CSV row or a JSON object keyed by column name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    /// 1-based position in the source listing
    #[serde(rename = "Top 100")]
    pub rank: u32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Release date")]
    pub release_date: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Cast")]
    pub cast: String,
    #[serde(rename = "Why should we watch this gem")]
    pub description: String,
}

impl MovieRecord {
    pub fn has_release_date(&self) -> bool {
        !self.release_date.is_empty()
    }

    /// Row values in [`CSV_HEADERS`] order.
    pub fn to_row(&self) -> [String; 7] {
        [
            self.rank.to_string(),
            self.title.clone(),
            self.release_date.clone(),
            self.image.clone(),
            self.director.clone(),
            self.cast.clone(),
            self.description.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MovieRecord {
        MovieRecord {
            rank: 12,
            title: "Parasite".to_string(),
            release_date: "2019".to_string(),
            image: "https://example.com/parasite.jpg".to_string(),
            director: "Bong Joon-ho".to_string(),
            cast: "Song Kang-ho, Choi Woo-shik".to_string(),
            description: "A class satire with teeth.".to_string(),
        }
    }

    #[test]
    fn test_json_keys_follow_csv_headers() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();

        for header in CSV_HEADERS {
            assert!(obj.contains_key(header), "missing key {}", header);
        }
        assert_eq!(obj["Top 100"], 12);
        assert_eq!(obj["Why should we watch this gem"], "A class satire with teeth.");
    }

    #[test]
    fn test_to_row_order() {
        let row = sample().to_row();
        assert_eq!(row[0], "12");
        assert_eq!(row[1], "Parasite");
        assert_eq!(row[2], "2019");
        assert_eq!(row[4], "Bong Joon-ho");
        assert_eq!(row[6], "A class satire with teeth.");
    }

    #[test]
    fn test_has_release_date() {
        let mut record = sample();
        assert!(record.has_release_date());
        record.release_date.clear();
        assert!(!record.has_release_date());
    }
}
