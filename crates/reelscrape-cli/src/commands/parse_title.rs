use crate::output::Output;
use color_eyre::Result;
use reelscrape_sources::parse_title;
use serde_json::json;

/// Run the headline parser on text given on the command line.
pub fn run_parse_title(text: &str, output: &Output) -> Result<()> {
    let parsed = parse_title(text);

    if output.is_human() {
        output.info(format!("Title:        {}", parsed.title));
        output.info(format!("Release date: {}", parsed.release_date));
    } else {
        output.json(&json!({
            "type": "parsed_title",
            "input": text,
            "title": parsed.title,
            "release_date": parsed.release_date,
        }));
    }
    Ok(())
}
