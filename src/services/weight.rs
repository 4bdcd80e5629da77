// src/services/weight.rs

//! Best-effort game weight extraction.
//!
//! The per-game page embeds stats as JSON in its markup. There is no
//! schema guarantee; the extractor finds the smallest brace-delimited
//! span around the `averageweight` marker and parses it, yielding an
//! opaque JSON object or nothing.

use reqwest::Client;
use serde_json::Value;

use crate::error::Result;
use crate::models::GamePageConfig;
use crate::utils::http;

const WEIGHT_MARKER: &str = "averageweight";

/// Fetch the game page and scrape its embedded stats object.
///
/// Only transport failures are errors; a markup scan that finds nothing
/// parseable is `None`.
pub async fn fetch_game_weight(
    client: &Client,
    config: &GamePageConfig,
    game_id: u32,
) -> Result<Option<Value>> {
    let url = format!("{}/{}", config.base_url, game_id);
    let html = http::fetch_text(client, &url, config.timeout_secs).await?;
    Ok(extract_embedded_json(&html, WEIGHT_MARKER))
}

/// Take the smallest `{..}` span containing the marker and parse it as JSON.
pub fn extract_embedded_json(html: &str, marker: &str) -> Option<Value> {
    let index = html.find(marker)?;
    let bytes = html.as_bytes();

    let start = bytes[..index].iter().rposition(|&b| b == b'{')?;
    let end = index + bytes[index..].iter().position(|&b| b == b'}')?;

    serde_json::from_str(&html[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_embedded_stats_object() {
        let html = r#"<html><script>GEEK.stats = {"averageweight":2.33,"numweights":1042};</script></html>"#;
        let value = extract_embedded_json(html, "averageweight").unwrap();
        assert_eq!(value["averageweight"], serde_json::json!(2.33));
        assert_eq!(value["numweights"], serde_json::json!(1042));
    }

    #[test]
    fn missing_marker_yields_none() {
        assert_eq!(extract_embedded_json("<html></html>", "averageweight"), None);
    }

    #[test]
    fn unparseable_span_yields_none() {
        // The right scan stops at the nested closing brace, leaving an
        // unbalanced span that fails to parse.
        let html = r#"{"averageweight": {"nested": 1}, "more": 2}"#;
        assert_eq!(extract_embedded_json(html, "averageweight"), None);
    }

    #[test]
    fn marker_without_braces_yields_none() {
        assert_eq!(
            extract_embedded_json("plain averageweight text", "averageweight"),
            None
        );
    }
}
