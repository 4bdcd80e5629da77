// src/services/detail.rs

//! Detail API batching, fetching and XML parsing.
//!
//! Identifiers are comma-joined per listing page and fetched as one
//! batch. A failed batch never fails the pipeline: every member is
//! replaced by a placeholder record carrying only its identifier.

use std::collections::HashMap;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{DetailConfig, FieldNode, ListingEntry, Poll, PollBucket, PollOption, RawDetailItem};
use crate::utils::http;

/// Multi-valued fields recognized in the detail payload.
pub const RECOGNIZED_FIELDS: &[&str] = &[
    "name",
    "yearpublished",
    "minplayers",
    "maxplayers",
    "playingtime",
    "minplaytime",
    "maxplaytime",
    "minage",
    "link",
];

/// Comma-join the identifiers of a page's listing entries.
///
/// Encounter order is preserved and duplicates pass through unchanged;
/// the detail API tolerates and echoes them.
pub fn join_ids(entries: &[ListingEntry]) -> String {
    entries
        .iter()
        .map(|e| e.game_id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// One placeholder record per identifier in a batch, in input order.
pub fn placeholders_for_batch(id_batch: &str) -> Vec<RawDetailItem> {
    id_batch
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .map(RawDetailItem::placeholder)
        .collect()
}

/// Fetches and parses detail batches under bounded concurrency.
pub struct DetailFetcher {
    client: Client,
    config: DetailConfig,
}

impl DetailFetcher {
    pub fn new(client: Client, config: DetailConfig) -> Self {
        Self { client, config }
    }

    /// Fetch all batches, preserving batch order in the output.
    ///
    /// Waits out the configured startup delay before the first call.
    pub async fn fetch_all(&self, batches: Vec<String>) -> Vec<Vec<RawDetailItem>> {
        if self.config.startup_delay_secs > 0 {
            tokio::time::sleep(Duration::from_secs(self.config.startup_delay_secs)).await;
        }

        let concurrency = self.config.max_concurrent.clamp(1, 10);
        stream::iter(batches)
            .map(|batch| async move { self.fetch_batch(&batch).await })
            .buffered(concurrency)
            .collect()
            .await
    }

    /// Fetch one batch; transport and parse failures are absorbed into
    /// placeholder records so sibling batches keep their results.
    pub async fn fetch_batch(&self, id_batch: &str) -> Vec<RawDetailItem> {
        match self.try_fetch_batch(id_batch).await {
            Ok(items) => items,
            Err(error) => {
                log::warn!("Detail batch [{id_batch}] failed: {error}; using placeholders");
                placeholders_for_batch(id_batch)
            }
        }
    }

    async fn try_fetch_batch(&self, id_batch: &str) -> Result<Vec<RawDetailItem>> {
        let url = format!("{}?id={}", self.config.api_url, id_batch);
        let body = http::fetch_text(&self.client, &url, self.config.timeout_secs).await?;
        let items = parse_detail_payload(&body)?;
        log::info!("Detail batch [{id_batch}]: {} items", items.len());
        Ok(items)
    }
}

enum TextCapture {
    Description,
    Image,
}

/// Parse an `items.item[]` XML payload into raw detail items.
///
/// Recognized multi-valued fields are kept as attribute maps; polls are
/// parsed into labeled option buckets; description and image text is
/// captured verbatim.
pub fn parse_detail_payload(xml: &str) -> Result<Vec<RawDetailItem>> {
    let mut reader = Reader::from_str(xml);

    let mut items: Vec<RawDetailItem> = Vec::new();
    let mut current: Option<RawDetailItem> = None;
    let mut current_poll: Option<Poll> = None;
    let mut current_bucket: Option<PollBucket> = None;
    let mut capture: Option<TextCapture> = None;
    let mut text_buf = String::new();

    loop {
        let event = reader.read_event()?;
        let is_empty = matches!(&event, Event::Empty(_));

        match &event {
            Event::Start(e) | Event::Empty(e) => {
                let attrs = read_attributes(e)?;
                match e.name().as_ref() {
                    b"items" => {}
                    b"item" => {
                        let game_id = attrs
                            .get("id")
                            .and_then(|v| v.parse().ok())
                            .ok_or_else(|| AppError::parse("item element missing numeric id"))?;
                        let item = RawDetailItem {
                            game_id,
                            ..RawDetailItem::default()
                        };
                        if is_empty {
                            items.push(item);
                        } else {
                            current = Some(item);
                        }
                    }
                    b"poll" => {
                        let poll = Poll {
                            name: attrs.get("name").cloned().unwrap_or_default(),
                            title: attrs.get("title").cloned().unwrap_or_default(),
                            total_votes: attrs
                                .get("totalvotes")
                                .and_then(|v| v.parse().ok())
                                .unwrap_or(0),
                            buckets: Vec::new(),
                        };
                        if is_empty {
                            if let Some(item) = current.as_mut() {
                                item.polls.push(poll);
                            }
                        } else {
                            current_poll = Some(poll);
                        }
                    }
                    b"results" => {
                        let bucket = PollBucket {
                            num_players: attrs.get("numplayers").cloned(),
                            options: Vec::new(),
                        };
                        if is_empty {
                            if let Some(poll) = current_poll.as_mut() {
                                poll.buckets.push(bucket);
                            }
                        } else {
                            current_bucket = Some(bucket);
                        }
                    }
                    b"result" => {
                        if let Some(bucket) = current_bucket.as_mut() {
                            bucket.options.push(PollOption {
                                value: attrs.get("value").cloned().unwrap_or_default(),
                                num_votes: attrs
                                    .get("numvotes")
                                    .and_then(|v| v.parse().ok())
                                    .unwrap_or(0),
                            });
                        }
                    }
                    b"description" => {
                        if !is_empty {
                            capture = Some(TextCapture::Description);
                            text_buf.clear();
                        }
                    }
                    b"image" => {
                        if !is_empty {
                            capture = Some(TextCapture::Image);
                            text_buf.clear();
                        }
                    }
                    tag => {
                        let tag = String::from_utf8_lossy(tag).into_owned();
                        if RECOGNIZED_FIELDS.contains(&tag.as_str()) {
                            if let Some(item) = current.as_mut() {
                                item.fields
                                    .entry(tag)
                                    .or_default()
                                    .push(FieldNode { attributes: attrs });
                            }
                        }
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"item" => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                b"poll" => {
                    if let (Some(item), Some(poll)) = (current.as_mut(), current_poll.take()) {
                        item.polls.push(poll);
                    }
                }
                b"results" => {
                    if let (Some(poll), Some(bucket)) = (current_poll.as_mut(), current_bucket.take())
                    {
                        poll.buckets.push(bucket);
                    }
                }
                b"description" => {
                    if let Some(item) = current.as_mut() {
                        item.description = text_buf.trim().to_string();
                    }
                    capture = None;
                }
                b"image" => {
                    if let Some(item) = current.as_mut() {
                        item.image = Some(text_buf.trim().to_string());
                    }
                    capture = None;
                }
                _ => {}
            },
            Event::Text(t) => {
                if capture.is_some() {
                    text_buf.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if capture.is_some() {
                    text_buf.push_str(&String::from_utf8_lossy(t));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

fn read_attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| AppError::parse(format!("malformed attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}
