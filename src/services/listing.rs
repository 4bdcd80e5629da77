// src/services/listing.rs

//! Ranked listing page scraping.
//!
//! Each listing page carries three independent data streams: numbered
//! per-rank name cells, thumbnail anchors carrying the canonical link,
//! and rating cells grouped in triples. They are extracted separately
//! and reconciled positionally; unequal lengths are a page-level error.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{ListingConfig, ListingEntry};
use crate::utils::http;

/// All entries scraped from one listing page, in rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub page: u32,
    pub entries: Vec<ListingEntry>,
}

/// Parse one listing page document into aligned entries.
///
/// Ranks start at `(page - 1) * 100 + 1`. A rating cell of literal `0`
/// means "not enough votes" and becomes `None`.
pub fn parse_listing_page(html: &str, page: u32) -> Result<Vec<ListingEntry>> {
    if page == 0 {
        return Err(AppError::parse("listing page numbers are 1-based"));
    }
    let document = Html::parse_document(html);

    let names = extract_names(&document)?;
    let thumbnails = extract_thumbnails(&document)?;
    let ratings = extract_ratings(&document)?;

    if names.len() != thumbnails.len() || thumbnails.len() != ratings.len() {
        return Err(AppError::Alignment {
            page,
            names: names.len(),
            thumbnails: thumbnails.len(),
            ratings: ratings.len(),
        });
    }

    let first_rank = (page - 1) * 100 + 1;
    let entries = names
        .into_iter()
        .zip(thumbnails)
        .zip(ratings)
        .enumerate()
        .map(|(i, ((name, (thumbnail, bgg_link, game_id)), rating))| ListingEntry {
            rank: first_rank + i as u32,
            name,
            game_id,
            thumbnail,
            bgg_link,
            rating,
        })
        .collect();

    Ok(entries)
}

/// Walk the numbered name-cell selector family until the first empty match.
fn extract_names(document: &Html) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for item_num in 1.. {
        let selector_str = format!("#CEcell_objectname{item_num} a");
        let selector = parse_selector(&selector_str)?;
        match document.select(&selector).next() {
            Some(element) => {
                let name: String = element.text().collect::<String>().trim().to_string();
                if name.is_empty() {
                    break;
                }
                names.push(name);
            }
            None => break,
        }
    }
    Ok(names)
}

/// Extract (thumbnail, canonical link, id) triples from thumbnail anchors.
///
/// The numeric identifier is the second path segment of the link,
/// e.g. `/boardgame/13/catan` yields 13.
fn extract_thumbnails(document: &Html) -> Result<Vec<(String, String, u32)>> {
    let selector = parse_selector(".collection_thumbnail img")?;
    let mut triples = Vec::new();

    for img in document.select(&selector) {
        let anchor = img
            .parent()
            .and_then(ElementRef::wrap)
            .filter(|el| el.value().name() == "a")
            .ok_or_else(|| AppError::parse("thumbnail image has no enclosing anchor"))?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| AppError::parse("thumbnail anchor has no href"))?;
        let game_id = game_id_from_link(href)?;
        let src = img.value().attr("src").unwrap_or_default();
        triples.push((src.to_string(), href.to_string(), game_id));
    }

    Ok(triples)
}

/// Extract every third rating cell; ratings appear in triples with the
/// aggregate value in the middle position.
fn extract_ratings(document: &Html) -> Result<Vec<Option<f64>>> {
    let selector = parse_selector(".collection_bggrating")?;
    let mut ratings = Vec::new();

    for (i, cell) in document.select(&selector).enumerate() {
        if i % 3 != 1 {
            continue;
        }
        let text: String = cell.text().collect::<String>().trim().to_string();
        let rating = text.parse::<f64>().ok().filter(|r| *r != 0.0);
        ratings.push(rating);
    }

    Ok(ratings)
}

fn game_id_from_link(href: &str) -> Result<u32> {
    href.split('/')
        .nth(2)
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| AppError::parse(format!("no numeric game id in link '{href}'")))
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Fetches listing pages under bounded concurrency.
///
/// Listing pages are the authoritative source of item identity and
/// rank, so any fetch or parse failure aborts the whole aggregation.
pub struct ListingAggregator {
    client: Client,
    config: ListingConfig,
}

impl ListingAggregator {
    pub fn new(client: Client, config: ListingConfig) -> Self {
        Self { client, config }
    }

    /// Fetch pages `1..=page_count`, preserving page order in the output
    /// regardless of completion order.
    pub async fn fetch_all(&self, page_count: u32) -> Result<Vec<ListingPage>> {
        let concurrency = self.config.max_concurrent.max(1);

        let mut page_stream = stream::iter(1..=page_count)
            .map(|page| self.fetch_page(page))
            .buffered(concurrency);

        let mut pages = Vec::with_capacity(page_count as usize);
        while let Some(result) = page_stream.next().await {
            pages.push(result?);
        }
        Ok(pages)
    }

    async fn fetch_page(&self, page: u32) -> Result<ListingPage> {
        let url = format!(
            "{}/{}?{}",
            self.config.base_url, page, self.config.filter_params
        );
        let body = http::fetch_text(&self.client, &url, self.config.timeout_secs).await?;
        let entries = parse_listing_page(&body, page)?;
        log::info!("Listing page {page}: {} entries", entries.len());
        Ok(ListingPage { page, entries })
    }
}
