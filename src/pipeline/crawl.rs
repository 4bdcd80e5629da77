// src/pipeline/crawl.rs

//! Crawl orchestration.

use crate::error::{AppError, Result};
use crate::models::{Config, GameRecord};
use crate::services::detail::{DetailFetcher, join_ids};
use crate::services::listing::ListingAggregator;
use crate::services::merge::{merge_pages, record_from_detail};
use crate::utils::http;

/// Run the full pipeline for `page_count` listing pages.
///
/// Fails exactly when listing acquisition fails; detail failures are
/// absorbed into placeholder records, so the output may be partially
/// placeholdered but is always complete in listing order.
pub async fn run_crawl(config: &Config, page_count: u32) -> Result<Vec<GameRecord>> {
    let client = http::create_client(&config.crawler)?;

    let aggregator = ListingAggregator::new(client.clone(), config.listing.clone());
    let pages = aggregator.fetch_all(page_count).await?;

    let batches: Vec<String> = pages.iter().map(|p| join_ids(&p.entries)).collect();

    let fetcher = DetailFetcher::new(client, config.detail.clone());
    let details = fetcher.fetch_all(batches).await;

    let records = merge_pages(&pages, &details);
    log::info!("Merged {} records from {} pages", records.len(), pages.len());
    Ok(records)
}

/// Fetch a single game by identifier (single-item profile).
///
/// Skips the listing stage and the startup delay; the record carries
/// no listing-derived fields.
pub async fn run_single(config: &Config, game_id: u32) -> Result<GameRecord> {
    let client = http::create_client(&config.crawler)?;
    let fetcher = DetailFetcher::new(client, config.detail.clone());

    let items = fetcher.fetch_batch(&game_id.to_string()).await;
    let item = items.into_iter().next().ok_or_else(|| {
        AppError::parse(format!("detail API returned no item for id {game_id}"))
    })?;

    Ok(record_from_detail(&item))
}
