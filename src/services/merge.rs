// src/services/merge.rs

//! Record merging.
//!
//! Joins each page's listing entries with its detail records
//! positionally and assembles the final game records.

use crate::models::{GameRecord, ListingEntry, RawDetailItem};
use crate::services::listing::ListingPage;
use crate::services::normalize::normalize_fields;
use crate::services::poll::reduce_polls;

/// Merge all pages with their detail batches, preserving page and
/// within-page order.
///
/// A listing/detail count divergence is a data-quality warning, not an
/// error; pairing proceeds up to the shorter length.
pub fn merge_pages(pages: &[ListingPage], details: &[Vec<RawDetailItem>]) -> Vec<GameRecord> {
    if pages.len() != details.len() {
        log::warn!(
            "{} listing pages but {} detail batches; merging the shorter run",
            pages.len(),
            details.len()
        );
    }

    let mut records = Vec::new();
    for (page, batch) in pages.iter().zip(details) {
        if page.entries.len() != batch.len() {
            log::warn!(
                "Page {}: {} listing entries but {} detail items; pairing up to the shorter length",
                page.page,
                page.entries.len(),
                batch.len()
            );
        }
        for (entry, raw) in page.entries.iter().zip(batch) {
            records.push(merge_record(entry, raw));
        }
    }
    records
}

/// Merge one listing entry with its detail item.
pub fn merge_record(entry: &ListingEntry, raw: &RawDetailItem) -> GameRecord {
    let mut record = record_from_detail(raw);
    record.rank = Some(entry.rank);
    record.game_id = entry.game_id;
    record.thumbnail = Some(entry.thumbnail.clone());
    record.bgg_link = Some(entry.bgg_link.clone());
    record.rating = entry.rating;
    if record.default_name.is_empty() {
        // Placeholder details carry no names; the listing name stands in.
        record.default_name = entry.name.clone();
    }
    record
}

/// Build a record from a detail item alone (single-item profile).
pub fn record_from_detail(raw: &RawDetailItem) -> GameRecord {
    let fields = normalize_fields(raw);
    let poll = reduce_polls(&raw.polls);
    let default_name = fields.default_name().unwrap_or_default().to_string();

    GameRecord {
        rank: None,
        game_id: raw.game_id,
        thumbnail: None,
        bgg_link: None,
        rating: None,
        chinese_name: fields.chinese_name_or_default(),
        name: fields.name,
        yearpublished: fields.yearpublished,
        minplayers: fields.minplayers,
        maxplayers: fields.maxplayers,
        playingtime: fields.playingtime,
        minplaytime: fields.minplaytime,
        maxplaytime: fields.maxplaytime,
        minage: fields.minage,
        link: fields.link,
        poll,
        image: raw.image.clone(),
        description: raw.description.clone(),
        default_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldNode, NO_CHINESE_NAME};
    use std::collections::HashMap;

    fn entry(rank: u32, game_id: u32, name: &str) -> ListingEntry {
        ListingEntry {
            rank,
            name: name.to_string(),
            game_id,
            thumbnail: format!("https://img.example/{game_id}.jpg"),
            bgg_link: format!("/boardgame/{game_id}/x"),
            rating: Some(7.5),
        }
    }

    fn detail(game_id: u32, primary_name: &str) -> RawDetailItem {
        let mut fields: HashMap<String, Vec<FieldNode>> = HashMap::new();
        fields.insert(
            "name".to_string(),
            vec![FieldNode {
                attributes: [
                    ("type".to_string(), "primary".to_string()),
                    ("value".to_string(), primary_name.to_string()),
                ]
                .into_iter()
                .collect(),
            }],
        );
        RawDetailItem {
            game_id,
            fields,
            description: format!("About {primary_name}."),
            ..RawDetailItem::default()
        }
    }

    fn page(page: u32, entries: Vec<ListingEntry>) -> ListingPage {
        ListingPage { page, entries }
    }

    #[test]
    fn merges_in_listing_order_with_default_names() {
        let pages = vec![page(1, vec![entry(1, 13, "Catan"), entry(2, 822, "Carcassonne")])];
        let details = vec![vec![detail(13, "Catan"), detail(822, "Carcassonne")]];

        let records = merge_pages(&pages, &details);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rank, Some(1));
        assert_eq!(records[0].game_id, 13);
        assert_eq!(records[0].default_name, "Catan");
        assert_eq!(records[1].rank, Some(2));
        assert_eq!(records[1].default_name, "Carcassonne");
    }

    #[test]
    fn length_mismatch_pairs_up_to_shorter() {
        let pages = vec![page(1, vec![entry(1, 13, "Catan"), entry(2, 822, "Carcassonne")])];
        let details = vec![vec![detail(13, "Catan")]];

        let records = merge_pages(&pages, &details);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].game_id, 13);
    }

    #[test]
    fn placeholder_detail_keeps_listing_identity() {
        let pages = vec![page(1, vec![entry(1, 13, "Catan")])];
        let details = vec![vec![RawDetailItem::placeholder(13)]];

        let records = merge_pages(&pages, &details);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].game_id, 13);
        assert_eq!(records[0].default_name, "Catan");
        assert!(records[0].name.is_empty());
        assert_eq!(records[0].chinese_name, NO_CHINESE_NAME);
        assert_eq!(records[0].rating, Some(7.5));
    }

    #[test]
    fn page_order_is_preserved_across_pages() {
        let pages = vec![
            page(1, vec![entry(1, 13, "Catan")]),
            page(2, vec![entry(101, 822, "Carcassonne")]),
        ];
        let details = vec![vec![detail(13, "Catan")], vec![detail(822, "Carcassonne")]];

        let records = merge_pages(&pages, &details);
        assert_eq!(
            records.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![Some(1), Some(101)]
        );
    }

    #[test]
    fn single_item_record_has_no_listing_fields() {
        let record = record_from_detail(&detail(13, "Catan"));
        assert_eq!(record.rank, None);
        assert_eq!(record.thumbnail, None);
        assert_eq!(record.bgg_link, None);
        assert_eq!(record.default_name, "Catan");
        assert_eq!(record.description, "About Catan.");
    }
}
