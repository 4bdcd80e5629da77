//! Listing entry data structure.

use serde::{Deserialize, Serialize};

/// One ranked row scraped from a listing page.
///
/// Ranks are strictly increasing within a page, starting at
/// `(page - 1) * 100 + 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingEntry {
    /// Global rank of the game
    pub rank: u32,

    /// Display name shown on the listing page
    pub name: String,

    /// Numeric game identifier, taken from the canonical link
    pub game_id: u32,

    /// Thumbnail image URL
    pub thumbnail: String,

    /// Canonical link to the game page
    pub bgg_link: String,

    /// Aggregate rating; `None` when the site shows 0 ("not enough votes")
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rating_is_never_serialized_as_number() {
        let entry = ListingEntry {
            rank: 1,
            name: "Catan".to_string(),
            game_id: 13,
            thumbnail: "https://cf.geekdo-images.com/thumb.jpg".to_string(),
            bgg_link: "/boardgame/13/catan".to_string(),
            rating: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["rating"].is_null());
    }
}
