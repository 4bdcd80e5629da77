//! Final merged game record and poll result types.

use serde::{Deserialize, Serialize};

/// Sentinel used when no name variant is written in Chinese script.
pub const NO_CHINESE_NAME: &str = "Not provided";

/// A `<link type=".." id=".." value=".."/>` triple, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkRef {
    #[serde(rename = "type")]
    pub link_type: String,
    pub id: String,
    pub value: String,
}

/// Winning value of a poll bucket: numeric when it parses, text otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PollValue {
    Number(f64),
    Text(String),
}

/// Scalar decision reduced from one poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PollResult {
    /// Community-preferred player count, from the `suggested_numplayers` poll.
    ///
    /// `has_upper_limit` is true exactly when the winning bucket label
    /// carried a `"+"` marker (`"4+"` means four or more players).
    PlayerCount {
        name: String,
        num: i64,
        has_upper_limit: bool,
    },

    /// Winning option of one bucket of any other named poll.
    Named { name: String, value: PollValue },
}

/// Final merged entity: listing fields plus normalized detail fields.
///
/// Listing-derived fields are optional so the single-item profile,
/// which never sees a listing page, can share the type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    /// Global rank (absent in the single-item profile)
    pub rank: Option<u32>,

    /// Numeric game identifier
    pub game_id: u32,

    /// Thumbnail URL from the listing page
    pub thumbnail: Option<String>,

    /// Canonical link from the listing page
    pub bgg_link: Option<String>,

    /// Aggregate rating from the listing page; `None` when below the vote floor
    pub rating: Option<f64>,

    /// All name variants, primary first
    pub name: Vec<String>,

    /// First name variant written in Chinese script, or the sentinel
    pub chinese_name: String,

    pub yearpublished: Vec<i64>,
    pub minplayers: Vec<i64>,
    pub maxplayers: Vec<i64>,
    pub playingtime: Vec<i64>,
    pub minplaytime: Vec<i64>,
    pub maxplaytime: Vec<i64>,
    pub minage: Vec<i64>,

    /// Related-entity link triples
    pub link: Vec<LinkRef>,

    /// Scalar poll decisions
    pub poll: Vec<PollResult>,

    /// Full-size image URL from the detail payload
    pub image: Option<String>,

    /// Free-text description
    pub description: String,

    /// Chinese name when present, else the primary name
    pub default_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_value_serializes_untagged() {
        let num = serde_json::to_value(PollValue::Number(3.0)).unwrap();
        assert_eq!(num, serde_json::json!(3.0));
        let text = serde_json::to_value(PollValue::Text("Some necessary text".into())).unwrap();
        assert_eq!(text, serde_json::json!("Some necessary text"));
    }

    #[test]
    fn player_count_result_keeps_field_names() {
        let result = PollResult::PlayerCount {
            name: "suggested_numplayers".into(),
            num: 4,
            has_upper_limit: false,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["num"], 4);
        assert_eq!(json["has_upper_limit"], false);
    }
}
